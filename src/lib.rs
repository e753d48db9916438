//! Workplace Metrics API - CRUD REST API for metrics, departments, and measurements
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod routes;
pub mod services;
