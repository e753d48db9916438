pub mod departments;
pub mod measurements;
pub mod metrics;
