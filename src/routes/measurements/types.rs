use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity::measurements;

#[derive(Debug, Serialize, ToSchema)]
pub struct MeasurementResponse {
    pub id: i64,
    pub value: f64,
    pub measurement_timestamp: DateTime<FixedOffset>,
    pub metric_id: i64,
    pub department_id: i64,
    pub created_at: DateTime<FixedOffset>,
}

impl From<measurements::Model> for MeasurementResponse {
    fn from(model: measurements::Model) -> Self {
        Self {
            id: model.id,
            value: model.value,
            measurement_timestamp: model.measurement_timestamp,
            metric_id: model.metric_id,
            department_id: model.department_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMeasurementRequest {
    pub value: f64,
    /// Point in time the reading pertains to (distinct from the
    /// storage-assigned creation timestamp)
    pub measurement_timestamp: DateTime<FixedOffset>,
    pub metric_id: i64,
    pub department_id: i64,
}

fn default_page() -> u64 {
    0
}

fn default_size() -> u64 {
    10
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyMeasurementsQuery {
    /// Zero-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (must be at least 1)
    #[serde(default = "default_size")]
    pub size: u64,
    pub metric_id: i64,
    pub department_id: i64,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AggregationQuery {
    pub metric_id: i64,
    pub department_id: i64,
    /// Date inside the requested day or ISO week (YYYY-MM-DD)
    pub date: NaiveDate,
}
