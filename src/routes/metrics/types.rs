use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::metrics;

#[derive(Debug, Serialize, ToSchema)]
pub struct MetricResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub measurement_unit: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<metrics::Model> for MetricResponse {
    fn from(model: metrics::Model) -> Self {
        Self {
            id: model.id,
            metric_type: model.metric_type,
            measurement_unit: model.measurement_unit,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Body for both create and update. Both fields are globally unique across
/// metrics.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MetricRequest {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub measurement_unit: String,
}
