use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::departments;

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<departments::Model> for DepartmentResponse {
    fn from(model: departments::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Body for both create and update; the name is the only client-settable
/// field.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DepartmentRequest {
    pub name: String,
}
