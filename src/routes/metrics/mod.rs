mod handlers;
mod types;

pub use handlers::{create_metric, delete_metric, get_metric, list_metrics, update_metric};
pub use types::{MetricRequest, MetricResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_metric, __path_delete_metric, __path_get_metric, __path_list_metrics,
    __path_update_metric,
};
