mod handlers;
mod types;

pub use handlers::{
    create_measurement, daily_aggregates, get_measurement, list_daily_measurements,
    list_measurements, weekly_aggregates,
};
pub use types::{
    AggregationQuery, CreateMeasurementRequest, DailyMeasurementsQuery, MeasurementResponse,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_measurement, __path_daily_aggregates, __path_get_measurement,
    __path_list_daily_measurements, __path_list_measurements, __path_weekly_aggregates,
};
