use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc, Weekday,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseBackend,
    DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, Statement,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::Paginated;
use crate::entity::{departments, measurements, metrics};
use crate::error::{AppError, AppResult};

pub const FAILED_TO_SAVE_MEASUREMENT_RECORD: &str = "Failed to save measurement record: ";
pub const NO_RECORDS_FOUND: &str = "No records found";

/// Storage-side AVG/MIN/MAX over one (metric, department, window) filter.
/// All three are null when no measurement falls inside the window.
#[derive(Debug, PartialEq, Serialize, ToSchema, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedResult {
    pub average_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

const AGGREGATE_SQL: &str = r"
SELECT
    AVG(value) AS average_value,
    MIN(value) AS min_value,
    MAX(value) AS max_value
FROM measurements
WHERE metric_id = $1
  AND department_id = $2
  AND measurement_timestamp >= $3
  AND measurement_timestamp <= $4
";

pub async fn list_measurements(
    db: &DatabaseConnection,
    page: u64,
    size: u64,
) -> AppResult<Paginated<measurements::Model>> {
    super::paginate_select(
        db,
        measurements::Entity::find().order_by_asc(measurements::Column::Id),
        page,
        size,
    )
    .await
}

pub async fn get_measurement(db: &DatabaseConnection, id: i64) -> AppResult<measurements::Model> {
    measurements::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found_for_id(id))
}

/// Create a measurement after resolving both referenced resources.
///
/// The two resolution failures surface as the same error kind but with
/// distinct messages naming the missing resource. Measurements are immutable
/// once created; there is no update operation.
pub async fn create_measurement(
    db: &DatabaseConnection,
    value: f64,
    measurement_timestamp: DateTime<FixedOffset>,
    metric_id: i64,
    department_id: i64,
) -> AppResult<measurements::Model> {
    let department = departments::Entity::find_by_id(department_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{FAILED_TO_SAVE_MEASUREMENT_RECORD}Department not found with id = {department_id}"
            ))
        })?;

    let metric = metrics::Entity::find_by_id(metric_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{FAILED_TO_SAVE_MEASUREMENT_RECORD}Metric not found with id = {metric_id}"
            ))
        })?;

    let measurement = measurements::ActiveModel {
        value: Set(value),
        measurement_timestamp: Set(measurement_timestamp),
        metric_id: Set(metric.id),
        department_id: Set(department.id),
        created_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };

    Ok(measurement.insert(db).await?)
}

/// Measurements for one (metric, department) pair since the start of the
/// current day in the configured offset, up to now (half-open window).
pub async fn list_daily_measurements(
    db: &DatabaseConnection,
    offset: FixedOffset,
    page: u64,
    size: u64,
    metric_id: i64,
    department_id: i64,
) -> AppResult<Paginated<measurements::Model>> {
    // Deliberately less specific than create_measurement's messages.
    let metric = metrics::Entity::find_by_id(metric_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_RECORDS_FOUND.to_string()))?;

    let department = departments::Entity::find_by_id(department_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_RECORDS_FOUND.to_string()))?;

    let now = Utc::now();
    let start = day_start(now.with_timezone(&offset).date_naive(), offset);

    super::paginate_select(
        db,
        measurements::Entity::find()
            .filter(measurements::Column::MetricId.eq(metric.id))
            .filter(measurements::Column::DepartmentId.eq(department.id))
            .filter(measurements::Column::MeasurementTimestamp.gte(start))
            .filter(measurements::Column::MeasurementTimestamp.lt(now))
            .order_by_asc(measurements::Column::Id),
        page,
        size,
    )
    .await
}

/// AVG/MIN/MAX over the requested calendar day.
///
/// No existence check on the ids: an unknown metric or department simply
/// matches no rows and yields a null aggregate.
pub async fn daily_aggregates(
    db: &DatabaseConnection,
    offset: FixedOffset,
    metric_id: i64,
    department_id: i64,
    date: NaiveDate,
) -> AppResult<AggregatedResult> {
    let (from, to) = daily_window(date, offset)?;
    aggregated_results(db, metric_id, department_id, from, to).await
}

/// AVG/MIN/MAX over the ISO week (Monday through Sunday) containing the
/// requested date.
pub async fn weekly_aggregates(
    db: &DatabaseConnection,
    offset: FixedOffset,
    metric_id: i64,
    department_id: i64,
    date: NaiveDate,
) -> AppResult<AggregatedResult> {
    let (from, to) = weekly_window(date, offset)?;
    aggregated_results(db, metric_id, department_id, from, to).await
}

async fn aggregated_results(
    db: &DatabaseConnection,
    metric_id: i64,
    department_id: i64,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> AppResult<AggregatedResult> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            AGGREGATE_SQL,
            [
                metric_id.into(),
                department_id.into(),
                from.into(),
                to.into(),
            ],
        ))
        .await?;

    match row {
        Some(row) => Ok(AggregatedResult::from_query_result(&row, "")?),
        // AVG/MIN/MAX without GROUP BY always produce one row, but be
        // lenient if the driver reports none.
        None => Ok(AggregatedResult {
            average_value: None,
            min_value: None,
            max_value: None,
        }),
    }
}

// Plausible calendar years; the chrono-internal extremes overflow the
// window arithmetic below.
const MIN_WINDOW_YEAR: i32 = 1000;
const MAX_WINDOW_YEAR: i32 = 9999;

fn check_window_date(date: NaiveDate) -> AppResult<()> {
    if !(MIN_WINDOW_YEAR..=MAX_WINDOW_YEAR).contains(&date.year()) {
        return Err(AppError::BadRequest(format!(
            "date must fall between years {MIN_WINDOW_YEAR} and {MAX_WINDOW_YEAR}"
        )));
    }
    Ok(())
}

/// Closed window `[00:00:00.000000, 23:59:59.999999]` for one calendar day
/// in the given offset, expressed in UTC.
pub fn daily_window(
    date: NaiveDate,
    offset: FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    check_window_date(date)?;
    let start = day_start(date, offset);
    let end = start + Duration::days(1) - Duration::microseconds(1);
    Ok((start, end))
}

/// Closed window spanning the ISO week (Monday through Sunday) that
/// contains the given date.
pub fn weekly_window(
    date: NaiveDate,
    offset: FixedOffset,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    check_window_date(date)?;
    let week = date.week(Weekday::Mon);
    let start = day_start(week.first_day(), offset);
    let end = day_start(week.last_day(), offset) + Duration::days(1) - Duration::microseconds(1);
    Ok((start, end))
}

fn day_start(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // Fixed offsets have no DST transitions, so local midnight always
    // exists and is unambiguous.
    offset
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .single()
        .expect("fixed-offset local midnight is unambiguous")
        .with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_offset() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_window_covers_the_whole_day() {
        let (from, to) = daily_window(date(2020, 12, 2), utc_offset()).unwrap();
        assert_eq!(from.to_rfc3339(), "2020-12-02T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2020-12-02T23:59:59.999999+00:00");
    }

    #[test]
    fn daily_window_excludes_the_next_midnight() {
        let (_, to) = daily_window(date(2020, 12, 2), utc_offset()).unwrap();
        let next_day_first_reading = Utc.with_ymd_and_hms(2020, 12, 3, 0, 1, 0).unwrap();
        assert!(to < next_day_first_reading);
    }

    #[test]
    fn daily_window_respects_the_configured_offset() {
        // UTC+2: local midnight is 22:00 the previous day in UTC.
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let (from, to) = daily_window(date(2020, 12, 2), plus_two).unwrap();
        assert_eq!(from.to_rfc3339(), "2020-12-01T22:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2020-12-02T21:59:59.999999+00:00");
    }

    #[test]
    fn weekly_window_runs_monday_through_sunday() {
        // 2020-12-02 is a Wednesday.
        let (from, to) = weekly_window(date(2020, 12, 2), utc_offset()).unwrap();
        assert_eq!(from.to_rfc3339(), "2020-11-30T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2020-12-06T23:59:59.999999+00:00");
    }

    #[test]
    fn weekly_window_is_stable_across_the_week() {
        let monday = weekly_window(date(2020, 11, 30), utc_offset()).unwrap();
        let sunday = weekly_window(date(2020, 12, 6), utc_offset()).unwrap();
        assert_eq!(monday, sunday);
    }

    #[test]
    fn weekly_window_handles_year_boundary() {
        // 2021-01-01 is a Friday; its ISO week starts Monday 2020-12-28.
        let (from, to) = weekly_window(date(2021, 1, 1), utc_offset()).unwrap();
        assert_eq!(from.to_rfc3339(), "2020-12-28T00:00:00+00:00");
        assert_eq!(to.to_rfc3339(), "2021-01-03T23:59:59.999999+00:00");
    }

    #[test]
    fn daily_window_rejects_extreme_dates() {
        for extreme in [NaiveDate::MIN, NaiveDate::MAX] {
            let err = daily_window(extreme, utc_offset()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[test]
    fn weekly_window_rejects_extreme_dates() {
        // Near NaiveDate::MIN/MAX, ISO-week arithmetic would leave the
        // representable range; the input must be rejected instead.
        for extreme in [NaiveDate::MIN, NaiveDate::MAX] {
            let err = weekly_window(extreme, utc_offset()).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[test]
    fn windows_accept_the_supported_year_bounds() {
        assert!(daily_window(date(1000, 1, 1), utc_offset()).is_ok());
        assert!(daily_window(date(9999, 12, 31), utc_offset()).is_ok());
        assert!(weekly_window(date(1000, 1, 1), utc_offset()).is_ok());
        assert!(weekly_window(date(9999, 12, 31), utc_offset()).is_ok());
    }
}
