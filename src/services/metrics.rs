use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, QueryOrder, SqlErr,
};

use crate::common::Paginated;
use crate::entity::metrics;
use crate::error::{
    AppError, AppResult, SAVE_CONSTRAINT_VIOLATION, UPDATE_CONSTRAINT_VIOLATION,
};

/// Whether a save happened in create or update context; the constraint
/// violation message differs between the two.
#[derive(Clone, Copy)]
enum SaveContext {
    Create,
    Update,
}

/// Uniqueness violations become a client-facing constraint error; every
/// other database failure passes through untranslated.
fn translate_save_err(sql_err: Option<SqlErr>, context: SaveContext) -> Option<AppError> {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            let message = match context {
                SaveContext::Create => SAVE_CONSTRAINT_VIOLATION,
                SaveContext::Update => UPDATE_CONSTRAINT_VIOLATION,
            };
            Some(AppError::ConstraintViolation(message.to_string()))
        }
        _ => None,
    }
}

fn map_save_err(err: DbErr, context: SaveContext) -> AppError {
    translate_save_err(err.sql_err(), context).unwrap_or(AppError::Database(err))
}

pub async fn list_metrics(
    db: &DatabaseConnection,
    page: u64,
    size: u64,
) -> AppResult<Paginated<metrics::Model>> {
    super::paginate_select(
        db,
        metrics::Entity::find().order_by_asc(metrics::Column::Id),
        page,
        size,
    )
    .await
}

pub async fn get_metric(db: &DatabaseConnection, id: i64) -> AppResult<metrics::Model> {
    metrics::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found_for_id(id))
}

pub async fn create_metric(
    db: &DatabaseConnection,
    metric_type: &str,
    measurement_unit: &str,
) -> AppResult<metrics::Model> {
    let metric_type = super::non_blank(metric_type, "type")?;
    let measurement_unit = super::non_blank(measurement_unit, "measurement_unit")?;
    let now = Utc::now().fixed_offset();

    let metric = metrics::ActiveModel {
        metric_type: Set(metric_type),
        measurement_unit: Set(measurement_unit),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    metric
        .insert(db)
        .await
        .map_err(|err| map_save_err(err, SaveContext::Create))
}

/// Fetch-then-overwrite update of both client-settable fields. A uniqueness
/// violation during the save step is reported with the update-context
/// message. Last-write-wins under concurrency (no version column).
pub async fn update_metric(
    db: &DatabaseConnection,
    id: i64,
    metric_type: &str,
    measurement_unit: &str,
) -> AppResult<metrics::Model> {
    let metric_type = super::non_blank(metric_type, "type")?;
    let measurement_unit = super::non_blank(measurement_unit, "measurement_unit")?;

    let existing = match get_metric(db, id).await {
        Ok(metric) => metric,
        Err(err @ AppError::NotFound(_)) => return Err(AppError::not_updated(&err)),
        Err(err) => return Err(err),
    };

    let mut metric: metrics::ActiveModel = existing.into();
    metric.metric_type = Set(metric_type);
    metric.measurement_unit = Set(measurement_unit);
    metric.updated_at = Set(Utc::now().fixed_offset());

    metric
        .update(db)
        .await
        .map_err(|err| map_save_err(err, SaveContext::Update))
}

pub async fn delete_metric(db: &DatabaseConnection, id: i64) -> AppResult<()> {
    let result = metrics::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_deleted(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate_key() -> SqlErr {
        SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"metrics_metric_type_key\""
                .to_string(),
        )
    }

    #[test]
    fn unique_violation_on_create_uses_the_save_message() {
        let err = translate_save_err(Some(duplicate_key()), SaveContext::Create)
            .expect("unique violations must be translated");
        match err {
            AppError::ConstraintViolation(message) => {
                assert_eq!(message, SAVE_CONSTRAINT_VIOLATION);
            }
            other => panic!("expected a constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn unique_violation_on_update_uses_the_update_message() {
        let err = translate_save_err(Some(duplicate_key()), SaveContext::Update)
            .expect("unique violations must be translated");
        match err {
            AppError::ConstraintViolation(message) => {
                assert_eq!(message, UPDATE_CONSTRAINT_VIOLATION);
            }
            other => panic!("expected a constraint violation, got {other:?}"),
        }
    }

    #[test]
    fn other_sql_errors_are_left_for_the_database_mapping() {
        let foreign_key = SqlErr::ForeignKeyConstraintViolation(
            "violates foreign key constraint".to_string(),
        );
        assert!(translate_save_err(Some(foreign_key), SaveContext::Create).is_none());
        assert!(translate_save_err(None, SaveContext::Update).is_none());
    }
}
