use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};

use crate::common::Paginated;
use crate::entity::departments;
use crate::error::{AppError, AppResult};

pub async fn list_departments(
    db: &DatabaseConnection,
    page: u64,
    size: u64,
) -> AppResult<Paginated<departments::Model>> {
    super::paginate_select(
        db,
        departments::Entity::find().order_by_asc(departments::Column::Id),
        page,
        size,
    )
    .await
}

pub async fn get_department(db: &DatabaseConnection, id: i64) -> AppResult<departments::Model> {
    departments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found_for_id(id))
}

pub async fn create_department(
    db: &DatabaseConnection,
    name: &str,
) -> AppResult<departments::Model> {
    let name = super::non_blank(name, "name")?;
    let now = Utc::now().fixed_offset();

    let department = departments::ActiveModel {
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(department.insert(db).await?)
}

/// Fetch-then-overwrite update. Only the name is client-settable; the
/// updated timestamp is reassigned on every save. Concurrent updates to the
/// same row are last-write-wins (no version column).
pub async fn update_department(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
) -> AppResult<departments::Model> {
    let name = super::non_blank(name, "name")?;

    let existing = match get_department(db, id).await {
        Ok(department) => department,
        Err(err @ AppError::NotFound(_)) => return Err(AppError::not_updated(&err)),
        Err(err) => return Err(err),
    };

    let mut department: departments::ActiveModel = existing.into();
    department.name = Set(name);
    department.updated_at = Set(Utc::now().fixed_offset());

    Ok(department.update(db).await?)
}

pub async fn delete_department(db: &DatabaseConnection, id: i64) -> AppResult<()> {
    let result = departments::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_deleted(id));
    }
    Ok(())
}
