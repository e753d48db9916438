//! Business logic for the three resource types.
//!
//! Handlers stay thin: every operation here takes a database connection and
//! plain values, and returns domain models or an `AppError`, so the whole
//! layer is unit-testable without an HTTP stack.

pub mod departments;
pub mod measurements;
pub mod metrics;

use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, PaginatorTrait, Select};

use crate::common::Paginated;
use crate::error::{AppError, AppResult};

/// Run a select as a zero-based page, wrapping it in the pagination envelope.
pub(crate) async fn paginate_select<C, E>(
    db: &C,
    select: Select<E>,
    page: u64,
    size: u64,
) -> AppResult<Paginated<E::Model>>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Send + Sync,
{
    if size == 0 {
        return Err(AppError::BadRequest("page size must be at least 1".to_string()));
    }

    let paginator = select.paginate(db, size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page).await?;

    Ok(Paginated::new(
        items,
        page,
        totals.number_of_items,
        totals.number_of_pages,
    ))
}

/// Trim a client-supplied text field, rejecting blank input.
pub(crate) fn non_blank(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be blank")));
    }
    Ok(trimmed.to_string())
}
