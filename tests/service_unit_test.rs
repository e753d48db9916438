//! Unit tests for the resource services over a mock database.
//!
//! Run with: cargo test --test service_unit_test

use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use workplace_metrics_api::entity::{departments, measurements, metrics};
use workplace_metrics_api::error::AppError;
use workplace_metrics_api::services;

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

fn department(id: i64, name: &str) -> departments::Model {
    departments::Model {
        id,
        name: name.to_string(),
        created_at: now(),
        updated_at: now(),
    }
}

fn metric(id: i64, metric_type: &str, unit: &str) -> metrics::Model {
    metrics::Model {
        id,
        metric_type: metric_type.to_string(),
        measurement_unit: unit.to_string(),
        created_at: now(),
        updated_at: now(),
    }
}

#[tokio::test]
async fn get_department_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<departments::Model>::new()])
        .into_connection();

    let err = services::departments::get_department(&db, 42)
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => {
            assert_eq!(msg, "Could not retrieve resource with id = 42");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn get_department_returns_the_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![department(7, "Logistics")]])
        .into_connection();

    let found = services::departments::get_department(&db, 7).await.unwrap();
    assert_eq!(found.id, 7);
    assert_eq!(found.name, "Logistics");
}

#[tokio::test]
async fn create_department_persists_the_trimmed_name() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![department(1, "Facilities")]])
        .into_connection();

    let created = services::departments::create_department(&db, "  Facilities ")
        .await
        .unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Facilities");
}

#[tokio::test]
async fn create_department_rejects_blank_name_before_touching_storage() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = services::departments::create_department(&db, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn update_department_wraps_not_found_as_not_updated() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<departments::Model>::new()])
        .into_connection();

    let err = services::departments::update_department(&db, 99, "Renamed")
        .await
        .unwrap_err();

    match err {
        AppError::NotUpdated(msg) => {
            assert_eq!(
                msg,
                "Resource could not be updated: Could not retrieve resource with id = 99"
            );
        }
        other => panic!("expected NotUpdated, got {other:?}"),
    }
}

#[tokio::test]
async fn update_department_overwrites_only_the_name() {
    let existing = department(3, "Old Name");
    let mut updated = existing.clone();
    updated.name = "New Name".to_string();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing]])
        .append_query_results([vec![updated]])
        .into_connection();

    let result = services::departments::update_department(&db, 3, "New Name")
        .await
        .unwrap();
    assert_eq!(result.id, 3);
    assert_eq!(result.name, "New Name");
}

#[tokio::test]
async fn delete_department_fails_when_nothing_was_deleted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let err = services::departments::delete_department(&db, 5)
        .await
        .unwrap_err();

    match err {
        AppError::NotDeleted(msg) => {
            assert_eq!(msg, "There is no resource to be deleted with id = 5");
        }
        other => panic!("expected NotDeleted, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_department_succeeds_when_a_row_was_removed() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    services::departments::delete_department(&db, 5).await.unwrap();
}

#[tokio::test]
async fn get_metric_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<metrics::Model>::new()])
        .into_connection();

    let err = services::metrics::get_metric(&db, 13).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_metric_wraps_not_found_as_not_updated() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<metrics::Model>::new()])
        .into_connection();

    let err = services::metrics::update_metric(&db, 13, "Humidity", "Percent")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotUpdated(_)));
}

#[tokio::test]
async fn delete_metric_fails_when_nothing_was_deleted() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let err = services::metrics::delete_metric(&db, 8).await.unwrap_err();
    assert!(matches!(err, AppError::NotDeleted(_)));
}

#[tokio::test]
async fn create_metric_surfaces_other_database_errors_untranslated() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "connection reset".to_string(),
        ))])
        .into_connection();

    let err = services::metrics::create_metric(&db, "Temperature", "Celsius")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
async fn create_measurement_names_the_missing_department() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<departments::Model>::new()])
        .into_connection();

    let err = services::measurements::create_measurement(&db, 17.4, now(), 1, 77)
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => {
            assert_eq!(
                msg,
                "Failed to save measurement record: Department not found with id = 77"
            );
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn create_measurement_names_the_missing_metric() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![department(2, "Warehouse")]])
        .append_query_results([Vec::<metrics::Model>::new()])
        .into_connection();

    let err = services::measurements::create_measurement(&db, 17.4, now(), 55, 2)
        .await
        .unwrap_err();

    match err {
        AppError::NotFound(msg) => {
            assert_eq!(
                msg,
                "Failed to save measurement record: Metric not found with id = 55"
            );
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn create_measurement_references_both_resolved_rows() {
    let timestamp = now();
    let persisted = measurements::Model {
        id: 10,
        value: 25.1,
        measurement_timestamp: timestamp,
        metric_id: 4,
        department_id: 2,
        created_at: now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![department(2, "Warehouse")]])
        .append_query_results([vec![metric(4, "Temperature", "Celsius")]])
        .append_query_results([vec![persisted]])
        .into_connection();

    let created = services::measurements::create_measurement(&db, 25.1, timestamp, 4, 2)
        .await
        .unwrap();
    assert_eq!(created.metric_id, 4);
    assert_eq!(created.department_id, 2);
    assert_eq!(created.value, 25.1);
}

#[tokio::test]
async fn get_measurement_returns_not_found_for_missing_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<measurements::Model>::new()])
        .into_connection();

    let err = services::measurements::get_measurement(&db, 3).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_rejects_zero_page_size() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let err = services::departments::list_departments(&db, 0, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}
