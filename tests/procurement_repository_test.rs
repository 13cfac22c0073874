// ==========================================
// Repository integration tests
// ==========================================
// Target: submission upsert / fetch / list / delete against
// a file-backed SQLite database
// ==========================================

mod helpers;
mod test_helpers;

use bqc_generator::db::{open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use bqc_generator::domain::EvaluationMethodology;
use bqc_generator::logging;
use bqc_generator::repository::{ProcurementRepository, ProcurementStore, RepositoryError};
use chrono::{TimeZone, Utc};
use helpers::record_builder::RecordBuilder;

fn repo() -> (tempfile::NamedTempFile, ProcurementRepository) {
    let (file, db_path) = test_helpers::create_test_db().expect("create test db");
    let repo = ProcurementRepository::new(&db_path).expect("open repository");
    (file, repo)
}

#[test]
fn test_schema_version_recorded() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let conn = open_sqlite_connection(&db_path).unwrap();
    assert_eq!(
        read_schema_version(&conn).unwrap(),
        Some(CURRENT_SCHEMA_VERSION)
    );
}

#[test]
fn test_round_trip_keeps_full_record() {
    logging::init_test();
    let (_file, repo) = repo();

    let record = RecordBuilder::goods("MM/GDS/2024/017")
        .description("Supply of centrifugal pumps")
        .cec(2.0, 1.7)
        .quantity(1000.0, "Nos")
        .mse_relaxation()
        .emd_note("Pay via <b>NEFT</b>")
        .approval("A. Sharma", "P. Nair")
        .build();

    let id = repo.upsert("user-1", &record.ref_number, &record).unwrap();
    let stored = repo.fetch("user-1", &id).unwrap().expect("record exists");

    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert_eq!(stored.user_id.as_deref(), Some("user-1"));
    assert!(stored.created_at.is_some());
    assert_eq!(stored.created_at, stored.updated_at);

    // bookkeeping aside, the payload is returned as saved
    let mut comparable = stored.clone();
    comparable.id = None;
    comparable.user_id = None;
    comparable.created_at = None;
    comparable.updated_at = None;
    assert_eq!(comparable, record);
}

#[test]
fn test_resubmission_updates_in_place() {
    let (_file, repo) = repo();
    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();

    let first = RecordBuilder::works("WKS/9").cec(5.0, 4.2).build();
    let second = RecordBuilder::works("WKS/9")
        .lot("L1", 2.0, 1.7, 10.0)
        .lot("L2", 3.0, 2.5, 20.0)
        .build();

    let id1 = repo.upsert_at("user-1", "WKS/9", &first, t1).unwrap();
    let id2 = repo.upsert_at("user-1", " WKS/9 ", &second, t2).unwrap();

    assert_eq!(id1, id2);
    assert_eq!(repo.count_all().unwrap(), 1);

    let stored = repo.fetch("user-1", &id1).unwrap().unwrap();
    assert_eq!(stored.evaluation_methodology, EvaluationMethodology::LotWise);
    assert_eq!(stored.lots.len(), 2);
    assert!(stored.created_at.unwrap().starts_with("2024-03-01"));
    assert!(stored.updated_at.unwrap().starts_with("2024-03-05"));
}

#[test]
fn test_users_are_isolated() {
    let (_file, repo) = repo();
    let record = RecordBuilder::goods("SHARED/1").build();

    let a = repo.upsert("alice", "SHARED/1", &record).unwrap();
    let b = repo.upsert("bob", "SHARED/1", &record).unwrap();
    assert_ne!(a, b);

    assert!(repo.fetch("bob", &a).unwrap().is_none());
    assert!(!repo.delete("bob", &a).unwrap());
    assert_eq!(repo.list("alice").unwrap().len(), 1);
    assert_eq!(repo.list("carol").unwrap().len(), 0);
}

#[test]
fn test_list_newest_first_then_delete() {
    let (_file, repo) = repo();
    for (day, reference) in [(1, "R/1"), (3, "R/3"), (2, "R/2")] {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap();
        let record = RecordBuilder::goods(reference).description(reference).build();
        repo.upsert_at("user-1", reference, &record, at).unwrap();
    }

    let list = repo.list("user-1").unwrap();
    let refs: Vec<&str> = list.iter().map(|s| s.ref_number.as_str()).collect();
    assert_eq!(refs, vec!["R/3", "R/2", "R/1"]);
    assert_eq!(list[0].description.as_deref(), Some("R/3"));

    assert!(repo.delete("user-1", &list[0].id).unwrap());
    assert!(!repo.delete("user-1", &list[0].id).unwrap());
    assert_eq!(repo.list("user-1").unwrap().len(), 2);
}

#[test]
fn test_blank_reference_rejected() {
    let (_file, repo) = repo();
    let record = RecordBuilder::goods("").build();
    let err = repo.upsert("user-1", "   ", &record).unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError(_)));
    assert_eq!(repo.count_all().unwrap(), 0);
}

#[test]
fn test_data_survives_reopen() {
    let (_file, db_path) = test_helpers::create_test_db().unwrap();
    let id = {
        let repo = ProcurementRepository::new(&db_path).unwrap();
        repo.upsert("user-1", "KEEP/1", &RecordBuilder::goods("KEEP/1").build())
            .unwrap()
    };

    let reopened = ProcurementRepository::new(&db_path).unwrap();
    let stored = reopened.fetch("user-1", &id).unwrap().unwrap();
    assert_eq!(stored.ref_number, "KEEP/1");
}
