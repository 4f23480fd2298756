use yijing_core::db::open_db_in_memory;
use yijing_core::{
    DivinationRecord, DivinationRepository, DivinationType, RepoError, SqliteDivinationRepository,
};

fn record(owner_id: i64, question: &str, now_ms: i64) -> DivinationRecord {
    DivinationRecord::new(
        owner_id,
        DivinationType::Yijing,
        question,
        r#"{"hexagram":1,"changingLines":[3]}"#,
        "analysis",
        now_ms,
    )
}

#[test]
fn create_then_get_round_trips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDivinationRepository::new(&conn);

    let original = record(1, "will it rain", 1_700_000_000_000);
    let id = repo.create_divination(&original).unwrap();
    assert_eq!(id, original.id);

    let loaded = repo.get_divination(id, false).unwrap().unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn list_returns_active_records_of_owner_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDivinationRepository::new(&conn);

    // Identical timestamps must not disturb insertion order.
    let first = record(1, "first", 10);
    let second = record(1, "second", 10);
    let other = record(2, "other owner", 10);
    let third = record(1, "third", 10);
    for item in [&first, &second, &other, &third] {
        repo.create_divination(item).unwrap();
    }
    repo.soft_delete_divination(second.id, 20).unwrap();

    let questions: Vec<String> = repo
        .list_divinations_by_owner(1)
        .unwrap()
        .into_iter()
        .map(|item| item.question)
        .collect();
    assert_eq!(questions, vec!["first", "third"]);
}

#[test]
fn soft_delete_hides_record_unless_included() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDivinationRepository::new(&conn);

    let original = record(3, "hidden", 100);
    repo.create_divination(&original).unwrap();
    repo.soft_delete_divination(original.id, 200).unwrap();

    assert!(repo.get_divination(original.id, false).unwrap().is_none());
    let deleted = repo.get_divination(original.id, true).unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert_eq!(deleted.updated_at, 200);
    assert_eq!(deleted.created_at, 100);
}

#[test]
fn soft_delete_of_missing_record_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDivinationRepository::new(&conn);

    let missing = uuid::Uuid::new_v4();
    let err = repo.soft_delete_divination(missing, 1).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn duplicate_id_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDivinationRepository::new(&conn);

    let original = record(1, "once", 1);
    repo.create_divination(&original).unwrap();
    assert!(repo.create_divination(&original).is_err());
}
