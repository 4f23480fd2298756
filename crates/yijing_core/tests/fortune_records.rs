use chrono::NaiveDate;
use yijing_core::db::open_db_in_memory;
use yijing_core::{
    FortuneRecord, FortuneRepository, FortuneScores, RepoError, SqliteFortuneRepository,
};

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn scores(base: u8) -> FortuneScores {
    FortuneScores {
        overall: base,
        love: base,
        career: base,
        health: base,
        wealth: base,
    }
}

fn fortune(owner_id: i64, day: &str, base: u8) -> FortuneRecord {
    FortuneRecord::new(owner_id, date(day), scores(base), "text", "text", 1)
}

#[test]
fn create_then_find_round_trips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFortuneRepository::new(&conn);

    let original = fortune(42, "2024-01-15", 77);
    let stored = repo.create_fortune(&original).unwrap();
    assert_eq!(stored, original);

    let found = repo.find_fortune(42, date("2024-01-15")).unwrap().unwrap();
    assert_eq!(found, original);
    assert!(repo.find_fortune(42, date("2024-01-16")).unwrap().is_none());
    assert!(repo.find_fortune(7, date("2024-01-15")).unwrap().is_none());
}

#[test]
fn second_insert_for_same_day_returns_first_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFortuneRepository::new(&conn);

    let first = fortune(42, "2024-01-15", 10);
    let second = fortune(42, "2024-01-15", 90);
    repo.create_fortune(&first).unwrap();
    let stored = repo.create_fortune(&second).unwrap();

    assert_eq!(stored.id, first.id);
    assert_eq!(stored.scores, first.scores);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM fortunes;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn out_of_range_score_is_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFortuneRepository::new(&conn);

    let mut invalid = fortune(42, "2024-01-15", 50);
    invalid.scores.wealth = 101;

    let err = repo.create_fortune(&invalid).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.find_fortune(42, date("2024-01-15")).unwrap().is_none());
}

#[test]
fn range_is_inclusive_newest_first_and_owner_scoped() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFortuneRepository::new(&conn);

    for day in ["2024-01-15", "2023-12-31", "2024-01-01", "2024-02-01", "2024-01-31"] {
        repo.create_fortune(&fortune(42, day, 50)).unwrap();
    }
    repo.create_fortune(&fortune(7, "2024-01-10", 50)).unwrap();

    let dates: Vec<NaiveDate> = repo
        .list_fortunes_in_range(42, date("2024-01-01"), date("2024-01-31"))
        .unwrap()
        .into_iter()
        .map(|record| record.date)
        .collect();
    assert_eq!(
        dates,
        vec![date("2024-01-31"), date("2024-01-15"), date("2024-01-01")]
    );
}

#[test]
fn inverted_range_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteFortuneRepository::new(&conn);
    repo.create_fortune(&fortune(42, "2024-01-15", 50)).unwrap();

    let records = repo
        .list_fortunes_in_range(42, date("2024-01-31"), date("2024-01-01"))
        .unwrap();
    assert!(records.is_empty());
}
