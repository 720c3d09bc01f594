use monthnote_core::db::open_db_in_memory;
use monthnote_core::{
    CategoryRef, MonthKey, NoteService, RevisionHistoryProvider, SqliteNoteRepository,
};

fn month(value: &str) -> MonthKey {
    MonthKey::parse(value).unwrap()
}

fn dining() -> CategoryRef {
    CategoryRef::category("cat-dining", "Dining Out", "grp-fun", "Fun")
}

#[test]
fn history_lists_every_saved_version_ascending() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    // Saved out of order on purpose.
    service.save_note(&dining(), &month("2025-06"), "june cut").unwrap();
    service.save_note(&dining(), &month("2025-01"), "baseline").unwrap();
    service.save_note(&dining(), &month("2025-03"), "spring bump").unwrap();

    let provider = RevisionHistoryProvider::new(&notes);
    let history = provider.history(&dining().entity_key()).unwrap();

    let months: Vec<_> = history.iter().map(|v| v.month.as_str().to_string()).collect();
    assert_eq!(months, vec!["2025-01", "2025-03", "2025-06"]);
    assert_eq!(history[0].content, "baseline");
}

#[test]
fn deleted_versions_are_excluded() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    service.save_note(&dining(), &month("2025-01"), "keep").unwrap();
    service.save_note(&dining(), &month("2025-02"), "drop").unwrap();
    service.delete_note(&dining().entity_key(), &month("2025-02")).unwrap();

    let provider = RevisionHistoryProvider::new(&notes);
    let history = provider.history(&dining().entity_key()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].month, month("2025-01"));
}

#[test]
fn previews_are_markdown_stripped() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    service
        .save_note(
            &dining(),
            &month("2025-01"),
            "# Plan\n**Stop** eating [out](https://example.com) so much",
        )
        .unwrap();

    let provider = RevisionHistoryProvider::new(&notes);
    let history = provider.history(&dining().entity_key()).unwrap();
    let preview = history[0].content_preview.as_deref().unwrap();
    assert!(!preview.contains('#'));
    assert!(!preview.contains('*'));
    assert!(preview.contains("Stop"));
    assert!(preview.contains("out"));
}

#[test]
fn general_history_is_independent_of_entity_history() {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::try_new(&conn).unwrap();
    let service = NoteService::new(SqliteNoteRepository::try_new(&conn).unwrap());

    service.save_general_note(&month("2025-02"), "general feb").unwrap();
    service.save_note(&dining(), &month("2025-01"), "entity jan").unwrap();

    let provider = RevisionHistoryProvider::new(&notes);
    let general = provider.general_history().unwrap();
    assert_eq!(general.len(), 1);
    assert_eq!(general[0].content, "general feb");

    let entity = provider.history(&dining().entity_key()).unwrap();
    assert_eq!(entity.len(), 1);
    assert_eq!(entity[0].content, "entity jan");
}
