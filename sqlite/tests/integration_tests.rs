//! Integration tests for the library-sqlite crate.

use library_core::{BookRecord, BookStatus, BookUpdate, NO_CARD};
use library_sqlite::{LibraryStore, StoreError, migration};
use rusqlite::Connection;

/// Creates an available book with a predictable title and author.
fn available(id: &str) -> BookRecord {
    BookRecord::new(
        format!("Title {id}"),
        id,
        format!("Author {id}"),
        BookStatus::Available,
    )
    .unwrap()
}

/// Creates a book issued to the given card.
fn issued(id: &str, card: &str) -> BookRecord {
    BookRecord::new(
        format!("Title {id}"),
        id,
        format!("Author {id}"),
        BookStatus::issued(card).unwrap(),
    )
    .unwrap()
}

fn setup_store() -> LibraryStore {
    LibraryStore::open_in_memory().unwrap()
}

// =============================================================================
// Insert / list
// =============================================================================

#[test]
fn test_insert_then_list_returns_record_intact() {
    let store = setup_store();
    let book = issued("B-100", "C-7");

    store.insert(&book).unwrap();

    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], book);
    assert_eq!(all[0].card_id(), "C-7");
}

#[test]
fn test_duplicate_insert_keeps_first_record() {
    let store = setup_store();
    let first = available("B-1");
    let mut second = issued("B-1", "C-2");
    second.name = "Another title".to_string();

    store.insert(&first).unwrap();
    let err = store.insert(&second).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey(ref id) if id == "B-1"));

    assert_eq!(store.list_all().unwrap(), vec![first]);
}

#[test]
fn test_duplicate_names_and_authors_are_allowed() {
    let store = setup_store();
    let a = BookRecord::new("Emma", "B-1", "Jane Austen", BookStatus::Available).unwrap();
    let b = BookRecord::new("Emma", "B-2", "Jane Austen", BookStatus::Available).unwrap();
    store.insert(&a).unwrap();
    store.insert(&b).unwrap();
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_available_record_stores_placeholder_card() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();

    let card: String = store
        .connection()
        .query_row("SELECT CARD_ID FROM Library WHERE BK_ID = 'B-1'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(card, NO_CARD);
}

// =============================================================================
// Update / status
// =============================================================================

#[test]
fn test_update_changes_everything_but_id() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();

    let update = BookUpdate::new(
        "Persuasion",
        "J. Austen",
        BookStatus::issued("C-9").unwrap(),
    )
    .unwrap();
    store.update("B-1", &update).unwrap();

    let loaded = store.get("B-1").unwrap().unwrap();
    assert_eq!(loaded.id, "B-1");
    assert_eq!(loaded.name, "Persuasion");
    assert_eq!(loaded.author, "J. Austen");
    assert_eq!(loaded.status, BookStatus::issued("C-9").unwrap());
}

#[test]
fn test_issue_then_return_resets_card() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();

    store
        .set_status("B-1", &BookStatus::issued("C-42").unwrap())
        .unwrap();
    let loaded = store.get("B-1").unwrap().unwrap();
    assert!(loaded.status.is_issued());
    assert_eq!(loaded.card_id(), "C-42");

    store.set_status("B-1", &BookStatus::Available).unwrap();
    let loaded = store.get("B-1").unwrap().unwrap();
    assert_eq!(loaded.status, BookStatus::Available);
    assert_eq!(loaded.card_id(), NO_CARD);
    assert_eq!(loaded.name, "Title B-1");
}

#[test]
fn test_status_counts_issued_books() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();
    store.insert(&issued("B-2", "C-1")).unwrap();

    let status = store.status().unwrap();
    assert!(status.table_exists);
    assert_eq!(status.record_count, 2);
    assert_eq!(status.issued_count, 1);
    assert_eq!(status.available_count(), 1);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_only_record_then_delete_all_on_empty_store() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();

    store.delete_one("B-1").unwrap();
    assert!(store.list_all().unwrap().is_empty());

    assert_eq!(store.delete_all().unwrap(), 0);
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn test_delete_all_removes_everything() {
    let store = setup_store();
    for id in ["B-1", "B-2", "B-3"] {
        store.insert(&available(id)).unwrap();
    }
    assert_eq!(store.delete_all().unwrap(), 3);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_deleted_id_can_be_reused() {
    let store = setup_store();
    store.insert(&available("B-1")).unwrap();
    store.delete_one("B-1").unwrap();
    store.insert(&issued("B-1", "C-1")).unwrap();
    assert!(store.get("B-1").unwrap().unwrap().status.is_issued());
}

// =============================================================================
// Durability
// =============================================================================

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.db");

    let store = LibraryStore::open(&path).unwrap();
    store.insert(&available("B-1")).unwrap();
    store.insert(&issued("B-2", "C-5")).unwrap();
    store.close().unwrap();

    let reopened = LibraryStore::open(&path).unwrap();
    let all = reopened.list_all().unwrap();
    assert_eq!(all, vec![available("B-1"), issued("B-2", "C-5")]);
}

#[test]
fn test_opens_database_created_with_legacy_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.db");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE Library (BK_NAME TEXT, BK_ID TEXT PRIMARY KEY NOT NULL, \
             AUTHOR_NAME TEXT, BK_STATUS TEXT, CARD_ID TEXT);
             INSERT INTO Library VALUES ('Dune', 'B-7', 'Frank Herbert', 'Issued', 'C-3');",
        )
        .unwrap();
    }

    let store = LibraryStore::open(&path).unwrap();
    let book = store.get("B-7").unwrap().unwrap();
    assert_eq!(book.author, "Frank Herbert");
    assert_eq!(book.card_id(), "C-3");
}

#[test]
fn test_migration_down_then_reopen_recreates_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.db");

    let store = LibraryStore::open(&path).unwrap();
    store.insert(&available("B-1")).unwrap();
    store.close().unwrap();

    let mut conn = Connection::open(&path).unwrap();
    migration::down(&mut conn).unwrap();
    assert!(!migration::status(&conn).unwrap().table_exists);
    drop(conn);

    let store = LibraryStore::open(&path).unwrap();
    assert!(store.status().unwrap().table_exists);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_unvalidated_rows_stay_listable_and_writable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.db");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE Library (BK_NAME TEXT, BK_ID TEXT PRIMARY KEY NOT NULL, \
             AUTHOR_NAME TEXT, BK_STATUS TEXT, CARD_ID TEXT);
             INSERT INTO Library VALUES ('Emma', 'B1', 'Jane Austen', 'Available', 'N/A');
             INSERT INTO Library VALUES ('', 'B2', 'Anon', 'Available', 'N/A');
             INSERT INTO Library VALUES ('Dune', ' B3', 'Frank Herbert', 'Issued', 'C-3');
             INSERT INTO Library VALUES ('Lost', 'B4', 'Nobody', 'Missing', 'N/A');",
        )
        .unwrap();
    }

    let store = LibraryStore::open(&path).unwrap();
    let all = store.list_all().unwrap();
    let ids: Vec<&str> = all.iter().map(|book| book.id.as_str()).collect();
    assert_eq!(ids, vec!["B1", "B2", " B3"]);
    assert!(all[1].name.is_empty());

    let update = BookUpdate::new("Persuasion", "Jane Austen", BookStatus::Available).unwrap();
    store.update("B2", &update).unwrap();
    store.set_status(" B3", &BookStatus::Available).unwrap();
    assert_eq!(store.get(" B3").unwrap().unwrap().card_id(), NO_CARD);
    store.delete_one(" B3").unwrap();

    assert!(matches!(store.get("B4"), Err(StoreError::Conversion(_))));
    assert_eq!(store.delete_all().unwrap(), 3);
}
