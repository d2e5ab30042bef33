use contactbook_core::db::{migrations::latest_version, open_db};
use contactbook_core::{EventBus, Logic, RecordStore, Session, SqliteSnapshotStorage};

const ADD_JOHN: &str = "add n/John Doe p/98765432 h/65551234 e/john@example.com \
se/john@sch.edu a/123 Clementi Rd w/john.com b/01/01/1990 t/friends t/owesMoney";
const ADD_JANE: &str = "add n/Jane Roe p/91234567 e/jane@example.com \
se/jane@sch.edu a/5 Kent Ridge w/jane.org b/02/03/1995";

fn open_logic(storage: &mut SqliteSnapshotStorage) -> Logic {
    let bus = EventBus::new();
    let store = RecordStore::from_snapshot(bus.clone(), storage.load().unwrap()).unwrap();
    storage.attach(&bus);
    Logic::new(Session::new(store, bus, vec!["DarkTheme".to_string()]))
}

#[test]
fn snapshot_round_trips_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contactbook.sqlite3");

    let written = {
        let mut storage = SqliteSnapshotStorage::open(&path).unwrap();
        let mut logic = open_logic(&mut storage);
        for line in [
            ADD_JOHN,
            ADD_JANE,
            "fav 2",
            "addevent n/ZoukOut d/12/12/2018 a/Sentosa, Siloso Beach",
        ] {
            logic.process_input(line).unwrap();
            assert!(storage.flush_if_dirty(logic.session().store()).unwrap());
        }
        logic.session().store().snapshot()
    };

    let mut storage = SqliteSnapshotStorage::open(&path).unwrap();
    let reloaded = storage.load().unwrap();
    assert_eq!(reloaded, written);

    let john = &reloaded.people[0];
    assert_eq!(john.tags.len(), 2);
    assert_eq!(john.home_number.as_ref().map(|home| home.as_str()), Some("65551234"));
    assert!(!john.favourite);
    let jane = &reloaded.people[1];
    assert!(jane.home_number.is_none());
    assert!(jane.favourite);
    assert_eq!(reloaded.events.len(), 1);

    let logic = open_logic(&mut storage);
    assert_eq!(logic.session().store().people().len(), 2);
}

#[test]
fn failed_and_read_only_commands_leave_storage_clean() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = SqliteSnapshotStorage::open(dir.path().join("book.sqlite3")).unwrap();
    let mut logic = open_logic(&mut storage);

    logic.process_input(ADD_JOHN).unwrap();
    storage.flush_if_dirty(logic.session().store()).unwrap();

    for line in ["list", "find john", "switchtheme 1", "history"] {
        logic.process_input(line).unwrap();
        assert!(!storage.flush_if_dirty(logic.session().store()).unwrap());
    }
    logic.process_input(ADD_JOHN).unwrap_err();
    assert_eq!(storage.dirty_revision(), None);
}

#[test]
fn delete_order_is_preserved_in_positions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.sqlite3");
    {
        let mut storage = SqliteSnapshotStorage::open(&path).unwrap();
        let mut logic = open_logic(&mut storage);
        logic.process_input(ADD_JOHN).unwrap();
        logic.process_input(ADD_JANE).unwrap();
        logic.process_input("delete 1").unwrap();
        storage.flush_if_dirty(logic.session().store()).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    let names: Vec<String> = conn
        .prepare("SELECT name FROM people ORDER BY position;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, vec!["Jane Roe".to_string()]);
}

#[test]
fn failed_flush_keeps_changes_pending_for_retry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.sqlite3");
    let mut storage = SqliteSnapshotStorage::open(&path).unwrap();
    let mut logic = open_logic(&mut storage);

    logic.process_input(ADD_JOHN).unwrap();
    let sabotage = open_db(&path).unwrap();
    sabotage.execute_batch("DROP TABLE events;").unwrap();

    assert!(storage.flush_if_dirty(logic.session().store()).is_err());
    assert_eq!(storage.dirty_revision(), Some(1));

    sabotage
        .execute_batch(
            "CREATE TABLE events (
                uuid TEXT PRIMARY KEY NOT NULL,
                position INTEGER NOT NULL,
                name TEXT NOT NULL,
                date TEXT NOT NULL,
                address TEXT NOT NULL
            );",
        )
        .unwrap();
    assert!(storage.flush_if_dirty(logic.session().store()).unwrap());
    assert_eq!(storage.load().unwrap().people.len(), 1);
}
