use todo_server::task::{TaskStore, TaskUpdate};

#[test]
fn can_create_then_get_identical_task() {
    let store = TaskStore::new();

    let created = store.create("Round trip".to_string());
    let fetched = store.get_by_id(created.id).unwrap();

    assert_eq!(fetched, created);
    assert_eq!(created.id, 4);
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);
}

#[test]
fn can_report_absent_ids_without_mutating() {
    let store = TaskStore::new();
    let before = store.list_all();

    assert_eq!(store.get_by_id(42), None);
    assert_eq!(
        store.update(
            42,
            TaskUpdate {
                title: Some("nope".to_string()),
                completed: Some(true),
            }
        ),
        None
    );
    assert!(!store.delete(42));

    assert_eq!(store.list_all(), before);
}

#[test]
fn can_report_second_delete_as_absent() {
    let store = TaskStore::new();

    assert!(store.delete(2));
    assert!(!store.delete(2));
    assert_eq!(store.get_by_id(2), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn can_merge_updates_field_by_field() {
    let store = TaskStore::new();
    let original = store.get_by_id(3).unwrap();

    let completed = store
        .update(
            3,
            TaskUpdate {
                title: None,
                completed: Some(true),
            },
        )
        .unwrap();
    assert_eq!(completed.title, original.title);
    assert!(completed.completed);
    assert!(completed.updated_at >= original.updated_at);

    let renamed = store
        .update(
            3,
            TaskUpdate {
                title: Some("x".to_string()),
                completed: None,
            },
        )
        .unwrap();
    assert_eq!(renamed.title, "x");
    assert!(renamed.completed);
    assert!(renamed.updated_at >= completed.updated_at);
    assert_eq!(renamed.created_at, original.created_at);
    assert_eq!(renamed.id, original.id);
}

#[test]
fn can_run_seed_scenario() {
    let store = TaskStore::new();

    let milk = store.create("Buy milk".to_string());
    assert_eq!((milk.id, milk.title.as_str(), milk.completed), (4, "Buy milk", false));

    let done = store
        .update(
            4,
            TaskUpdate {
                title: None,
                completed: Some(true),
            },
        )
        .unwrap();
    assert_eq!((done.id, done.title.as_str(), done.completed), (4, "Buy milk", true));

    let before = store.len();
    assert!(store.delete(2));
    assert_eq!(store.get_by_id(2), None);
    assert_eq!(store.len(), before - 1);
}
