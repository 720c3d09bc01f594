use monthnote_core::EditorArbitrator;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn opening_from_idle_succeeds() {
    let mut arbitrator = EditorArbitrator::new();
    assert!(arbitrator.active_editor().is_none());

    assert!(arbitrator.request_open("note-a", Box::new(|| Ok(()))));
    assert_eq!(arbitrator.active_editor(), Some("note-a"));
}

#[test]
fn reopening_the_same_editor_is_a_noop_success() {
    let mut arbitrator = EditorArbitrator::new();
    let save_calls = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&save_calls);
    assert!(arbitrator.request_open(
        "note-a",
        Box::new(move || {
            *counter.borrow_mut() += 1;
            Ok(())
        })
    ));
    assert!(arbitrator.request_open("note-a", Box::new(|| Ok(()))));

    // The original editor stays open and its save was never forced.
    assert_eq!(arbitrator.active_editor(), Some("note-a"));
    assert_eq!(*save_calls.borrow(), 0);
}

#[test]
fn opening_another_editor_saves_and_closes_the_previous_one() {
    let mut arbitrator = EditorArbitrator::new();
    let save_calls = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&save_calls);
    assert!(arbitrator.request_open(
        "note-a",
        Box::new(move || {
            *counter.borrow_mut() += 1;
            Ok(())
        })
    ));

    assert!(arbitrator.request_open("note-b", Box::new(|| Ok(()))));
    assert_eq!(*save_calls.borrow(), 1);
    assert_eq!(arbitrator.active_editor(), Some("note-b"));
}

#[test]
fn failed_save_blocks_the_new_editor_and_keeps_the_old_one() {
    let mut arbitrator = EditorArbitrator::new();

    assert!(arbitrator.request_open(
        "note-a",
        Box::new(|| Err("storage unavailable".to_string()))
    ));

    // B must not open; A stays open with its content intact for retry.
    assert!(!arbitrator.request_open("note-b", Box::new(|| Ok(()))));
    assert_eq!(arbitrator.active_editor(), Some("note-a"));
}

#[test]
fn save_can_succeed_on_retry_after_a_failure() {
    let mut arbitrator = EditorArbitrator::new();
    let attempts = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&attempts);
    assert!(arbitrator.request_open(
        "note-a",
        Box::new(move || {
            *counter.borrow_mut() += 1;
            if *counter.borrow() == 1 {
                Err("transient failure".to_string())
            } else {
                Ok(())
            }
        })
    ));

    assert!(!arbitrator.request_open("note-b", Box::new(|| Ok(()))));
    assert!(arbitrator.request_open("note-b", Box::new(|| Ok(()))));
    assert_eq!(*attempts.borrow(), 2);
    assert_eq!(arbitrator.active_editor(), Some("note-b"));
}

#[test]
fn close_editor_returns_to_idle_unconditionally() {
    let mut arbitrator = EditorArbitrator::new();

    arbitrator.close_editor();
    assert!(arbitrator.active_editor().is_none());

    assert!(arbitrator.request_open("note-a", Box::new(|| Ok(()))));
    arbitrator.close_editor();
    assert!(arbitrator.active_editor().is_none());

    // A fresh editor opens without triggering the discarded save.
    assert!(arbitrator.request_open("note-b", Box::new(|| Err("never called".to_string()))));
    assert_eq!(arbitrator.active_editor(), Some("note-b"));
}
