use chrono::Local;

use sqlpilot::session::{recent_window, ChatSession, Role, GREETING};

#[test]
fn test_new_session_starts_with_greeting() {
    let session = ChatSession::new();
    let messages = session.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].content, GREETING);
}

#[test]
fn test_messages_keep_insertion_order() {
    let mut session = ChatSession::new();
    session.push_user("how much is the keyboard");
    session.push_assistant("3500 baht");
    session.push_user("and the mouse?");

    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1].content, "how much is the keyboard");
    assert_eq!(messages[2].content, "3500 baht");
    assert_eq!(messages[3].content, "and the mouse?");
}

#[test]
fn test_recent_window_keeps_the_tail() {
    let mut session = ChatSession::new();
    for i in 0..10 {
        session.push_user(format!("question {}", i));
    }

    let recent = recent_window(session.messages(), 4);
    assert_eq!(recent.len(), 4);
    assert_eq!(recent[0].content, "question 6");
    assert_eq!(recent[3].content, "question 9");
}

#[test]
fn test_recent_window_zero_means_everything() {
    let mut session = ChatSession::new();
    session.push_user("one");
    session.push_user("two");

    assert_eq!(recent_window(session.messages(), 0).len(), 3);
}

#[test]
fn test_recent_window_larger_than_log() {
    let session = ChatSession::new();
    assert_eq!(recent_window(session.messages(), 100).len(), 1);
}

#[test]
fn test_started_at_is_set_at_creation() {
    let before = Local::now();
    let session = ChatSession::new();
    let after = Local::now();

    assert!(session.started_at() >= before);
    assert!(session.started_at() <= after);
}

#[test]
fn test_sessions_get_distinct_ids() {
    let a = ChatSession::new();
    let b = ChatSession::new();
    assert_ne!(a.session_id(), b.session_id());
}
