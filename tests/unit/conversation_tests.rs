use std::sync::Arc;

use tubetalk::conversation::ConversationLog;
use tubetalk::models::message::MessageAuthor;

#[test]
fn starts_empty() {
    let log = ConversationLog::new();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
    assert!(log.all().is_empty());
}

#[test]
fn preserves_append_order() {
    let log = ConversationLog::new();
    log.append(MessageAuthor::Assistant, "greeting");
    log.append(MessageAuthor::User, "question");
    log.append(MessageAuthor::Assistant, "answer");

    let messages = log.all();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, "greeting");
    assert_eq!(messages[1].content, "question");
    assert_eq!(messages[2].content, "answer");
}

#[test]
fn append_returns_the_stored_message() {
    let log = ConversationLog::new();
    let message = log.append(MessageAuthor::User, "hello");

    let messages = log.all();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], message);
}

#[test]
fn appended_messages_have_unique_ids() {
    let log = ConversationLog::new();
    for _ in 0..10 {
        log.append(MessageAuthor::User, "same content");
    }

    let messages = log.all();
    let mut ids: Vec<_> = messages.iter().map(|m| m.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn concurrent_appends_all_land() {
    let log = Arc::new(ConversationLog::new());
    let mut handles = Vec::new();
    for i in 0..8 {
        let log = Arc::clone(&log);
        handles.push(std::thread::spawn(move || {
            for j in 0..25 {
                log.append(MessageAuthor::User, format!("{i}-{j}"));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("thread joins");
    }
    assert_eq!(log.len(), 200);
}
