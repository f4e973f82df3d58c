use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::sync::Mutex;
use timetable_bot::database::models::User;
use timetable_bot::services::broadcast::{notify_operators, publish, Transport, BATCH_PAUSE};

/// Records every successful send; fails synchronously for listed chat ids.
#[derive(Default)]
struct MockTransport {
    sent: Mutex<Vec<i64>>,
    fail_for: HashSet<i64>,
}

impl Transport for MockTransport {
    async fn send_text(&self, chat_id: i64, _text: &str) -> Result<()> {
        if self.fail_for.contains(&chat_id) {
            return Err(anyhow!("synthetic transport failure"));
        }
        self.sent.lock().unwrap().push(chat_id);
        Ok(())
    }
}

fn users(count: i64) -> Vec<User> {
    (1..=count)
        .map(|chat_id| User {
            chat_id,
            group_name: "БПИ19-02".to_string(),
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            updated_at: "2024-01-01T00:00:00+00:00".to_string(),
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_delivered_count_and_batch_pauses_for_23_users() {
    let transport = MockTransport::default();
    let recipients = users(23);

    let started = tokio::time::Instant::now();
    let delivered = publish(&transport, &recipients, "hello").await;
    let elapsed = started.elapsed();

    assert_eq!(delivered, 23);
    // ceil(23 / 10) - 1 = 2 inter-batch pauses, and no pause after the tail
    assert!(elapsed >= 2 * BATCH_PAUSE, "expected at least two pauses");
    assert!(elapsed < 3 * BATCH_PAUSE, "expected no third pause");
}

#[tokio::test(start_paused = true)]
async fn test_no_pause_for_a_single_batch() {
    let transport = MockTransport::default();
    let recipients = users(10);

    let started = tokio::time::Instant::now();
    let delivered = publish(&transport, &recipients, "hello").await;

    assert_eq!(delivered, 10);
    assert_eq!(started.elapsed(), std::time::Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_store_order_is_preserved() {
    let transport = MockTransport::default();
    let recipients = users(15);

    publish(&transport, &recipients, "hello").await;

    let sent = transport.sent.lock().unwrap();
    let expected: Vec<i64> = (1..=15).collect();
    assert_eq!(*sent, expected);
}

#[tokio::test(start_paused = true)]
async fn test_failed_sends_are_skipped_not_fatal() {
    let transport = MockTransport {
        sent: Mutex::new(Vec::new()),
        fail_for: [3, 11, 22].into_iter().collect(),
    };
    let recipients = users(23);

    let delivered = publish(&transport, &recipients, "hello").await;

    // synchronously reported failures are excluded from the count
    assert_eq!(delivered, 20);
    // and the run continued past each failure to the very last user
    let sent = transport.sent.lock().unwrap();
    assert!(sent.contains(&23));
    assert!(!sent.contains(&11));
}

#[tokio::test]
async fn test_notify_operators_survives_unreachable_recipient() {
    let transport = MockTransport {
        sent: Mutex::new(Vec::new()),
        fail_for: [1].into_iter().collect(),
    };
    let operators: HashSet<i64> = [1, 2].into_iter().collect();

    notify_operators(&transport, &operators, "<b>Bot started!</b>").await;

    let sent = transport.sent.lock().unwrap();
    assert_eq!(*sent, vec![2]);
}
