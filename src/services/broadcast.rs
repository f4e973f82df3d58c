//! Best-effort fan-out of an authored message to every registered user.

use anyhow::Result;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::Requester;
use teloxide::types::{ChatId, ParseMode};
use teloxide::Bot;
use tracing::{info, warn};

use crate::database::models::User;

/// The transport throttles message bursts, so the pipeline pauses after
/// every batch of this many sends.
pub const BATCH_SIZE: usize = 10;
/// How long to yield between batches. Suspends only the broadcast future,
/// never the dispatcher.
pub const BATCH_PAUSE: Duration = Duration::from_millis(500);

/// Outbound message transport: send text to a chat id, at-least-once.
pub trait Transport {
    fn send_text(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl Transport for Bot {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

/// Sends `text` to every user in store order and returns the delivered count.
///
/// A failed send is logged and skipped; it never stops the remaining sends.
/// The returned count excludes sends the transport reported as failed.
pub async fn publish<T: Transport + Sync>(transport: &T, users: &[User], text: &str) -> usize {
    let mut delivered = 0usize;
    let mut failed = 0usize;

    for (index, user) in users.iter().enumerate() {
        if index > 0 && index % BATCH_SIZE == 0 {
            tokio::time::sleep(BATCH_PAUSE).await;
        }
        match transport.send_text(user.chat_id, text).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                failed += 1;
                warn!("broadcast send to {} failed: {e}", user.chat_id);
            }
        }
    }

    if failed > 0 {
        warn!(
            "broadcast finished with {failed} failed sends out of {} recipients",
            users.len()
        );
    } else {
        info!("broadcast delivered to {delivered} recipients");
    }

    delivered
}

/// Tells every operator about a process-level event (startup, shutdown).
///
/// Failures are handled per recipient: one unreachable operator never hides
/// the others or an unrelated error.
pub async fn notify_operators<T: Transport + Sync>(
    transport: &T,
    operators: &HashSet<i64>,
    text: &str,
) {
    for &chat_id in operators {
        if let Err(e) = transport.send_text(chat_id, text).await {
            warn!("operator {chat_id} is unreachable: {e}");
        }
    }
}
