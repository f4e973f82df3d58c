use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes message handling per chat id.
///
/// The transport may hand us two updates from the same user concurrently;
/// holding this lock across a handler keeps dialogue transitions and user
/// record writes for one chat strictly ordered, while different chats
/// proceed independently.
#[derive(Clone, Default)]
pub struct UserLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl UserLocks {
    pub async fn acquire(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let slot = {
            let mut map = self.inner.lock().await;
            // an idle entry is referenced only by the map itself; a held or
            // contended one is also referenced by its guard or waiter
            map.retain(|_, lock| Arc::strong_count(lock) > 1);
            map.entry(chat_id).or_default().clone()
        };
        slot.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_chat_is_serialized() {
        let locks = UserLocks::default();
        let guard = locks.acquire(1).await;

        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(1)).await;
        assert!(blocked.is_err(), "second acquire for the same chat must wait");

        drop(guard);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire(1)).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_idle_entries_are_swept() {
        let locks = UserLocks::default();
        drop(locks.acquire(1).await);
        drop(locks.acquire(2).await);

        // acquiring sweeps the two released entries and tracks only chat 3
        let guard = locks.acquire(3).await;
        assert_eq!(locks.tracked().await, 1);
        drop(guard);
    }

    #[tokio::test]
    async fn test_sweep_keeps_held_entries() {
        let locks = UserLocks::default();
        let guard = locks.acquire(1).await;

        drop(locks.acquire(2).await);
        assert_eq!(locks.tracked().await, 2);

        // chat 1 stays serialized across the sweep
        let blocked = tokio::time::timeout(Duration::from_millis(20), locks.acquire(1)).await;
        assert!(blocked.is_err(), "held entry must survive the sweep");
        drop(guard);
    }

    #[tokio::test]
    async fn test_different_chats_do_not_block() {
        let locks = UserLocks::default();
        let _guard = locks.acquire(1).await;

        let other = tokio::time::timeout(Duration::from_millis(20), locks.acquire(2)).await;
        assert!(other.is_ok(), "another chat must not be blocked");
    }
}
