//! Full-snapshot push subscription

use std::sync::Arc;
use tokio::sync::watch;

/// Receives complete snapshots of one record set.
///
/// The first `next()` yields the current snapshot immediately; later calls
/// wait for the next change. Intermediate snapshots may be coalesced, which is
/// harmless because every snapshot is complete. Dropping the subscription
/// unsubscribes.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: watch::Receiver<Arc<Vec<T>>>,
    primed: bool,
}

impl<T> Subscription<T> {
    pub fn new(rx: watch::Receiver<Arc<Vec<T>>>) -> Self {
        Self { rx, primed: false }
    }

    /// Next complete snapshot, `None` once the publisher is gone
    pub async fn next(&mut self) -> Option<Arc<Vec<T>>> {
        if !self.primed {
            self.primed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Latest snapshot without waiting, marking it as seen
    pub fn latest(&mut self) -> Arc<Vec<T>> {
        self.primed = true;
        self.rx.borrow_and_update().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_next_is_immediate_then_waits_for_change() {
        let (tx, rx) = watch::channel(Arc::new(vec![1, 2]));
        let mut sub = Subscription::new(rx);

        assert_eq!(*sub.next().await.unwrap(), vec![1, 2]);

        tx.send_replace(Arc::new(vec![3]));
        assert_eq!(*sub.next().await.unwrap(), vec![3]);

        drop(tx);
        assert!(sub.next().await.is_none());
    }

    #[tokio::test]
    async fn test_coalesces_to_latest() {
        let (tx, rx) = watch::channel(Arc::new(vec![0]));
        let mut sub = Subscription::new(rx);
        sub.next().await;

        tx.send_replace(Arc::new(vec![1]));
        tx.send_replace(Arc::new(vec![2]));
        assert_eq!(*sub.next().await.unwrap(), vec![2]);
    }
}
