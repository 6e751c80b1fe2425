//! A minimal publish/subscribe channel.
//!
//! Subscribers are plain closures.  `publish` snapshots the subscriber list
//! before calling anyone, so a subscriber may subscribe or unsubscribe from
//! inside its own callback without deadlocking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A multi-subscriber notification channel for values of type `T`.
///
/// Cloning an `Observable` yields another handle to the same subscriber list.
pub struct Observable<T> {
    subscribers: Arc<Mutex<Vec<(SubscriptionId, Subscriber<T>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Observable<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Calls every subscriber, in subscription order.
    pub fn publish(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self.lock().iter().map(|(_, s)| Arc::clone(s)).collect();
        for subscriber in snapshot {
            subscriber(value);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    // A panicking subscriber runs outside the lock, so poisoning only means a
    // panic during push/retain; the Vec is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Subscriber<T>)>> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers_in_order() {
        let channel = Observable::<u32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s1 = Arc::clone(&seen);
        channel.subscribe(move |v| s1.lock().unwrap().push(("first", *v)));
        let s2 = Arc::clone(&seen);
        channel.subscribe(move |v| s2.lock().unwrap().push(("second", *v)));

        channel.publish(&7);

        assert_eq!(*seen.lock().unwrap(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let channel = Observable::<()>::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let id = channel.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        channel.publish(&());
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id), "second unsubscribe is a no-op");
        channel.publish(&());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let channel = Observable::<bool>::new();
        let other = channel.clone();
        let seen = Arc::new(Mutex::new(None));
        let s = Arc::clone(&seen);
        channel.subscribe(move |v| *s.lock().unwrap() = Some(*v));

        other.publish(&false);

        assert_eq!(*seen.lock().unwrap(), Some(false));
    }

    #[test]
    fn test_subscriber_may_subscribe_during_publish() {
        let channel = Observable::<u8>::new();
        let inner = channel.clone();
        channel.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        channel.publish(&1);

        assert_eq!(channel.subscriber_count(), 2);
    }
}
