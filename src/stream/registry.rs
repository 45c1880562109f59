use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Set of subscribers with a live stream session.
#[derive(Debug, Clone, Default)]
pub struct Subscribers {
    inner: Arc<Mutex<HashMap<Uuid, DateTime<Utc>>>>,
}

impl Subscribers {
    /// Registers `id` until the returned guard is dropped.
    pub fn register(&self, id: Uuid) -> SubscriberGuard {
        self.lock().insert(id, Utc::now());
        log::info!("Subscriber {} connected ({} active)", id, self.len());
        SubscriberGuard {
            id,
            subscribers: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn remove(&self, id: &Uuid) {
        if let Some(since) = self.lock().remove(id) {
            log::info!(
                "Subscriber {} removed after {}s",
                id,
                (Utc::now() - since).num_seconds()
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, DateTime<Utc>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Debug)]
pub struct SubscriberGuard {
    id: Uuid,
    subscribers: Subscribers,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.subscribers.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_unregisters_on_drop() {
        let subscribers = Subscribers::default();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let guard = subscribers.register(first);
        let other = subscribers.register(second);
        assert_eq!(subscribers.len(), 2);

        drop(guard);
        assert_eq!(subscribers.len(), 1);
        assert!(!subscribers.lock().contains_key(&first));
        assert!(subscribers.lock().contains_key(&second));

        drop(other);
        assert_eq!(subscribers.len(), 0);
    }
}
