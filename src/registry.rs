//! Subscription registry: who gets price notifications, and in what order.

use parking_lot::RwLock;

/// Ordered set of subscribed user names.
///
/// Insertion order is notification order. The registry only stores names;
/// the user records themselves live in the entity store.
pub struct SubscriptionRegistry {
    subscribers: RwLock<Vec<String>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Append a user. Returns false if already present.
    pub fn add(&self, name: &str) -> bool {
        let mut subs = self.subscribers.write();
        if subs.iter().any(|s| s == name) {
            return false;
        }
        subs.push(name.to_string());
        true
    }

    /// Remove a user. Returns false if absent.
    pub fn remove(&self, name: &str) -> bool {
        let mut subs = self.subscribers.write();
        match subs.iter().position(|s| s == name) {
            Some(pos) => {
                subs.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.subscribers.read().iter().any(|s| s == name)
    }

    /// Snapshot in notification order.
    pub fn subscribers(&self) -> Vec<String> {
        self.subscribers.read().clone()
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

impl Default for SubscriptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
