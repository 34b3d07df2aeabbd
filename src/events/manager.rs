//! Event bus fanning library events out to feeds.

use crossbeam_channel::{bounded, unbounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

use super::types::{FeedConfig, FeedHandle, FeedId, LibraryEvent};

/// Internal feed state.
struct Feed {
    config: FeedConfig,
    sender: Sender<LibraryEvent>,
}

impl Feed {
    /// Try to deliver an event. Returns false if the feed should be detached.
    fn try_send(&self, event: LibraryEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Manages feeds and publishes events to them.
pub struct EventBus {
    /// Attached feeds by ID.
    feeds: RwLock<HashMap<FeedId, Feed>>,
    /// Counter for generating feed IDs.
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            feeds: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Attach a new feed and return its receiving end.
    pub fn watch(&self, config: FeedConfig) -> FeedHandle {
        let id = FeedId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = match config.capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };

        self.feeds.write().insert(id, Feed { config, sender });

        FeedHandle { id, receiver }
    }

    /// Detach a feed. Events already buffered stay readable on the handle.
    pub fn unwatch(&self, id: FeedId) -> bool {
        self.feeds.write().remove(&id).is_some()
    }

    /// Get feed count.
    pub fn feed_count(&self) -> usize {
        self.feeds.read().len()
    }

    /// Deliver an event to every matching feed. Feeds that are full or whose
    /// handle was dropped are detached.
    pub fn publish(&self, event: &LibraryEvent) {
        let mut to_remove = Vec::new();

        {
            let feeds = self.feeds.read();
            for (id, feed) in feeds.iter() {
                if feed.config.filter.matches(event) && !feed.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut feeds = self.feeds.write();
            for id in to_remove {
                if feeds.remove(&id).is_some() {
                    warn!(feed = id.0, "detached event feed that stopped receiving");
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
