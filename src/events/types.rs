//! Event and feed types.

use crate::types::{Price, Tier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for an event feed.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Max buffered events before the feed is detached (None = unbounded).
    /// Default: 1024
    pub capacity: Option<usize>,

    /// Which events this feed receives.
    pub filter: EventFilter,
}

impl FeedConfig {
    /// Unbounded feed with the given filter.
    pub fn unbounded(filter: EventFilter) -> Self {
        Self {
            capacity: None,
            filter,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: Some(1024),
            filter: EventFilter::all(),
        }
    }
}

/// Filter criteria for feeds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Reading and listening.
    pub include_actions: bool,

    /// Price-change notifications.
    pub include_notifications: bool,

    /// Shown to-read lists and playlists.
    pub include_listings: bool,

    /// Creations, subscription changes, price changes.
    pub include_lifecycle: bool,
}

impl EventFilter {
    /// Everything the command-line output shows.
    pub fn output() -> Self {
        Self {
            include_actions: true,
            include_notifications: true,
            include_listings: true,
            include_lifecycle: false,
        }
    }

    /// Price notifications only.
    pub fn notifications() -> Self {
        Self {
            include_notifications: true,
            ..Default::default()
        }
    }

    /// Lifecycle events only.
    pub fn lifecycle() -> Self {
        Self {
            include_lifecycle: true,
            ..Default::default()
        }
    }

    /// Everything.
    pub fn all() -> Self {
        Self {
            include_lifecycle: true,
            ..Self::output()
        }
    }

    pub fn matches(&self, event: &LibraryEvent) -> bool {
        match event.kind() {
            EventKind::Action => self.include_actions,
            EventKind::Notification => self.include_notifications,
            EventKind::Listing => self.include_listings,
            EventKind::Lifecycle => self.include_lifecycle,
        }
    }
}

/// Coarse grouping used by filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Action,
    Notification,
    Listing,
    Lifecycle,
}

/// Events published by the library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LibraryEvent {
    // --- Actions ---
    Reading {
        user: String,
        title: String,
        author: String,
    },

    Listening {
        user: String,
        title: String,
        author: String,
    },

    // --- Notifications ---
    /// One per subscriber, in subscription order.
    PriceNotified {
        user: String,
        title: String,
        price: Price,
    },

    // --- Listings ---
    ReadListShown {
        user: String,
        titles: Vec<String>,
    },

    PlaylistShown {
        user: String,
        titles: Vec<String>,
    },

    // --- Lifecycle ---
    UserCreated {
        user: String,
        tier: Tier,
    },

    BookCreated {
        title: String,
        author: String,
        price: Price,
    },

    Subscribed {
        user: String,
    },

    Unsubscribed {
        user: String,
    },

    /// Published before the notifications it causes.
    PriceChanged {
        title: String,
        old: Price,
        new: Price,
    },
}

impl LibraryEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LibraryEvent::Reading { .. } | LibraryEvent::Listening { .. } => EventKind::Action,
            LibraryEvent::PriceNotified { .. } => EventKind::Notification,
            LibraryEvent::ReadListShown { .. } | LibraryEvent::PlaylistShown { .. } => {
                EventKind::Listing
            }
            LibraryEvent::UserCreated { .. }
            | LibraryEvent::BookCreated { .. }
            | LibraryEvent::Subscribed { .. }
            | LibraryEvent::Unsubscribed { .. }
            | LibraryEvent::PriceChanged { .. } => EventKind::Lifecycle,
        }
    }
}

/// The text line for each event.
impl fmt::Display for LibraryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryEvent::Reading {
                user,
                title,
                author,
            } => write!(f, "{user} reading {title} by {author}"),
            LibraryEvent::Listening {
                user,
                title,
                author,
            } => write!(f, "{user} listening {title} by {author}"),
            LibraryEvent::PriceNotified { user, title, price } => {
                write!(f, "{user} notified about price update for {title} to {price}")
            }
            LibraryEvent::ReadListShown { user, titles } => {
                write!(f, "{user} to-read list: [{}]", titles.join(", "))
            }
            LibraryEvent::PlaylistShown { user, titles } => {
                write!(f, "{user} playlist: [{}]", titles.join(", "))
            }
            LibraryEvent::UserCreated { user, tier } => write!(f, "{tier} user {user} created"),
            LibraryEvent::BookCreated {
                title,
                author,
                price,
            } => write!(f, "book {title} by {author} created at {price}"),
            LibraryEvent::Subscribed { user } => write!(f, "{user} subscribed"),
            LibraryEvent::Unsubscribed { user } => write!(f, "{user} unsubscribed"),
            LibraryEvent::PriceChanged { title, old, new } => {
                write!(f, "price of {title} changed from {old} to {new}")
            }
        }
    }
}

/// Unique identifier for a feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FeedId(pub u64);

/// Handle to receive events from a feed.
pub struct FeedHandle {
    pub id: FeedId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<LibraryEvent>,
}

impl FeedHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<LibraryEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<LibraryEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<LibraryEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Everything buffered right now, oldest first.
    pub fn drain(&self) -> Vec<LibraryEvent> {
        self.receiver.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let reading = LibraryEvent::Reading {
            user: "carol".into(),
            title: "T".into(),
            author: "A".into(),
        };
        assert_eq!(reading.to_string(), "carol reading T by A");

        let notified = LibraryEvent::PriceNotified {
            user: "alice".into(),
            title: "T".into(),
            price: Price::new("20"),
        };
        assert_eq!(
            notified.to_string(),
            "alice notified about price update for T to 20"
        );

        let shown = LibraryEvent::PlaylistShown {
            user: "carol".into(),
            titles: vec!["T".into(), "U".into()],
        };
        assert_eq!(shown.to_string(), "carol playlist: [T, U]");
    }

    #[test]
    fn test_json_is_tagged() {
        let event = LibraryEvent::Listening {
            user: "carol".into(),
            title: "T".into(),
            author: "A".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "listening");
        assert_eq!(json["user"], "carol");
    }

    #[test]
    fn test_filters() {
        let notified = LibraryEvent::PriceNotified {
            user: "a".into(),
            title: "T".into(),
            price: Price::new("1"),
        };
        let created = LibraryEvent::Subscribed { user: "a".into() };

        assert!(EventFilter::output().matches(&notified));
        assert!(!EventFilter::output().matches(&created));
        assert!(EventFilter::notifications().matches(&notified));
        assert!(EventFilter::lifecycle().matches(&created));
        assert!(EventFilter::all().matches(&created));
        assert!(!EventFilter::default().matches(&notified));
    }
}
