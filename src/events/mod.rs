//! Event feeds for observing the library.
//!
//! Every observable outcome of a library operation is published as a
//! [`LibraryEvent`]: reading and listening, price notifications, shown lists,
//! and lifecycle changes. Consumers attach a feed and read events from it in
//! the order they were published.
//!
//! Feeds support:
//! - Filtering by event kind
//! - Bounded buffers with full-feed detaching, or unbounded buffers
//!
//! # Example
//!
//! ```ignore
//! let library = Library::new();
//! let feed = library.watch(FeedConfig::unbounded(EventFilter::notifications()));
//!
//! library.update_price("Dune", Price::new("12"))?;
//! for event in feed.drain() {
//!     println!("{event}");
//! }
//! ```

mod manager;
mod types;

pub use manager::EventBus;
pub use types::{EventFilter, EventKind, FeedConfig, FeedHandle, FeedId, LibraryEvent};
