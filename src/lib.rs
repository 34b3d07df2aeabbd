//! # Online Library
//!
//! An in-memory, subscription-based media library driven by line commands.
//!
//! ## Core Concepts
//!
//! - **Users**: standard or premium accounts; premium unlocks listening
//! - **Books**: title, author and a text-typed price
//! - **Subscriptions**: opt-in price-change notifications, delivered in
//!   subscription order
//! - **Lists**: a to-read list per user and a playlist per premium user
//! - **Events**: every observable outcome is published to attached feeds
//!
//! ## Example
//!
//! ```ignore
//! use online_library::{EventFilter, FeedConfig, Library, Price, Tier};
//!
//! let library = Library::new();
//! let feed = library.watch(FeedConfig::unbounded(EventFilter::output()));
//!
//! library.create_user("alice", Tier::Standard)?;
//! library.create_book("Dune", "Herbert", Price::new("10"))?;
//! library.subscribe("alice")?;
//! library.update_price("Dune", Price::new("12"))?;
//!
//! // "alice notified about price update for Dune to 12"
//! for event in feed.drain() {
//!     println!("{event}");
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod library;
pub mod lists;
pub mod registry;
pub mod store;
pub mod types;

// Re-exports
pub use config::{DispatchConfig, OutputFormat, DEFAULT_TERMINATOR};
pub use dispatch::{Command, Dispatcher, LineOutcome, RunSummary};
pub use error::{LibraryError, Result};
pub use events::{EventBus, EventFilter, EventKind, FeedConfig, FeedHandle, FeedId, LibraryEvent};
pub use library::Library;
pub use lists::BookList;
pub use registry::SubscriptionRegistry;
pub use store::EntityStore;
pub use types::*;
