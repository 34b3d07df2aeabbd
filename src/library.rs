//! Main Library struct tying all components together.

use crate::error::{LibraryError, Result};
use crate::events::{EventBus, FeedConfig, FeedHandle, FeedId, LibraryEvent};
use crate::registry::SubscriptionRegistry;
use crate::store::EntityStore;
use crate::types::{Book, LibraryStats, Price, Tier, User};
use parking_lot::Mutex;
use tracing::debug;

/// The library service.
///
/// Provides a unified interface for:
/// - Registering users and books
/// - Reading and listening (listening is premium only)
/// - Managing price-change subscriptions and notifying subscribers
/// - Per-user to-read lists and premium playlists
///
/// Every observable outcome is published on the event bus; rejections are
/// returned as [`LibraryError`] signals and leave state unchanged.
pub struct Library {
    /// Users and books.
    store: EntityStore,

    /// Subscribed users in notification order.
    registry: SubscriptionRegistry,

    /// Attached event feeds.
    events: EventBus,

    /// Serializes operations that touch both the store and the registry.
    write_lock: Mutex<()>,
}

impl Library {
    /// Create an empty library.
    pub fn new() -> Self {
        Self {
            store: EntityStore::new(),
            registry: SubscriptionRegistry::new(),
            events: EventBus::new(),
            write_lock: Mutex::new(()),
        }
    }

    // --- Feeds ---

    /// Attach an event feed.
    pub fn watch(&self, config: FeedConfig) -> FeedHandle {
        self.events.watch(config)
    }

    /// Detach an event feed.
    pub fn unwatch(&self, id: FeedId) -> bool {
        self.events.unwatch(id)
    }

    pub fn feed_count(&self) -> usize {
        self.events.feed_count()
    }

    // --- Registration ---

    /// Register a user. New users start unsubscribed.
    pub fn create_user(&self, name: &str, tier: Tier) -> Result<User> {
        let user = self.store.create_user(name, tier)?;
        debug!(user = name, %tier, "user created");

        self.events.publish(&LibraryEvent::UserCreated {
            user: user.name.clone(),
            tier,
        });
        Ok(user)
    }

    /// Register a book.
    pub fn create_book(&self, title: &str, author: &str, price: Price) -> Result<Book> {
        let book = self.store.create_book(title, author, price)?;
        debug!(title, author, price = %book.price, "book created");

        self.events.publish(&LibraryEvent::BookCreated {
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price.clone(),
        });
        Ok(book)
    }

    /// Snapshot of a user.
    pub fn user(&self, name: &str) -> Result<User> {
        self.store.user(name)
    }

    /// Snapshot of a book.
    pub fn book(&self, title: &str) -> Result<Book> {
        self.store.book(title)
    }

    // --- Single books ---

    /// Read a book. Open to every tier.
    pub fn read_book(&self, title: &str, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        let book = self.store.book(title)?;

        self.events.publish(&reading(&user, &book));
        Ok(())
    }

    /// Listen to a book. Premium only; the tier is checked before anything
    /// else happens.
    pub fn listen_book(&self, title: &str, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        ensure_premium(&user)?;
        let book = self.store.book(title)?;

        self.events.publish(&listening(&user, &book));
        Ok(())
    }

    // --- Subscriptions ---

    /// Subscribe a user to price-change notifications.
    pub fn subscribe(&self, username: &str) -> Result<()> {
        let _lock = self.write_lock.lock();

        let user = self.store.user(username)?;
        if user.subscribed {
            return Err(LibraryError::AlreadySubscribed(user.name));
        }

        self.registry.add(&user.name);
        self.store.set_subscribed(&user.name, true)?;
        debug!(user = username, subscribers = self.registry.len(), "subscribed");

        self.events.publish(&LibraryEvent::Subscribed { user: user.name });
        Ok(())
    }

    /// Remove a user's subscription.
    pub fn unsubscribe(&self, username: &str) -> Result<()> {
        let _lock = self.write_lock.lock();

        let user = self.store.user(username)?;
        if !user.subscribed {
            return Err(LibraryError::NotSubscribed(user.name));
        }

        self.registry.remove(&user.name);
        self.store.set_subscribed(&user.name, false)?;
        debug!(user = username, subscribers = self.registry.len(), "unsubscribed");

        self.events.publish(&LibraryEvent::Unsubscribed { user: user.name });
        Ok(())
    }

    /// Names of subscribed users in notification order.
    pub fn subscribers(&self) -> Vec<String> {
        self.registry.subscribers()
    }

    /// Set a book's price and notify every subscriber, in subscription order.
    ///
    /// Returns the number of users notified.
    pub fn update_price(&self, title: &str, price: Price) -> Result<usize> {
        let _lock = self.write_lock.lock();

        let old = self.store.set_price(title, price.clone())?;
        self.events.publish(&LibraryEvent::PriceChanged {
            title: title.to_string(),
            old,
            new: price.clone(),
        });

        let subscribers = self.registry.subscribers();
        for user in &subscribers {
            self.events.publish(&LibraryEvent::PriceNotified {
                user: user.clone(),
                title: title.to_string(),
                price: price.clone(),
            });
        }

        debug!(title, %price, notified = subscribers.len(), "price updated");
        Ok(subscribers.len())
    }

    // --- To-read list ---

    /// Queue a book on the user's to-read list.
    pub fn add_to_read_list(&self, title: &str, username: &str) -> Result<()> {
        self.store.user(username)?;
        self.store.book(title)?;
        self.store.update_user(username, |user| user.to_read.add(title))
    }

    /// Drop a book from the user's to-read list.
    pub fn remove_from_read_list(&self, title: &str, username: &str) -> Result<()> {
        self.store.user(username)?;
        self.store.book(title)?;
        self.store.update_user(username, |user| user.to_read.remove(title))
    }

    /// Publish the user's to-read list.
    pub fn show_read_list(&self, username: &str) -> Result<()> {
        let user = self.store.user(username)?;

        self.events.publish(&LibraryEvent::ReadListShown {
            titles: user.to_read.titles().to_vec(),
            user: user.name,
        });
        Ok(())
    }

    /// Read every book on the user's to-read list, in list order.
    pub fn read_read_list(&self, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        let books = self.resolve(user.to_read.iter())?;

        for book in &books {
            self.events.publish(&reading(&user, book));
        }
        Ok(())
    }

    // --- Playlist ---

    /// Queue a book on the user's playlist. Premium only.
    pub fn add_to_playlist(&self, title: &str, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        ensure_premium(&user)?;
        self.store.book(title)?;
        self.store.update_user(username, |user| user.playlist.add(title))
    }

    /// Drop a book from the user's playlist. Premium only.
    pub fn remove_from_playlist(&self, title: &str, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        ensure_premium(&user)?;
        self.store.book(title)?;
        self.store.update_user(username, |user| user.playlist.remove(title))
    }

    /// Publish the user's playlist. Premium only.
    pub fn show_playlist(&self, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        ensure_premium(&user)?;

        self.events.publish(&LibraryEvent::PlaylistShown {
            titles: user.playlist.titles().to_vec(),
            user: user.name,
        });
        Ok(())
    }

    /// Listen to every book on the user's playlist, in list order. Premium only.
    pub fn listen_playlist(&self, username: &str) -> Result<()> {
        let user = self.store.user(username)?;
        ensure_premium(&user)?;
        let books = self.resolve(user.playlist.iter())?;

        for book in &books {
            self.events.publish(&listening(&user, book));
        }
        Ok(())
    }

    // --- Stats ---

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            users: self.store.user_count(),
            premium_users: self.store.premium_count(),
            books: self.store.book_count(),
            subscribers: self.registry.len(),
        }
    }

    /// Look up every title before anything is published.
    fn resolve<'a>(&self, titles: impl Iterator<Item = &'a str>) -> Result<Vec<Book>> {
        titles.map(|title| self.store.book(title)).collect()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_premium(user: &User) -> Result<()> {
    if user.is_premium() {
        Ok(())
    } else {
        Err(LibraryError::AccessDenied {
            user: user.name.clone(),
        })
    }
}

fn reading(user: &User, book: &Book) -> LibraryEvent {
    LibraryEvent::Reading {
        user: user.name.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
    }
}

fn listening(user: &User, book: &Book) -> LibraryEvent {
    LibraryEvent::Listening {
        user: user.name.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
    }
}
