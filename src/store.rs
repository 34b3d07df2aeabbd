//! Entity store: users and books keyed by name and title.

use crate::error::{LibraryError, Result};
use crate::types::{Book, Price, Tier, User};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Owns every user and book for the lifetime of the process.
///
/// Lookups hand out snapshots; mutation goes through the methods below so
/// that no caller holds a lock across a library operation.
pub struct EntityStore {
    /// Users by name.
    users: RwLock<HashMap<String, User>>,

    /// Books by title.
    books: RwLock<HashMap<String, Book>>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            books: RwLock::new(HashMap::new()),
        }
    }

    // --- Users ---

    /// Register a new user. Fails if the name is taken.
    pub fn create_user(&self, name: &str, tier: Tier) -> Result<User> {
        let mut users = self.users.write();
        if users.contains_key(name) {
            return Err(LibraryError::UserExists(name.to_string()));
        }

        let user = User::new(name, tier);
        users.insert(name.to_string(), user.clone());
        Ok(user)
    }

    /// Snapshot of a user.
    pub fn user(&self, name: &str) -> Result<User> {
        self.users
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LibraryError::UserNotFound(name.to_string()))
    }

    pub fn contains_user(&self, name: &str) -> bool {
        self.users.read().contains_key(name)
    }

    /// Mutate a user in place under the write lock.
    pub fn update_user<T, F>(&self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut User) -> Result<T>,
    {
        let mut users = self.users.write();
        let user = users
            .get_mut(name)
            .ok_or_else(|| LibraryError::UserNotFound(name.to_string()))?;
        f(user)
    }

    /// Set the subscription flag, returning the previous value.
    pub fn set_subscribed(&self, name: &str, subscribed: bool) -> Result<bool> {
        self.update_user(name, |user| {
            Ok(std::mem::replace(&mut user.subscribed, subscribed))
        })
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    pub fn premium_count(&self) -> usize {
        self.users.read().values().filter(|u| u.is_premium()).count()
    }

    // --- Books ---

    /// Register a new book. Fails if the title is taken.
    pub fn create_book(&self, title: &str, author: &str, price: Price) -> Result<Book> {
        let mut books = self.books.write();
        if books.contains_key(title) {
            return Err(LibraryError::BookExists(title.to_string()));
        }

        let book = Book::new(title, author, price);
        books.insert(title.to_string(), book.clone());
        Ok(book)
    }

    /// Snapshot of a book.
    pub fn book(&self, title: &str) -> Result<Book> {
        self.books
            .read()
            .get(title)
            .cloned()
            .ok_or_else(|| LibraryError::BookNotFound(title.to_string()))
    }

    pub fn contains_book(&self, title: &str) -> bool {
        self.books.read().contains_key(title)
    }

    /// Replace a book's price, returning the old one.
    pub fn set_price(&self, title: &str, price: Price) -> Result<Price> {
        let mut books = self.books.write();
        let book = books
            .get_mut(title)
            .ok_or_else(|| LibraryError::BookNotFound(title.to_string()))?;
        Ok(std::mem::replace(&mut book.price, price))
    }

    pub fn book_count(&self) -> usize {
        self.books.read().len()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
