//! Core types for the library.

use crate::lists::BookList;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account class. Premium unlocks listening and playlists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Standard,
    Premium,
}

impl Tier {
    pub fn is_premium(self) -> bool {
        self == Tier::Premium
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    /// Parses the tier token of `createUser`. Matching is exact, as typed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Tier::Standard),
            "premium" => Ok(Tier::Premium),
            other => Err(other.to_string()),
        }
    }
}

/// Monetary value of a book, kept as the text it was given in.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub String);

impl Price {
    pub fn new(value: impl Into<String>) -> Self {
        Price(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique key in the store.
    pub name: String,

    pub tier: Tier,

    /// Mirrors membership in the subscription registry.
    pub subscribed: bool,

    /// Books queued for reading (any tier).
    pub to_read: BookList,

    /// Books queued for listening (premium only).
    pub playlist: BookList,
}

impl User {
    /// New, unsubscribed user with empty lists.
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
            subscribed: false,
            to_read: BookList::new(),
            playlist: BookList::new(),
        }
    }

    pub fn is_premium(&self) -> bool {
        self.tier.is_premium()
    }
}

/// A title in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique key in the store.
    pub title: String,
    pub author: String,
    pub price: Price,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, price: Price) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price,
        }
    }
}

/// Counts across the library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub users: usize,
    pub premium_users: usize,
    pub books: usize,
    pub subscribers: usize,
}
