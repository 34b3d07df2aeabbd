//! Per-user book lists: the to-read list and the playlist.

use crate::error::{LibraryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of book titles. A title appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookList {
    titles: Vec<String>,
}

impl BookList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title to the end of the list.
    pub fn add(&mut self, title: &str) -> Result<()> {
        if self.contains(title) {
            return Err(LibraryError::AlreadyInList(title.to_string()));
        }
        self.titles.push(title.to_string());
        Ok(())
    }

    /// Remove a title, keeping the order of the rest.
    pub fn remove(&mut self, title: &str) -> Result<()> {
        let Some(pos) = self.titles.iter().position(|t| t == title) else {
            return Err(LibraryError::NotInList(title.to_string()));
        };
        self.titles.remove(pos);
        Ok(())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Renders as `[first, second]`.
impl fmt::Display for BookList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.titles.join(", "))
    }
}
