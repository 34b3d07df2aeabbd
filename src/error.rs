//! Error types for the library.
//!
//! Domain rejections display as the exact signal line the dispatcher prints,
//! so `err.to_string()` is part of the observable output contract.

use thiserror::Error;

/// Main error type for library operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    // --- Domain signals ---
    #[error("User already exists")]
    UserExists(String),

    #[error("Book already exists")]
    BookExists(String),

    #[error("No access")]
    AccessDenied { user: String },

    #[error("User already subscribed")]
    AlreadySubscribed(String),

    #[error("User is not subscribed")]
    NotSubscribed(String),

    #[error("User not found")]
    UserNotFound(String),

    #[error("Book not found")]
    BookNotFound(String),

    #[error("Book already in the list")]
    AlreadyInList(String),

    #[error("Book is not in the list")]
    NotInList(String),

    // --- Malformed input ---
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument `{argument}` for {command}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    #[error("Unknown user type: {tier}")]
    UnknownTier { tier: String, username: String },

    // --- Run-ending failures ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LibraryError {
    /// True for rejections that belong on the output stream.
    ///
    /// Everything else is either malformed input (logged and skipped) or a
    /// failure of the run itself.
    pub fn is_signal(&self) -> bool {
        matches!(
            self,
            LibraryError::UserExists(_)
                | LibraryError::BookExists(_)
                | LibraryError::AccessDenied { .. }
                | LibraryError::AlreadySubscribed(_)
                | LibraryError::NotSubscribed(_)
                | LibraryError::UserNotFound(_)
                | LibraryError::BookNotFound(_)
                | LibraryError::AlreadyInList(_)
                | LibraryError::NotInList(_)
        )
    }

    /// True for lines the dispatcher could not turn into a command.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            LibraryError::UnknownCommand(_)
                | LibraryError::MissingArgument { .. }
                | LibraryError::UnknownTier { .. }
        )
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(e: serde_json::Error) -> Self {
        LibraryError::Serialization(e.to_string())
    }
}

/// Result type for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
