//! Parsing command lines into [`Command`]s.

use crate::error::{LibraryError, Result};
use crate::types::{Price, Tier};
use std::str::SplitWhitespace;

/// One parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    CreateBook {
        title: String,
        author: String,
        price: Price,
    },
    CreateUser {
        tier: Tier,
        username: String,
    },
    Subscribe {
        username: String,
    },
    Unsubscribe {
        username: String,
    },
    UpdatePrice {
        title: String,
        price: Price,
    },
    ReadBook {
        username: String,
        title: String,
    },
    ListenBook {
        username: String,
        title: String,
    },
    AddToReadList {
        username: String,
        title: String,
    },
    RemoveFromReadList {
        username: String,
        title: String,
    },
    ShowReadList {
        username: String,
    },
    ReadList {
        username: String,
    },
    AddToPlaylist {
        username: String,
        title: String,
    },
    RemoveFromPlaylist {
        username: String,
        title: String,
    },
    ShowPlaylist {
        username: String,
    },
    ListenPlaylist {
        username: String,
    },
}

impl Command {
    /// Parse a single non-blank line.
    ///
    /// Tokens are split on whitespace; trailing tokens beyond what a verb
    /// takes are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().unwrap_or_default();
        let mut args = Args {
            command: verb,
            tokens,
        };

        let command = match verb {
            "createBook" => Command::CreateBook {
                title: args.next("title")?,
                author: args.next("author")?,
                price: Price::new(args.next("price")?),
            },
            "createUser" => {
                let tier = args.next("type")?;
                let username = args.next("username")?;
                match tier.parse() {
                    Ok(tier) => Command::CreateUser { tier, username },
                    Err(tier) => return Err(LibraryError::UnknownTier { tier, username }),
                }
            }
            "subscribe" => Command::Subscribe {
                username: args.next("username")?,
            },
            "unsubscribe" => Command::Unsubscribe {
                username: args.next("username")?,
            },
            "updatePrice" => Command::UpdatePrice {
                title: args.next("title")?,
                price: Price::new(args.next("newPrice")?),
            },
            "readBook" => Command::ReadBook {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "listenBook" => Command::ListenBook {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "addToReadList" => Command::AddToReadList {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "removeFromReadList" => Command::RemoveFromReadList {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "showReadList" => Command::ShowReadList {
                username: args.next("username")?,
            },
            "readList" => Command::ReadList {
                username: args.next("username")?,
            },
            "addToPlaylist" => Command::AddToPlaylist {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "removeFromPlaylist" => Command::RemoveFromPlaylist {
                username: args.next("username")?,
                title: args.next("title")?,
            },
            "showPlaylist" => Command::ShowPlaylist {
                username: args.next("username")?,
            },
            "listenPlaylist" => Command::ListenPlaylist {
                username: args.next("username")?,
            },
            other => return Err(LibraryError::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }

    /// The verb as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateBook { .. } => "createBook",
            Command::CreateUser { .. } => "createUser",
            Command::Subscribe { .. } => "subscribe",
            Command::Unsubscribe { .. } => "unsubscribe",
            Command::UpdatePrice { .. } => "updatePrice",
            Command::ReadBook { .. } => "readBook",
            Command::ListenBook { .. } => "listenBook",
            Command::AddToReadList { .. } => "addToReadList",
            Command::RemoveFromReadList { .. } => "removeFromReadList",
            Command::ShowReadList { .. } => "showReadList",
            Command::ReadList { .. } => "readList",
            Command::AddToPlaylist { .. } => "addToPlaylist",
            Command::RemoveFromPlaylist { .. } => "removeFromPlaylist",
            Command::ShowPlaylist { .. } => "showPlaylist",
            Command::ListenPlaylist { .. } => "listenPlaylist",
        }
    }
}

/// Positional argument cursor.
struct Args<'a> {
    command: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl Args<'_> {
    fn next(&mut self, argument: &'static str) -> Result<String> {
        self.tokens
            .next()
            .map(str::to_string)
            .ok_or_else(|| LibraryError::MissingArgument {
                command: self.command.to_string(),
                argument,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_create_commands() {
        assert_eq!(
            Command::parse("createBook T A 10").unwrap(),
            Command::CreateBook {
                title: "T".into(),
                author: "A".into(),
                price: Price::new("10"),
            }
        );
        assert_eq!(
            Command::parse("createUser premium carol").unwrap(),
            Command::CreateUser {
                tier: Tier::Premium,
                username: "carol".into(),
            }
        );
    }

    #[test]
    fn test_user_first_argument_order() {
        // readBook and listenBook take the user before the title.
        assert_eq!(
            Command::parse("listenBook carol T").unwrap(),
            Command::ListenBook {
                username: "carol".into(),
                title: "T".into(),
            }
        );
    }

    #[test]
    fn test_extra_whitespace_and_tokens() {
        assert_eq!(
            Command::parse("  subscribe   alice  extra ").unwrap(),
            Command::Subscribe {
                username: "alice".into(),
            }
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            Command::parse("borrowBook alice T"),
            Err(LibraryError::UnknownCommand(_))
        ));
        assert!(matches!(
            Command::parse("createUser gold dave"),
            Err(LibraryError::UnknownTier { ref tier, ref username })
                if tier == "gold" && username == "dave"
        ));
        assert!(matches!(
            Command::parse("createUser gold"),
            Err(LibraryError::MissingArgument { argument: "username", .. })
        ));
        assert!(matches!(
            Command::parse("updatePrice T"),
            Err(LibraryError::MissingArgument { ref command, argument: "newPrice" })
                if command == "updatePrice"
        ));
    }

    #[test]
    fn test_every_verb_round_trips_its_name() {
        let lines = [
            "createBook T A 1",
            "createUser standard a",
            "subscribe a",
            "unsubscribe a",
            "updatePrice T 2",
            "readBook a T",
            "listenBook a T",
            "addToReadList a T",
            "removeFromReadList a T",
            "showReadList a",
            "readList a",
            "addToPlaylist a T",
            "removeFromPlaylist a T",
            "showPlaylist a",
            "listenPlaylist a",
        ];
        let names: HashSet<&str> = lines
            .iter()
            .map(|line| {
                let name = Command::parse(line).unwrap().name();
                assert_eq!(Some(name), line.split_whitespace().next());
                name
            })
            .collect();
        assert_eq!(names.len(), lines.len());
    }
}
