//! Line-driven dispatcher over a [`Library`].

use crate::config::{DispatchConfig, OutputFormat};
use crate::dispatch::command::Command;
use crate::error::{LibraryError, Result};
use crate::events::{EventFilter, FeedConfig, FeedHandle, LibraryEvent};
use crate::library::Library;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

/// What happened to one input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// The command ran.
    Executed,
    /// The library rejected the command; its signal was written.
    Rejected,
    /// The line was not a valid command and was skipped.
    Skipped,
    /// Whitespace only.
    Blank,
    /// The terminator line.
    Terminated,
}

/// Counts for a whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub rejected: usize,
    pub skipped: usize,
    /// False when input ran out before the terminator.
    pub terminated: bool,
}

/// JSON shape of a signal line.
#[derive(Serialize)]
struct SignalLine<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    message: &'a str,
}

/// Feeds command lines to a library and writes what it observes.
///
/// The dispatcher owns the library for the duration of a run and reads the
/// library's events through its own unbounded feed, so every event of a
/// command is written before the next command starts.
pub struct Dispatcher<W: Write> {
    library: Library,
    feed: FeedHandle,
    out: W,
    config: DispatchConfig,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(library: Library, out: W, config: DispatchConfig) -> Self {
        let feed = library.watch(FeedConfig::unbounded(EventFilter::output()));
        Self {
            library,
            feed,
            out,
            config,
        }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Detach the output feed and hand back the library and writer.
    pub fn into_parts(self) -> (Library, W) {
        self.library.unwatch(self.feed.id);
        (self.library, self.out)
    }

    /// Process lines until the terminator or end of input.
    ///
    /// Only I/O and serialization failures end the run early; every other
    /// failure is confined to its own line.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line)? {
                LineOutcome::Executed => summary.executed += 1,
                LineOutcome::Rejected => summary.rejected += 1,
                LineOutcome::Skipped => summary.skipped += 1,
                LineOutcome::Blank => {}
                LineOutcome::Terminated => {
                    summary.terminated = true;
                    break;
                }
            }
        }

        if !summary.terminated {
            debug!(terminator = %self.config.terminator, "input ended before terminator");
        }
        info!(
            executed = summary.executed,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "run finished"
        );
        Ok(summary)
    }

    /// Process a single line.
    ///
    /// Only a line exactly equal to the terminator ends the run; padded
    /// variants are parsed like any other line.
    pub fn execute_line(&mut self, line: &str) -> Result<LineOutcome> {
        if line == self.config.terminator {
            return Ok(LineOutcome::Terminated);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Blank);
        }

        let command = match Command::parse(line) {
            Ok(command) => command,
            // A taken name is reported before the tier is looked at.
            Err(LibraryError::UnknownTier { username, .. })
                if self.library.user(&username).is_ok() =>
            {
                self.write_signal(&LibraryError::UserExists(username))?;
                self.out.flush()?;
                return Ok(LineOutcome::Rejected);
            }
            Err(e) if e.is_malformed_input() => {
                warn!(line, error = %e, "skipping malformed command");
                return Ok(LineOutcome::Skipped);
            }
            Err(e) => return Err(e),
        };

        self.execute(&command)
    }

    /// Run a parsed command and write its events, then its signal if any.
    pub fn execute(&mut self, command: &Command) -> Result<LineOutcome> {
        debug!(command = command.name(), "dispatching");
        let result = self.apply(command);

        for event in self.feed.drain() {
            self.write_event(&event)?;
        }

        let outcome = match result {
            Ok(()) => LineOutcome::Executed,
            Err(e) if e.is_signal() => {
                debug!(command = command.name(), error = ?e, "command rejected");
                self.write_signal(&e)?;
                LineOutcome::Rejected
            }
            Err(e) => return Err(e),
        };

        self.out.flush()?;
        Ok(outcome)
    }

    fn apply(&self, command: &Command) -> Result<()> {
        let library = &self.library;
        match command {
            Command::CreateBook {
                title,
                author,
                price,
            } => library.create_book(title, author, price.clone()).map(drop),
            Command::CreateUser { tier, username } => {
                library.create_user(username, *tier).map(drop)
            }
            Command::Subscribe { username } => library.subscribe(username),
            Command::Unsubscribe { username } => library.unsubscribe(username),
            Command::UpdatePrice { title, price } => {
                library.update_price(title, price.clone()).map(drop)
            }
            Command::ReadBook { username, title } => library.read_book(title, username),
            Command::ListenBook { username, title } => library.listen_book(title, username),
            Command::AddToReadList { username, title } => {
                library.add_to_read_list(title, username)
            }
            Command::RemoveFromReadList { username, title } => {
                library.remove_from_read_list(title, username)
            }
            Command::ShowReadList { username } => library.show_read_list(username),
            Command::ReadList { username } => library.read_read_list(username),
            Command::AddToPlaylist { username, title } => {
                library.add_to_playlist(title, username)
            }
            Command::RemoveFromPlaylist { username, title } => {
                library.remove_from_playlist(title, username)
            }
            Command::ShowPlaylist { username } => library.show_playlist(username),
            Command::ListenPlaylist { username } => library.listen_playlist(username),
        }
    }

    fn write_event(&mut self, event: &LibraryEvent) -> Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(self.out, "{event}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, event)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }

    fn write_signal(&mut self, signal: &LibraryError) -> Result<()> {
        match self.config.format {
            OutputFormat::Text => writeln!(self.out, "{signal}")?,
            OutputFormat::Json => {
                let message = signal.to_string();
                let line = SignalLine {
                    kind: "signal",
                    message: &message,
                };
                serde_json::to_writer(&mut self.out, &line)?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}
