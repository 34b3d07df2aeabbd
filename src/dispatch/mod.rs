//! Command dispatch: text lines in, event and signal lines out.

mod command;
mod dispatcher;

pub use command::Command;
pub use dispatcher::{Dispatcher, LineOutcome, RunSummary};
