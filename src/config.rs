//! Dispatcher configuration.

use std::fmt;
use std::str::FromStr;

/// Line the command stream ends on unless configured otherwise.
pub const DEFAULT_TERMINATOR: &str = "end";

/// How output lines are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human-readable line per event or signal.
    #[default]
    Text,
    /// One JSON object per event or signal.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("invalid output format: {other} (expected text or json)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Dispatcher configuration.
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// A line exactly equal to this ends the run; no trimming is applied.
    /// Default: "end"
    pub terminator: String,

    /// Rendering of output lines.
    pub format: OutputFormat,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            terminator: DEFAULT_TERMINATOR.to_string(),
            format: OutputFormat::default(),
        }
    }
}
