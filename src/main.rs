use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use online_library::{DispatchConfig, Dispatcher, Library, OutputFormat, DEFAULT_TERMINATOR};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "online-library")]
#[command(about = "A subscription-based media library driven by line commands.")]
struct CommandLine {
    /// Read commands from a file instead of standard input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Line that ends the command stream
    #[arg(short, long, default_value = DEFAULT_TERMINATOR)]
    terminator: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log: String,
}

fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse();
    init_logging(&args.log);

    let config = DispatchConfig {
        terminator: args.terminator,
        format: args.format,
    };

    let library = Library::new();
    let mut dispatcher = Dispatcher::new(library, io::stdout().lock(), config);

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open command file {}", path.display()))?;
            dispatcher.run(BufReader::new(file))?
        }
        None => dispatcher.run(io::stdin().lock())?,
    };

    debug!(?summary, stats = ?dispatcher.library().stats(), "exiting");
    Ok(())
}

/// Logs go to stderr so stdout carries only command output.
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }
}
