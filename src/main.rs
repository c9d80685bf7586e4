//! caret-status - a terminal editor with a debounced caret status line.
//!
//! # Usage
//!
//! ```bash
//! caret-status notes.txt
//! caret-status --delay-ms 250 --separator " / " notes.txt
//! caret-status --range-count non-zero --save
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;

use caret_status::app::App;
use caret_status::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use caret_status::status::RangeCountPolicy;

/// A terminal editor with a caret status indicator
#[derive(Parser, Debug)]
#[command(name = "caret-status", version, about, long_about = None)]
struct Cli {
    /// File to edit (created on save if missing)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Quiet period before the status line refreshes
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Separator after the mode and recording segments
    #[arg(long, value_name = "TEXT")]
    separator: Option<String>,

    /// When to show the selection range count
    #[arg(long, value_enum)]
    range_count: Option<RangeCountPolicy>,

    /// Text shown while a macro is being recorded
    #[arg(long, value_name = "TEXT")]
    rec_label: Option<String>,

    /// Write diagnostics to a file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// The terminal is in raw mode while running, so logs only go to a file.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_ref())?;
    tracing::debug!(?cli, ?effective, "starting");

    if let Some(path) = &cli.file
        && path.is_dir()
    {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let mut app = App::new(cli.file).with_indicator_options(effective.to_indicator_options());

    app.run().context("Application error")
}
