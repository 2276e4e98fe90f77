//! Vitrine - A terminal carousel viewer for showcase card decks.
//!
//! # Usage
//!
//! ```bash
//! vitrine deck.json
//! vitrine --watch deck.json
//! vitrine --no-autoplay deck.json5
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use vitrine::app::App;
use vitrine::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use vitrine::perf;

/// A terminal carousel viewer for showcase card decks
#[derive(Parser, Debug)]
#[command(name = "vitrine", version, about, long_about = None)]
struct Cli {
    /// Deck file to present (.json or .json5)
    #[arg(value_name = "DECK")]
    deck: PathBuf,

    /// Watch the deck file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Disable autoplay for every gallery
    #[arg(long)]
    no_autoplay: bool,

    /// Hide dot indicators
    #[arg(long)]
    no_dots: bool,

    /// Hide the previous/next arrows
    #[arg(long)]
    no_navigation: bool,

    /// Override every gallery's autoplay delay, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    autoplay_delay: Option<u64>,

    /// Enable startup performance logging
    #[arg(long)]
    perf: bool,

    /// Write timer and input events to a log file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults in the config file
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

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

    perf::set_enabled(effective.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("VITRINE_DEBUG_LOG").map(PathBuf::from));
    if let Err(err) = perf::set_event_log_path(debug_log_path.as_deref()) {
        eprintln!(
            "[warn] Failed to initialize event log {}: {}",
            debug_log_path
                .as_ref()
                .map_or_else(|| "<unset>".to_string(), |p| p.display().to_string()),
            err
        );
    }

    // Verify the deck exists before touching the terminal
    if !cli.deck.exists() {
        anyhow::bail!("Deck not found: {}", cli.deck.display());
    }

    // Run the application
    let mut app = App::new(cli.deck)
        .with_watch(effective.watch)
        .with_autoplay(!effective.no_autoplay)
        .with_autoplay_delay(effective.autoplay_delay)
        .with_dots(!effective.no_dots)
        .with_navigation(!effective.no_navigation)
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
