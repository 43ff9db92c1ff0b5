//! Mindline - stdio bridge for the mind-map line-sync engine.
//!
//! Reads host messages as JSON lines on stdin and emits editor events as
//! JSON lines on stdout. Logs go to stderr so they never corrupt the
//! protocol stream.
//!
//! # Usage
//!
//! ```bash
//! mindline
//! mindline --placement center
//! mindline --theme dark --bottom-margin 120
//! ```

use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;

use mindline::config::{
    ConfigFlags, Placement, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use mindline::host;
use mindline::render::TraceRenderer;
use mindline::status::TimePeriodController;
use mindline::view::{SessionDefaults, ViewerSession};

/// Stdio bridge for the mind-map line-sync engine
#[derive(Parser, Debug)]
#[command(name = "mindline", version, about, long_about = None)]
struct Cli {
    /// Force light/dark theming instead of tracking the host
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,

    /// Viewport treatment of the highlighted node when the document
    /// options carry none
    #[arg(long, value_enum)]
    placement: Option<Placement>,

    /// Space reserved at the bottom edge for fixed overlays
    #[arg(long, value_name = "MARGIN")]
    bottom_margin: Option<u16>,

    /// Do not expand collapsed ancestors on cursor sync unless the host
    /// asks for it explicitly
    #[arg(long)]
    no_auto_expand: bool,

    /// Save current command-line flags as defaults in .mindlinerc
    #[arg(long)]
    save: bool,

    /// Clear saved defaults in .mindlinerc
    #[arg(long)]
    clear: bool,
}

fn session_defaults(flags: &ConfigFlags) -> SessionDefaults {
    let forced_dark = match flags.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => None,
        ThemeMode::Light => Some(false),
        ThemeMode::Dark => Some(true),
    };
    let base = SessionDefaults::default();
    SessionDefaults {
        placement: flags.placement.unwrap_or(base.placement),
        bottom_margin: flags.bottom_margin.unwrap_or(base.bottom_margin),
        auto_expand: !flags.no_auto_expand,
        forced_dark,
    }
}

fn main() -> Result<()> {
    // Initialize logging on stderr; stdout is the protocol stream.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
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
    let defaults = session_defaults(&effective);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("runtime init")?;
    runtime.block_on(async {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (events_tx, events_rx) = mpsc::unbounded_channel();
                let session =
                    Rc::new(ViewerSession::new(TraceRenderer, events_tx).with_defaults(defaults));
                let mut status = TimePeriodController::new();
                let result = host::serve(
                    Rc::clone(&session),
                    &mut status,
                    tokio::io::stdin(),
                    tokio::io::stdout(),
                    events_rx,
                )
                .await;
                drop(session);
                result
            })
            .await
            .context("host channel failed")?;
        // Let in-flight handlers and the outbound writer drain.
        local.await;
        Ok(())
    })
}
