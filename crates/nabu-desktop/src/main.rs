//! Desktop container for Nabu bundles.
//!
//! Thin driver around `nabu-runtime`: opens one GL-backed window, executes
//! the bundle, and feeds the runtime frame ticks and resize notifications.

mod app;
mod host;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use winit::dpi::LogicalSize;

use nabu_runtime::logging::{init_logging, LoggingConfig};

use crate::app::{DriverApp, DriverConfig};

#[derive(Debug, Parser)]
#[command(name = "nabu-desktop", version, about = "Desktop container for Nabu bundles")]
struct Cli {
    /// Bundle script executed at boot.
    #[arg(default_value = "app.bundle.lua")]
    bundle: PathBuf,

    /// Enable debug-level logging.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        verbose: cli.verbose,
        ..LoggingConfig::default()
    });

    DriverApp::run(DriverConfig {
        bundle: cli.bundle,
        title: window_title(),
        initial_size: LogicalSize::new(800.0, 600.0),
    })
}

/// The window title mirrors the executable name, so a container copied to
/// `clicker` opens a window titled "clicker".
fn window_title() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "nabu".to_string())
}
