//! Renders single-node cluster install documents from environment inputs.
//!
//! Three renderers share one network core:
//! - [`models`] - address families, IP_STACK resolution, CIDR math
//! - [`network`] - the interface/route/DNS fragment builder
//! - [`output`] - the AgentConfig, ImageBasedConfig and
//!   ImageBasedInstallationConfig frames

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod network;
pub mod output;

pub use config::{EnvSource, ProcessEnv, RenderMode};
pub use error::{RenderError, Result};
pub use output::DocumentKind;

use colored::Colorize;
use std::io::Write;
use std::process::ExitCode;

/// Render `kind` from `env` and write it to `out` in one piece.
///
/// Nothing is written when validation or rendering fails.
pub fn render_to<W: Write>(kind: DocumentKind, env: &impl EnvSource, out: &mut W) -> Result<()> {
    let document = kind.render(env)?;
    out.write_all(document.as_bytes())?;
    out.flush()?;
    log::info!(
        "{} wrote {} bytes",
        kind.program_name().green(),
        document.len()
    );
    Ok(())
}

/// Entry point shared by the renderer binaries.
pub fn run(kind: DocumentKind) -> ExitCode {
    // Loaded before logging so a .env file can set the log variables too.
    let dotenv_path = dotenv::dotenv().ok();
    if let Err(e) = logging::init() {
        eprintln!("{}: {}", kind.program_name(), e);
        return ExitCode::FAILURE;
    }
    log::debug!("#Start {}", kind.program_name());
    if let Some(path) = dotenv_path {
        log::info!("loaded environment from {}", path.display().to_string().yellow());
    }

    let stdout = std::io::stdout();
    match render_to(kind, &ProcessEnv, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{} failed: {:?}", kind.program_name(), e);
            eprintln!("{}: {}", kind.program_name(), e);
            ExitCode::FAILURE
        }
    }
}
