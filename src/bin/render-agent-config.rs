//! Writes the AgentConfig for the live-agent install to stdout.

use sno_config_render::{run, DocumentKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    run(DocumentKind::Agent)
}
