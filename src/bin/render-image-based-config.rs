//! Writes the ImageBasedConfig for a running image-based cluster to stdout.

use sno_config_render::{run, DocumentKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    run(DocumentKind::ImageBased)
}
