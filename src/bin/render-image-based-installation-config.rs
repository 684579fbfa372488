//! Writes the ImageBasedInstallationConfig for the image-based installer to stdout.

use sno_config_render::{run, DocumentKind};
use std::process::ExitCode;

fn main() -> ExitCode {
    run(DocumentKind::ImageBasedInstallation)
}
