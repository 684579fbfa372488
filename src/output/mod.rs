//! Document assemblers.
//!
//! Each document kind wraps the shared network fragment in its own frame:
//! - [`agent`] - AgentConfig for the live-agent install
//! - [`image_based`] - ImageBasedConfig for a running image-based cluster
//! - [`installation`] - ImageBasedInstallationConfig for the installer

pub mod agent;
mod document;
pub mod image_based;
pub mod installation;
mod nmstate;

pub use document::Document;
pub use nmstate::{write_dhcp_interface, write_network_config, NetworkLayout, RouteFields};

use crate::config::{AgentInputs, EnvSource, ImageBasedInputs, InstallationInputs};
use crate::error::Result;

/// The three renderable documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Agent,
    ImageBased,
    ImageBasedInstallation,
}

impl DocumentKind {
    /// Binary name, used as the prefix of diagnostics.
    pub fn program_name(&self) -> &'static str {
        match self {
            DocumentKind::Agent => "render-agent-config",
            DocumentKind::ImageBased => "render-image-based-config",
            DocumentKind::ImageBasedInstallation => "render-image-based-installation-config",
        }
    }

    /// Validate this document's inputs, then render the complete document.
    pub fn render(&self, env: &impl EnvSource) -> Result<String> {
        match self {
            DocumentKind::Agent => agent::render(AgentInputs::from_env(env)?),
            DocumentKind::ImageBased => image_based::render(ImageBasedInputs::from_env(env)?),
            DocumentKind::ImageBasedInstallation => {
                installation::render(InstallationInputs::from_env(env)?)
            }
        }
    }
}
