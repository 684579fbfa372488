//! Environment inputs for the renderers.
//!
//! All variables are read once, at process entry, into plain structs that
//! are then passed by value into the rendering functions. Empty values are
//! treated exactly like absent ones.

use std::collections::HashMap;

use crate::error::{RenderError, Result};
use crate::models::{resolve, Family, StackOrder};

pub const DEFAULT_IP_STACK: &str = "v4";
pub const DEFAULT_RELEASE_REGISTRY: &str = "";
pub const DEFAULT_EXTRA_PARTITION_LABEL: &str = "var-lib-containers";

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

fn non_empty(env: &impl EnvSource, name: &str) -> Option<String> {
    env.var(name).filter(|v| !v.is_empty())
}

/// Value of a required variable.
pub fn required(env: &impl EnvSource, name: &str) -> Result<String> {
    non_empty(env, name).ok_or_else(|| RenderError::missing(name))
}

/// Value of an optional variable, or `default` when unset or empty.
pub fn optional(env: &impl EnvSource, name: &str, default: &str) -> String {
    non_empty(env, name).unwrap_or_else(|| default.to_string())
}

/// Presence-only toggle; the value itself is ignored.
pub fn flag(env: &impl EnvSource, name: &str) -> bool {
    non_empty(env, name).is_some()
}

/// DHCP leaves addressing to the network; STATIC renders the full fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Dhcp,
    Static,
}

impl RenderMode {
    pub fn from_env(env: &impl EnvSource) -> Self {
        if flag(env, "DHCP") {
            RenderMode::Dhcp
        } else {
            RenderMode::Static
        }
    }
}

/// Host address and machine network of one family. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyConfig {
    pub host_address: String,
    pub machine_network: String,
}

impl FamilyConfig {
    pub fn from_env(env: &impl EnvSource, family: Family) -> Self {
        FamilyConfig {
            host_address: optional(env, family.host_var(), ""),
            machine_network: optional(env, family.network_var(), ""),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.host_address.is_empty() && !self.machine_network.is_empty()
    }
}

/// Per-family inputs, indexed by [`Family`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyConfigs {
    pub v4: FamilyConfig,
    pub v6: FamilyConfig,
}

impl FamilyConfigs {
    pub fn from_env(env: &impl EnvSource) -> Self {
        FamilyConfigs {
            v4: FamilyConfig::from_env(env, Family::V4),
            v6: FamilyConfig::from_env(env, Family::V6),
        }
    }

    pub fn get(&self, family: Family) -> &FamilyConfig {
        match family {
            Family::V4 => &self.v4,
            Family::V6 => &self.v6,
        }
    }
}

/// Inputs shared by every renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInputs {
    pub host_mac: String,
    pub stack: StackOrder,
    pub mode: RenderMode,
    pub families: FamilyConfigs,
}

/// Resolve IP_STACK, defaulting to v4.
pub fn read_stack(env: &impl EnvSource) -> Result<StackOrder> {
    let ip_stack = optional(env, "IP_STACK", DEFAULT_IP_STACK);
    let stack = resolve(&ip_stack)?;
    log::debug!("IP_STACK={} resolved to {:?}", ip_stack, stack.families());
    Ok(stack)
}

impl NetworkInputs {
    /// Reads the family variables and DHCP. HOST_MAC and IP_STACK are read by
    /// the caller so each renderer keeps its own validation order.
    pub fn from_env(env: &impl EnvSource, host_mac: String, stack: StackOrder) -> Self {
        NetworkInputs {
            host_mac,
            stack,
            mode: RenderMode::from_env(env),
            families: FamilyConfigs::from_env(env),
        }
    }

    /// Host address of the primary family, required as the rendezvous IP.
    pub fn rendezvous_ip(&self) -> Result<String> {
        let primary = self.stack.primary();
        let host = self.families.get(primary).host_address.trim();
        if host.is_empty() {
            Err(RenderError::missing(primary.host_var()))
        } else {
            Ok(host.to_string())
        }
    }
}

/// Inputs of the live-agent install document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInputs {
    pub vm_name: String,
    pub rendezvous_ip: String,
    pub network: NetworkInputs,
}

impl AgentInputs {
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let vm_name = required(env, "VM_NAME")?;
        let host_mac = required(env, "HOST_MAC")?;
        let stack = read_stack(env)?;
        let network = NetworkInputs::from_env(env, host_mac, stack);
        // Needed for bootstrap even when addressing comes from DHCP.
        let rendezvous_ip = network.rendezvous_ip()?;
        Ok(AgentInputs {
            vm_name,
            rendezvous_ip,
            network,
        })
    }
}

/// Inputs of the image-based running config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBasedInputs {
    pub vm_name: String,
    pub release_registry: String,
    pub network: NetworkInputs,
}

impl ImageBasedInputs {
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let vm_name = required(env, "VM_NAME")?;
        let host_mac = required(env, "HOST_MAC")?;
        let release_registry = optional(env, "RELEASE_REGISTRY", DEFAULT_RELEASE_REGISTRY);
        let stack = read_stack(env)?;
        let network = NetworkInputs::from_env(env, host_mac, stack);
        Ok(ImageBasedInputs {
            vm_name,
            release_registry,
            network,
        })
    }
}

/// Inputs of the image-based installation config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationInputs {
    pub seed_image: String,
    pub seed_version: String,
    pub installation_disk: String,
    pub extra_partition_start: String,
    pub extra_partition_label: String,
    pub pull_secret: String,
    pub ssh_key: String,
    pub network: NetworkInputs,
}

impl InstallationInputs {
    pub fn from_env(env: &impl EnvSource) -> Result<Self> {
        let seed_image = required(env, "SEED_IMAGE")?;
        let seed_version = required(env, "SEED_VERSION")?;
        let installation_disk = required(env, "INSTALLATION_DISK")?;
        let extra_partition_start = required(env, "IBI_EXTRA_PARTITION_START")?;
        let extra_partition_label =
            optional(env, "EXTRA_PARTITION_LABEL", DEFAULT_EXTRA_PARTITION_LABEL);
        let pull_secret = required(env, "PULL_SECRET")?;
        let ssh_key = required(env, "SSH_KEY")?;
        let stack = read_stack(env)?;
        let host_mac = required(env, "HOST_MAC")?;
        let network = NetworkInputs::from_env(env, host_mac, stack);
        Ok(InstallationInputs {
            seed_image,
            seed_version,
            installation_disk,
            extra_partition_start,
            extra_partition_label,
            pull_secret,
            ssh_key,
            network,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StackMode;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_required_optional_flag() {
        let e = env(&[("A", "x"), ("EMPTY", "")]);
        assert_eq!(required(&e, "A").unwrap(), "x");
        assert_eq!(required(&e, "EMPTY").unwrap_err(), RenderError::missing("EMPTY"));
        assert_eq!(required(&e, "B").unwrap_err(), RenderError::missing("B"));
        assert_eq!(optional(&e, "B", "dflt"), "dflt");
        assert_eq!(optional(&e, "EMPTY", "dflt"), "dflt");
        assert!(flag(&e, "A"));
        assert!(!flag(&e, "EMPTY"));
        assert!(!flag(&e, "B"));
    }

    #[test]
    fn test_render_mode() {
        assert_eq!(RenderMode::from_env(&env(&[("DHCP", "0")])), RenderMode::Dhcp);
        assert_eq!(RenderMode::from_env(&env(&[("DHCP", "")])), RenderMode::Static);
        assert_eq!(RenderMode::from_env(&env(&[])), RenderMode::Static);
    }

    #[test]
    fn test_network_inputs_default_stack() {
        let e = env(&[]);
        let stack = read_stack(&e).expect("default stack should resolve");
        let inputs = NetworkInputs::from_env(&e, "aa:bb:cc:dd:ee:ff".to_string(), stack);
        assert_eq!(inputs.stack.mode(), StackMode::V4);
        assert_eq!(inputs.mode, RenderMode::Static);
        assert!(!inputs.families.v4.is_complete());
    }

    #[test]
    fn test_agent_requires_rendezvous_in_dhcp() {
        let e = env(&[
            ("VM_NAME", "node0"),
            ("HOST_MAC", "aa:bb:cc:dd:ee:ff"),
            ("IP_STACK", "v6v4"),
            ("HOST_IP_V4", "192.0.2.10"),
            ("DHCP", "1"),
        ]);
        let err = AgentInputs::from_env(&e).unwrap_err();
        assert_eq!(err, RenderError::missing("HOST_IP_V6"));
    }

    #[test]
    fn test_agent_validation_order() {
        let err = AgentInputs::from_env(&env(&[("IP_STACK", "bogus")])).unwrap_err();
        assert_eq!(err, RenderError::missing("VM_NAME"));

        let err = AgentInputs::from_env(&env(&[("VM_NAME", "n"), ("IP_STACK", "bogus")]))
            .unwrap_err();
        assert_eq!(err, RenderError::missing("HOST_MAC"));

        let err = AgentInputs::from_env(&env(&[
            ("VM_NAME", "n"),
            ("HOST_MAC", "m"),
            ("IP_STACK", "bogus"),
        ]))
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_image_based_defaults() {
        let e = env(&[("VM_NAME", "node0"), ("HOST_MAC", "m"), ("DHCP", "yes")]);
        let inputs = ImageBasedInputs::from_env(&e).expect("inputs should validate");
        assert_eq!(inputs.release_registry, "");
        assert_eq!(inputs.network.mode, RenderMode::Dhcp);
    }

    #[test]
    fn test_installation_order_and_defaults() {
        let mut e = env(&[
            ("SEED_IMAGE", "quay.io/seed:4.16"),
            ("SEED_VERSION", "4.16.0"),
            ("INSTALLATION_DISK", "/dev/vda"),
            ("IBI_EXTRA_PARTITION_START", "-40G"),
            ("PULL_SECRET", "{}"),
        ]);
        assert_eq!(
            InstallationInputs::from_env(&e).unwrap_err(),
            RenderError::missing("SSH_KEY")
        );

        e.insert("SSH_KEY".to_string(), "ssh-ed25519 AAAA".to_string());
        e.insert("IP_STACK".to_string(), "v7".to_string());
        assert!(matches!(
            InstallationInputs::from_env(&e).unwrap_err(),
            RenderError::InvalidConfiguration { .. }
        ));

        e.insert("IP_STACK".to_string(), "v6".to_string());
        assert_eq!(
            InstallationInputs::from_env(&e).unwrap_err(),
            RenderError::missing("HOST_MAC")
        );

        e.insert("HOST_MAC".to_string(), "m".to_string());
        let inputs = InstallationInputs::from_env(&e).expect("inputs should validate");
        assert_eq!(inputs.extra_partition_label, "var-lib-containers");
        assert_eq!(inputs.network.stack.mode(), StackMode::V6);
    }
}
