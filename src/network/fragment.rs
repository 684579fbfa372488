//! Network fragment builder.
//!
//! Turns the resolved stack order and per-family inputs into one interface
//! stanza, one default route per family and the DNS server list. Iteration
//! follows the stack order, so `v6v4` puts every v6 entry first.

use crate::config::FamilyConfigs;
use crate::error::{RenderError, Result};
use crate::models::{derive_gateway, derive_prefix_length, Family, StackOrder};
use colored::Colorize;
use std::net::IpAddr;

/// Static address block of one enabled family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyAddress {
    pub family: Family,
    /// Host address as given, trimmed. It is validated but never rewritten.
    pub ip: String,
    pub prefix_length: u8,
}

/// The single ethernet interface every family is merged onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceStanza {
    pub name: String,
    pub mac_address: String,
    /// Enabled families in stack order.
    pub addresses: Vec<FamilyAddress>,
    /// Families explicitly turned off. Only set for single-stack orders.
    pub disabled: Vec<Family>,
}

/// Default route through the derived gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRoute {
    pub family: Family,
    pub destination: &'static str,
    pub gateway: IpAddr,
    pub interface: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkFragment {
    pub interface: InterfaceStanza,
    pub routes: Vec<DerivedRoute>,
    pub dns_servers: Vec<IpAddr>,
}

fn check_host_address(family: Family, value: &str) -> Result<String> {
    let var = family.host_var();
    let trimmed = value.trim();
    let ip: IpAddr = trimmed
        .parse()
        .map_err(|_| RenderError::invalid(var, value, "not an IP address"))?;
    if Family::of(&ip) != family {
        return Err(RenderError::invalid(
            var,
            value,
            format!("not an {} address", family.key()),
        ));
    }
    Ok(trimmed.to_string())
}

/// Build the fragment for a STATIC render.
///
/// # Arguments
/// * `order` - Resolved IP_STACK
/// * `families` - Host address and machine network per family
/// * `interface_name` - Interface every family is configured on
/// * `mac_address` - MAC of that interface
///
/// # Returns
/// * `Err(MissingStackInput)` - A selected family lacks one of its inputs
/// * `Err(InvalidConfiguration)` - A host address or CIDR does not parse or
///   belongs to the wrong family
pub fn build(
    order: &StackOrder,
    families: &FamilyConfigs,
    interface_name: &str,
    mac_address: &str,
) -> Result<NetworkFragment> {
    let mut interface = InterfaceStanza {
        name: interface_name.to_string(),
        mac_address: mac_address.to_string(),
        addresses: Vec::new(),
        disabled: Vec::new(),
    };
    let mut routes = Vec::new();
    let mut dns_servers = Vec::new();

    for &family in order.families() {
        let config = families.get(family);
        if !config.is_complete() {
            return Err(RenderError::MissingStackInput {
                stack: order.mode().to_string(),
                family: family.to_string(),
                host_var: family.host_var().to_string(),
                network_var: family.network_var().to_string(),
            });
        }

        let ip = check_host_address(family, &config.host_address)?;
        let network_var = family.network_var();
        let gateway = derive_gateway(&config.machine_network, network_var)?;
        if Family::of(&gateway) != family {
            return Err(RenderError::invalid(
                network_var,
                &config.machine_network,
                format!("not an {} network", family.key()),
            ));
        }
        let prefix_length = derive_prefix_length(&config.machine_network, network_var)?;
        log::debug!(
            "{} {} -> gateway {} prefix /{}",
            family.key(),
            config.machine_network.trim(),
            gateway.to_string().green(),
            prefix_length
        );

        interface.addresses.push(FamilyAddress {
            family,
            ip,
            prefix_length,
        });
        routes.push(DerivedRoute {
            family,
            destination: family.default_destination(),
            gateway,
            interface: interface_name.to_string(),
        });
        dns_servers.push(gateway);
    }

    if order.is_single() {
        interface.disabled = order.disabled();
    }

    Ok(NetworkFragment {
        interface,
        routes,
        dns_servers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamilyConfig;
    use crate::models::resolve;

    fn families(v4: (&str, &str), v6: (&str, &str)) -> FamilyConfigs {
        FamilyConfigs {
            v4: FamilyConfig {
                host_address: v4.0.to_string(),
                machine_network: v4.1.to_string(),
            },
            v6: FamilyConfig {
                host_address: v6.0.to_string(),
                machine_network: v6.1.to_string(),
            },
        }
    }

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_single_v4() {
        let order = resolve("v4").unwrap();
        let f = families(("192.0.2.10", "192.0.2.0/24"), ("", ""));
        let frag = build(&order, &f, "eno1", "aa:bb:cc:dd:ee:ff").expect("v4 fragment");

        assert_eq!(
            frag.interface.addresses,
            vec![FamilyAddress {
                family: Family::V4,
                ip: "192.0.2.10".to_string(),
                prefix_length: 24
            }]
        );
        assert_eq!(frag.interface.disabled, vec![Family::V6]);
        assert_eq!(frag.routes.len(), 1);
        assert_eq!(frag.routes[0].destination, "0.0.0.0/0");
        assert_eq!(frag.routes[0].gateway, ip("192.0.2.1"));
        assert_eq!(frag.routes[0].interface, "eno1");
        assert_eq!(frag.dns_servers, vec![ip("192.0.2.1")]);
    }

    #[test]
    fn test_single_v6_disables_v4() {
        let order = resolve("v6").unwrap();
        let f = families(("", ""), ("fd00::10", "fd00::/64"));
        let frag = build(&order, &f, "enp1s0", "m").expect("v6 fragment");
        assert_eq!(frag.interface.disabled, vec![Family::V4]);
        assert_eq!(frag.routes[0].destination, "::/0");
        assert_eq!(frag.dns_servers, vec![ip("fd00::1")]);
    }

    #[test]
    fn test_dual_stack_follows_order() {
        let f = families(("192.0.2.10", "192.0.2.0/24"), ("fd00::10", "fd00::/64"));

        let frag = build(&resolve("v6v4").unwrap(), &f, "enp1s0", "m").unwrap();
        assert_eq!(frag.dns_servers, vec![ip("fd00::1"), ip("192.0.2.1")]);
        assert_eq!(frag.routes[0].family, Family::V6);
        assert_eq!(frag.routes[1].family, Family::V4);
        assert_eq!(frag.interface.addresses[0].family, Family::V6);
        assert!(frag.interface.disabled.is_empty());

        let frag = build(&resolve("v4v6").unwrap(), &f, "enp1s0", "m").unwrap();
        assert_eq!(frag.dns_servers, vec![ip("192.0.2.1"), ip("fd00::1")]);
        assert!(frag.interface.disabled.is_empty());
    }

    #[test]
    fn test_missing_family_input() {
        let order = resolve("v4v6").unwrap();
        let f = families(("192.0.2.10", "192.0.2.0/24"), ("fd00::10", ""));
        let err = build(&order, &f, "eno1", "m").unwrap_err();
        assert!(err.is_missing_input());
        assert_eq!(
            err.to_string(),
            "IP_STACK=v4v6 includes v6 but HOST_IP_V6 and MACHINE_NETWORK_V6 are not set"
        );
    }

    #[test]
    fn test_unused_family_is_not_validated() {
        let order = resolve("v4").unwrap();
        let f = families(("192.0.2.10", "192.0.2.0/24"), ("junk", "junk"));
        assert!(build(&order, &f, "eno1", "m").is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        let order = resolve("v4").unwrap();

        let err = build(&order, &families(("192.0.2.10", "192.0.2.0/xx"), ("", "")), "e", "m")
            .unwrap_err();
        assert!(err.names_variable("MACHINE_NETWORK_V4"));

        let err = build(&order, &families(("fd00::1", "192.0.2.0/24"), ("", "")), "e", "m")
            .unwrap_err();
        assert!(err.names_variable("HOST_IP_V4"));

        let err = build(&order, &families(("192.0.2.10", "fd00::/64"), ("", "")), "e", "m")
            .unwrap_err();
        assert!(err.names_variable("MACHINE_NETWORK_V4"));

        let err = build(
            &order,
            &families(("255.255.255.255", "255.255.255.255/32"), ("", "")),
            "e",
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_host_address_kept_as_given() {
        let order = resolve("v6").unwrap();
        let f = families(("", ""), (" FD00:0:0:0::10 ", "fd00::/64"));
        let frag = build(&order, &f, "eno1", "m").unwrap();
        assert_eq!(frag.interface.addresses[0].ip, "FD00:0:0:0::10");
        assert_eq!(frag.dns_servers, vec![ip("fd00::1")]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let order = resolve("v6v4").unwrap();
        let f = families(("10.0.0.5", "10.0.0.0/8"), ("2001:db8::5", "2001:db8::/32"));
        assert_eq!(
            build(&order, &f, "eno1", "m").unwrap(),
            build(&order, &f, "eno1", "m").unwrap()
        );
    }
}
