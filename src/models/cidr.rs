//! CIDR notation and gateway derivation.
//!
//! Provides [`Cidr`] for IPv4 and IPv6 machine networks, along with the
//! mask helpers used to find a network's assumed gateway (network address + 1).

use super::Family;
use crate::error::{RenderError, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use thiserror::Error;

/// Problems with CIDR text, before a variable name is attached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    #[error("invalid address {0}")]
    Address(String),
    #[error("invalid prefix length {0}")]
    PrefixLength(String),
    #[error("prefix length {len} is too long for {family}")]
    TooLong { len: u8, family: Family },
    #[error("no usable gateway after {0}")]
    GatewayOverflow(IpAddr),
}

/// Address as a family-width integer, stored in the low bits of a u128.
fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u32::from(a) as u128,
        IpAddr::V6(a) => u128::from(a),
    }
}

fn bits_addr(family: Family, bits: u128) -> IpAddr {
    match family {
        Family::V4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
        Family::V6 => IpAddr::V6(Ipv6Addr::from(bits)),
    }
}

/// Largest address of the family, as bits.
fn all_bits(family: Family) -> u128 {
    match family {
        Family::V4 => u32::MAX as u128,
        Family::V6 => u128::MAX,
    }
}

/// Convert a prefix length to a mask for the given family.
///
/// # Examples
/// ```
/// use sno_config_render::models::{get_cidr_mask, Family};
/// assert_eq!(get_cidr_mask(Family::V4, 24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(family: Family, len: u8) -> std::result::Result<u128, CidrError> {
    let max = family.max_length();
    if len > max {
        Err(CidrError::TooLong { len, family })
    } else {
        let right_len = (max - len) as u32;
        let mask = all_bits(family)
            .checked_shr(right_len)
            .and_then(|b| b.checked_shl(right_len))
            .unwrap_or(0);
        Ok(mask)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: IpAddr, len: u8) -> std::result::Result<IpAddr, CidrError> {
    let family = Family::of(&addr);
    let mask = get_cidr_mask(family, len)?;
    Ok(bits_addr(family, addr_bits(addr) & mask))
}

/// Address or network with a prefix length, e.g. `192.0.2.0/24` or `fd00::/64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    /// The address as given; host bits may be set.
    pub addr: IpAddr,
    /// The prefix length (0-32 or 0-128).
    pub mask: u8,
}

impl Cidr {
    /// Parse CIDR text. A bare address is taken as a host-length prefix.
    pub fn new(addr_cidr: &str) -> std::result::Result<Cidr, CidrError> {
        let addr_cidr = addr_cidr.trim();
        let (addr_part, mask_part) = match addr_cidr.split_once('/') {
            Some((a, m)) => (a, Some(m)),
            None => (addr_cidr, None),
        };
        let addr: IpAddr = addr_part
            .parse()
            .map_err(|_| CidrError::Address(addr_part.to_string()))?;
        let family = Family::of(&addr);
        let mask = match mask_part {
            Some(m) => m
                .parse::<u8>()
                .map_err(|_| CidrError::PrefixLength(m.to_string()))?,
            None => family.max_length(),
        };
        if mask > family.max_length() {
            return Err(CidrError::TooLong { len: mask, family });
        }
        Ok(Cidr { addr, mask })
    }

    pub fn family(&self) -> Family {
        Family::of(&self.addr)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn network(&self) -> std::result::Result<IpAddr, CidrError> {
        cut_addr(self.addr, self.mask)
    }

    /// Network address + 1, without wrapping past the family's last address.
    pub fn gateway(&self) -> std::result::Result<IpAddr, CidrError> {
        let family = self.family();
        let network = self.network()?;
        let next = addr_bits(network)
            .checked_add(1)
            .filter(|b| *b <= all_bits(family))
            .ok_or(CidrError::GatewayOverflow(network))?;
        Ok(bits_addr(family, next))
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

/// Parse a machine network taken from `var`, attaching the variable to errors.
pub fn parse_cidr(cidr: &str, var: &str) -> Result<Cidr> {
    Cidr::new(cidr).map_err(|e| RenderError::invalid(var, cidr, e.to_string()))
}

/// Assumed gateway of the network named by `cidr`.
pub fn derive_gateway(cidr: &str, var: &str) -> Result<IpAddr> {
    parse_cidr(cidr, var)?
        .gateway()
        .map_err(|e| RenderError::invalid(var, cidr, e.to_string()))
}

/// Prefix length of `cidr`, echoed into interface address stanzas.
pub fn derive_prefix_length(cidr: &str, var: &str) -> Result<u8> {
    Ok(parse_cidr(cidr, var)?.mask)
}
