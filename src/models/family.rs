//! IP address families.

use std::fmt;
use std::net::IpAddr;

/// An IP address family selectable through IP_STACK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Token used in IP_STACK values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::V4 => "v4",
            Family::V6 => "v6",
        }
    }

    /// nmstate key for the family block on an interface.
    pub fn key(&self) -> &'static str {
        match self {
            Family::V4 => "ipv4",
            Family::V6 => "ipv6",
        }
    }

    /// Address width in bits.
    pub fn max_length(&self) -> u8 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// Destination of the family's default route.
    pub fn default_destination(&self) -> &'static str {
        match self {
            Family::V4 => "0.0.0.0/0",
            Family::V6 => "::/0",
        }
    }

    pub fn host_var(&self) -> &'static str {
        match self {
            Family::V4 => "HOST_IP_V4",
            Family::V6 => "HOST_IP_V6",
        }
    }

    pub fn network_var(&self) -> &'static str {
        match self {
            Family::V4 => "MACHINE_NETWORK_V4",
            Family::V6 => "MACHINE_NETWORK_V6",
        }
    }

    pub fn other(&self) -> Family {
        match self {
            Family::V4 => Family::V6,
            Family::V6 => Family::V4,
        }
    }

    pub fn of(addr: &IpAddr) -> Family {
        match addr {
            IpAddr::V4(_) => Family::V4,
            IpAddr::V6(_) => Family::V6,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
