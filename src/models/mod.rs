//! Value types for the network renderers.
//!
//! - [`Family`] - IPv4 / IPv6 address family
//! - [`StackMode`] and [`StackOrder`] - IP_STACK resolution
//! - [`Cidr`] - machine network CIDR with gateway derivation

mod cidr;
mod family;
mod stack;

// Re-export public types
pub use cidr::{
    cut_addr, derive_gateway, derive_prefix_length, get_cidr_mask, parse_cidr, Cidr, CidrError,
};
pub use family::Family;
pub use stack::{resolve, StackMode, StackOrder, ACCEPTED_STACKS};
