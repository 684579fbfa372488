//! Network configuration fragment shared by all document kinds.

mod fragment;

pub use fragment::{build, DerivedRoute, FamilyAddress, InterfaceStanza, NetworkFragment};
