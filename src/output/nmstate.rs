//! nmstate serialization of a [`NetworkFragment`].
//!
//! All three documents carry the same logical block; only the base indent,
//! the static-addressing flags and the route field order differ.

use super::Document;
use crate::models::Family;
use crate::network::{DerivedRoute, NetworkFragment};

/// Main routing table id written on installation-config routes.
pub const MAIN_ROUTE_TABLE: u32 = 254;

/// Field order of a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFields {
    /// `next-hop-address`, `next-hop-interface`, `destination`.
    NextHopFirst,
    /// `destination`, `next-hop-address`, `next-hop-interface`, `table-id`.
    DestinationFirst,
}

/// Per-document layout of the network block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLayout {
    /// Indent of the `interfaces:`, `routes:` and `dns-resolver:` keys.
    pub indent: usize,
    /// Emit `dhcp: false` (and `autoconf: false` for ipv6).
    pub static_flags: bool,
    pub route_fields: RouteFields,
}

/// Bare interface stanza used in DHCP mode.
pub fn write_dhcp_interface(doc: &mut Document, layout: &NetworkLayout, name: &str, mac: &str) {
    let i = layout.indent;
    doc.line(i, "interfaces:");
    doc.line(i + 2, format!("- name: {name}"));
    doc.line(i + 4, format!("mac-address: {mac}"));
}

/// Interfaces, routes and DNS of a STATIC render.
pub fn write_network_config(doc: &mut Document, layout: &NetworkLayout, fragment: &NetworkFragment) {
    let i = layout.indent;
    let iface = &fragment.interface;

    doc.line(i, "interfaces:");
    doc.line(i + 2, format!("- name: {}", iface.name));
    doc.line(i + 4, "type: ethernet");
    doc.line(i + 4, "state: up");
    doc.line(i + 4, format!("mac-address: {}", iface.mac_address));
    for addr in &iface.addresses {
        doc.line(i + 4, format!("{}:", addr.family.key()));
        doc.line(i + 6, "enabled: true");
        if layout.static_flags {
            doc.line(i + 6, "dhcp: false");
            if addr.family == Family::V6 {
                doc.line(i + 6, "autoconf: false");
            }
        }
        doc.line(i + 6, "address:");
        doc.line(i + 8, format!("- ip: {}", addr.ip));
        doc.line(i + 10, format!("prefix-length: {}", addr.prefix_length));
    }
    for family in &iface.disabled {
        doc.line(i + 4, format!("{}:", family.key()));
        doc.line(i + 6, "enabled: false");
    }

    doc.line(i, "routes:");
    doc.line(i + 2, "config:");
    for route in &fragment.routes {
        write_route(doc, i + 2, layout.route_fields, route);
    }

    doc.line(i, "dns-resolver:");
    doc.line(i + 2, "config:");
    doc.line(i + 4, "server:");
    for server in &fragment.dns_servers {
        doc.line(i + 6, format!("- {server}"));
    }
}

fn write_route(doc: &mut Document, indent: usize, fields: RouteFields, route: &DerivedRoute) {
    match fields {
        RouteFields::NextHopFirst => {
            doc.line(indent, format!("- next-hop-address: {}", route.gateway));
            doc.line(indent + 2, format!("next-hop-interface: {}", route.interface));
            doc.line(indent + 2, format!("destination: {}", route.destination));
        }
        RouteFields::DestinationFirst => {
            doc.line(indent, format!("- destination: {}", route.destination));
            doc.line(indent + 2, format!("next-hop-address: {}", route.gateway));
            doc.line(indent + 2, format!("next-hop-interface: {}", route.interface));
            doc.line(indent + 2, format!("table-id: {MAIN_ROUTE_TABLE}"));
        }
    }
}
