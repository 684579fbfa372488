//! ImageBasedConfig for a running image-based cluster.

use super::nmstate::{write_dhcp_interface, write_network_config, NetworkLayout, RouteFields};
use super::Document;
use crate::config::{ImageBasedInputs, RenderMode};
use crate::error::Result;
use crate::network::build;

pub const INTERFACE_NAME: &str = "enp1s0";
pub const NAMESPACE: &str = "cluster0";

const LAYOUT: NetworkLayout = NetworkLayout {
    indent: 2,
    static_flags: true,
    route_fields: RouteFields::NextHopFirst,
};

pub fn render(inputs: ImageBasedInputs) -> Result<String> {
    let network = &inputs.network;
    let mut doc = Document::new();

    doc.line(0, "apiVersion: v1beta1");
    doc.line(0, "kind: ImageBasedConfig");
    doc.line(0, "metadata:");
    doc.line(2, format!("name: {}-imagebased-config", inputs.vm_name));
    doc.line(2, format!("namespace: {NAMESPACE}"));
    doc.line(0, format!("hostname: {}", inputs.vm_name));
    doc.line(0, format!("releaseRegistry: {}", inputs.release_registry));

    match network.mode {
        RenderMode::Dhcp => {
            doc.line(0, "networkConfig:");
            write_dhcp_interface(&mut doc, &LAYOUT, INTERFACE_NAME, &network.host_mac);
        }
        RenderMode::Static => {
            let fragment = build(
                &network.stack,
                &network.families,
                INTERFACE_NAME,
                &network.host_mac,
            )?;
            doc.line(0, "networkConfig:");
            write_network_config(&mut doc, &LAYOUT, &fragment);
        }
    }

    Ok(doc.finish())
}
