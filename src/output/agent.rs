//! AgentConfig for the live-agent install.

use super::nmstate::{write_network_config, NetworkLayout, RouteFields};
use super::Document;
use crate::config::{AgentInputs, RenderMode};
use crate::error::Result;
use crate::network::build;

pub const INTERFACE_NAME: &str = "eno1";

const LAYOUT: NetworkLayout = NetworkLayout {
    indent: 6,
    static_flags: false,
    route_fields: RouteFields::NextHopFirst,
};

pub fn render(inputs: AgentInputs) -> Result<String> {
    let network = &inputs.network;
    let mut doc = Document::new();

    doc.line(0, "apiVersion: v1alpha1");
    doc.line(0, "kind: AgentConfig");
    doc.line(0, "metadata:");
    doc.line(2, format!("name: {}-sno-cluster", inputs.vm_name));
    doc.line(0, format!("rendezvousIP: {}", inputs.rendezvous_ip));
    doc.line(0, "hosts:");
    doc.line(2, format!("- hostname: {}", inputs.vm_name));
    doc.line(4, "interfaces:");
    doc.line(6, format!("- name: {INTERFACE_NAME}"));
    doc.line(8, format!("macAddress: {}", network.host_mac));

    if network.mode == RenderMode::Static {
        let fragment = build(
            &network.stack,
            &network.families,
            INTERFACE_NAME,
            &network.host_mac,
        )?;
        doc.line(4, "networkConfig:");
        write_network_config(&mut doc, &LAYOUT, &fragment);
    }

    Ok(doc.finish())
}
