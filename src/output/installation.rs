//! ImageBasedInstallationConfig for the image-based installer.

use super::nmstate::{write_network_config, NetworkLayout, RouteFields};
use super::Document;
use crate::config::{InstallationInputs, RenderMode};
use crate::error::Result;
use crate::network::build;

pub const INTERFACE_NAME: &str = "enp1s0";

const LAYOUT: NetworkLayout = NetworkLayout {
    indent: 2,
    static_flags: true,
    route_fields: RouteFields::DestinationFirst,
};

pub fn render(inputs: InstallationInputs) -> Result<String> {
    let network = &inputs.network;
    let mut doc = Document::new();

    doc.line(0, "apiVersion: v1beta1");
    doc.line(0, "kind: ImageBasedInstallationConfig");
    doc.line(0, "metadata:");
    doc.line(2, "name: image-based-installation-config");
    doc.line(0, format!("seedImage: {}", inputs.seed_image));
    doc.line(0, format!("seedVersion: {}", inputs.seed_version));
    doc.line(0, format!("installationDisk: {}", inputs.installation_disk));
    doc.line(0, format!("extraPartitionLabel: {}", inputs.extra_partition_label));
    doc.line(
        0,
        format!("extraPartitionStart: \"{}\"", inputs.extra_partition_start),
    );
    doc.literal_block(0, "pullSecret", &inputs.pull_secret);
    doc.literal_block(0, "sshKey", &inputs.ssh_key);

    // DHCP keeps the document free of any networkConfig.
    if network.mode == RenderMode::Static {
        let fragment = build(
            &network.stack,
            &network.families,
            INTERFACE_NAME,
            &network.host_mac,
        )?;
        doc.line(0, "networkConfig:");
        write_network_config(&mut doc, &LAYOUT, &fragment);
    }

    Ok(doc.finish())
}
