//! Export of typed attributes as remotely readable properties.
//!
//! The settings model stays plain data. Exposing it over a bus is a separate
//! serialization step: a [`PropertySource`] turns an object into a map of
//! named properties, and an [`InterfaceRegistry`] holds the device
//! interfaces, each paired with the predicate deciding whether a device
//! implements it. The registry is evaluated once per device when the device
//! graph is discovered.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::devicegraph::{Content, DeviceRef, Devicegraph};
use crate::engine::settings::EngineSettings;
use crate::settings::ProposalSettings;

/// Property name → value
pub type PropertyMap = BTreeMap<String, Value>;

/// An object whose attributes are exported under one interface
pub trait PropertySource {
    fn interface(&self) -> &'static str;
    fn properties(&self) -> PropertyMap;
}

fn property_map<const N: usize>(entries: [(&str, Value); N]) -> PropertyMap {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

impl PropertySource for ProposalSettings {
    fn interface(&self) -> &'static str {
        "Storage1.Proposal.Settings"
    }

    fn properties(&self) -> PropertyMap {
        property_map([
            ("BootDevice", json!(self.boot_device.clone().unwrap_or_default())),
            ("LVM", json!(self.lvm.enabled)),
            ("SystemVGDevices", json!(self.lvm.system_vg_devices)),
            (
                "EncryptionPassword",
                json!(self.encryption.password.clone().unwrap_or_default()),
            ),
            (
                "EncryptionMethod",
                json!(self.encryption.method.map(|m| m.to_string()).unwrap_or_default()),
            ),
            (
                "EncryptionPBKDFunction",
                json!(self.encryption.pbkd_function.map(|f| f.to_string()).unwrap_or_default()),
            ),
            ("SpacePolicy", json!(self.space.policy.to_string())),
            ("SpaceActions", json!(self.space.actions)),
            ("Volumes", json!(self.volumes)),
        ])
    }
}

impl PropertySource for EngineSettings {
    fn interface(&self) -> &'static str {
        "Storage1.Proposal"
    }

    fn properties(&self) -> PropertyMap {
        let volumes: Vec<&str> = self.proposed_volumes().map(|v| v.mount_point.as_str()).collect();
        property_map([
            ("CandidateDevices", json!(self.candidate_devices)),
            ("RootDevice", json!(self.root_device.clone().unwrap_or_default())),
            ("LVM", json!(self.lvm)),
            ("SpaceStrategy", json!(self.space_settings.strategy.to_string())),
            ("SpaceActions", json!(self.space_settings.actions)),
            ("Volumes", json!(volumes)),
        ])
    }
}

/// An interface a device may implement
pub trait DeviceInterface: Send + Sync {
    fn name(&self) -> &'static str;
    /// Whether the device implements this interface
    fn applies_to(&self, device: &DeviceRef<'_>) -> bool;
    fn properties(&self, device: &DeviceRef<'_>) -> PropertyMap;
}

/// Every block device (disks and partitions)
pub struct BlockInterface;

impl DeviceInterface for BlockInterface {
    fn name(&self) -> &'static str {
        "Storage1.Block"
    }

    fn applies_to(&self, _device: &DeviceRef<'_>) -> bool {
        true
    }

    fn properties(&self, device: &DeviceRef<'_>) -> PropertyMap {
        let block = device.block();
        property_map([
            ("Name", json!(block.name)),
            ("Active", json!(block.active)),
            ("UdevIds", json!(block.udev_ids)),
            ("UdevPaths", json!(block.udev_paths)),
            ("Size", json!(block.size)),
            ("RecoverableSize", json!(block.recoverable_size)),
            ("Systems", json!(device.systems())),
        ])
    }
}

pub struct PartitionInterface;

impl DeviceInterface for PartitionInterface {
    fn name(&self) -> &'static str {
        "Storage1.Partition"
    }

    fn applies_to(&self, device: &DeviceRef<'_>) -> bool {
        matches!(device, DeviceRef::Partition { .. })
    }

    fn properties(&self, device: &DeviceRef<'_>) -> PropertyMap {
        property_map([("Device", json!(device.disk().block.name))])
    }
}

/// Devices used as LVM physical volumes
pub struct LvmPvInterface;

impl DeviceInterface for LvmPvInterface {
    fn name(&self) -> &'static str {
        "Storage1.LVM.PhysicalVolume"
    }

    fn applies_to(&self, device: &DeviceRef<'_>) -> bool {
        matches!(device.block().content, Some(Content::LvmPv { .. }))
    }

    fn properties(&self, device: &DeviceRef<'_>) -> PropertyMap {
        match &device.block().content {
            Some(Content::LvmPv { vg_name }) => property_map([("VolumeGroup", json!(vg_name))]),
            _ => PropertyMap::new(),
        }
    }
}

/// Formatted devices
pub struct FilesystemInterface;

impl DeviceInterface for FilesystemInterface {
    fn name(&self) -> &'static str {
        "Storage1.Filesystem"
    }

    fn applies_to(&self, device: &DeviceRef<'_>) -> bool {
        matches!(device.block().content, Some(Content::Filesystem { .. }))
    }

    fn properties(&self, device: &DeviceRef<'_>) -> PropertyMap {
        match &device.block().content {
            Some(Content::Filesystem { fs_type, label, .. }) => property_map([
                ("Type", json!(fs_type)),
                ("Label", json!(label.clone().unwrap_or_default())),
            ]),
            _ => PropertyMap::new(),
        }
    }
}

/// A device with the properties of every interface it implements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedDevice {
    pub name: String,
    pub interfaces: BTreeMap<&'static str, PropertyMap>,
}

impl ExportedDevice {
    pub fn implements(&self, interface: &str) -> bool {
        self.interfaces.contains_key(interface)
    }
}

/// Registered device interfaces, evaluated in registration order
#[derive(Default)]
pub struct InterfaceRegistry {
    interfaces: Vec<Box<dyn DeviceInterface>>,
}

impl InterfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in block, partition, LVM PV and filesystem interfaces
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BlockInterface));
        registry.register(Box::new(PartitionInterface));
        registry.register(Box::new(LvmPvInterface));
        registry.register(Box::new(FilesystemInterface));
        registry
    }

    pub fn register(&mut self, interface: Box<dyn DeviceInterface>) {
        self.interfaces.push(interface);
    }

    /// Export one device through the interfaces that apply to it
    pub fn export(&self, device: &DeviceRef<'_>) -> ExportedDevice {
        let interfaces = self
            .interfaces
            .iter()
            .filter(|i| i.applies_to(device))
            .map(|i| (i.name(), i.properties(device)))
            .collect();

        ExportedDevice {
            name: device.name().to_string(),
            interfaces,
        }
    }

    /// Export every device of the graph
    pub fn export_all(&self, devicegraph: &Devicegraph) -> Vec<ExportedDevice> {
        let exported: Vec<ExportedDevice> =
            devicegraph.devices().iter().map(|d| self.export(d)).collect();
        tracing::debug!("Exported {} device(s)", exported.len());
        exported
    }
}
