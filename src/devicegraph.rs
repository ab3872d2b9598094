//! Device graph snapshot and the query the proposal needs from it.
//!
//! The real device graph belongs to the storage library. The proposal only
//! asks one question of it: which existing devices are in use on a set of
//! disks. [`DevicegraphQuery`] is that seam; [`Devicegraph`] is an in-memory
//! snapshot (loadable from JSON) taken once per proposal session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error;

/// Read-only query against the system's device graph.
pub trait DevicegraphQuery {
    /// Names of the devices holding existing data on the given devices.
    ///
    /// A disk with partitions contributes its partitions, a disk without
    /// partitions contributes itself if it has content. The result is sorted
    /// and contains no duplicates.
    fn devices_in_use(&self, devices: &[String]) -> error::Result<Vec<String>>;
}

/// What lives directly on a block device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Filesystem {
        fs_type: String,
        #[serde(default)]
        label: Option<String>,
        /// Name of the operating system installed on the filesystem
        #[serde(default)]
        system_name: Option<String>,
    },
    LvmPv {
        vg_name: String,
    },
}

fn default_active() -> bool {
    true
}

/// Attributes common to disks and partitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDevice {
    pub name: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub udev_ids: Vec<String>,
    #[serde(default)]
    pub udev_paths: Vec<String>,
    /// Bytes that could be reclaimed by shrinking the device
    #[serde(default)]
    pub recoverable_size: u64,
    #[serde(default)]
    pub content: Option<Content>,
}

impl BlockDevice {
    fn system_name(&self) -> Option<&str> {
        match &self.content {
            Some(Content::Filesystem { system_name, .. }) => system_name.as_deref(),
            _ => None,
        }
    }
}

/// A disk and its partitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    #[serde(flatten)]
    pub block: BlockDevice,
    #[serde(default)]
    pub partitions: Vec<BlockDevice>,
}

/// Borrowed view of any device in the graph
#[derive(Debug, Clone, Copy)]
pub enum DeviceRef<'a> {
    Disk(&'a Disk),
    Partition {
        disk: &'a Disk,
        partition: &'a BlockDevice,
    },
}

impl<'a> DeviceRef<'a> {
    pub fn block(&self) -> &'a BlockDevice {
        match *self {
            Self::Disk(disk) => &disk.block,
            Self::Partition { partition, .. } => partition,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.block().name
    }

    /// The disk this device belongs to (itself for disks)
    pub fn disk(&self) -> &'a Disk {
        match *self {
            Self::Disk(disk) => disk,
            Self::Partition { disk, .. } => disk,
        }
    }

    /// Names of the systems installed on the device or its descendants
    pub fn systems(&self) -> Vec<String> {
        match *self {
            Self::Disk(disk) => std::iter::once(&disk.block)
                .chain(&disk.partitions)
                .filter_map(BlockDevice::system_name)
                .map(str::to_string)
                .collect(),
            Self::Partition { partition, .. } => {
                partition.system_name().map(str::to_string).into_iter().collect()
            }
        }
    }
}

/// In-memory snapshot of the system's block devices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devicegraph {
    #[serde(default)]
    pub disks: Vec<Disk>,
}

impl Devicegraph {
    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read device graph from {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse device graph JSON")
    }

    /// All devices, disks first followed by their partitions
    pub fn devices(&self) -> Vec<DeviceRef<'_>> {
        self.disks
            .iter()
            .flat_map(|disk| {
                std::iter::once(DeviceRef::Disk(disk)).chain(
                    disk.partitions
                        .iter()
                        .map(move |partition| DeviceRef::Partition { disk, partition }),
                )
            })
            .collect()
    }

    /// Find a device by name
    pub fn find(&self, name: &str) -> Option<DeviceRef<'_>> {
        self.devices().into_iter().find(|d| d.name() == name)
    }
}

impl DevicegraphQuery for Devicegraph {
    fn devices_in_use(&self, devices: &[String]) -> error::Result<Vec<String>> {
        let mut used = BTreeSet::new();

        for name in devices {
            match self.find(name) {
                Some(DeviceRef::Disk(disk)) if !disk.partitions.is_empty() => {
                    used.extend(disk.partitions.iter().map(|p| p.name.clone()));
                }
                Some(device) if device.block().content.is_some() => {
                    used.insert(device.name().to_string());
                }
                Some(_) => {}
                None => tracing::debug!("Device {} not found in the device graph", name),
            }
        }

        Ok(used.into_iter().collect())
    }
}
