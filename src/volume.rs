//! Volumes: one requested mount point with its size and type constraints.
//!
//! A `Volume` is what the user (or the product configuration) asks for. The
//! `VolumeOutline` describes what may be changed about it and which other
//! volumes inherit its size limits when they are not proposed.

use serde::{Deserialize, Serialize};

use crate::types::Filesystem;

/// Properties of a volume that come from the product, not from the user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeOutline {
    /// Whether the volume must always be proposed
    pub required: bool,
    /// Filesystem types the user may choose from
    pub filesystems: Vec<Filesystem>,
    /// Whether the engine may grow the volume to the size of the RAM
    pub adjust_by_ram: bool,
    /// Whether sizes may be computed automatically
    pub support_auto_size: bool,
    /// Whether snapshots can be switched on and off
    pub snapshots_configurable: bool,
    /// Mount paths whose min size is added to this volume when they are not proposed
    pub min_size_fallback_for: Vec<String>,
    /// Mount paths whose max size is added to this volume when they are not proposed
    pub max_size_fallback_for: Vec<String>,
}

/// A single mount point requested for the proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Mount path, e.g. `/`, `/home` or `swap`. Unique within the settings.
    pub mount_path: String,
    #[serde(default)]
    pub mount_options: Vec<String>,
    /// Explicit target device, overriding the candidate devices
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub fs_type: Option<Filesystem>,
    /// Minimum size in bytes
    #[serde(default)]
    pub min_size: Option<u64>,
    /// Maximum size in bytes (`None` means unlimited)
    #[serde(default)]
    pub max_size: Option<u64>,
    #[serde(default)]
    pub auto_size: bool,
    #[serde(default)]
    pub snapshots: bool,
    #[serde(default)]
    pub outline: VolumeOutline,
}

impl Volume {
    /// Create a volume for the given mount path with no constraints.
    pub fn new(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            mount_options: Vec::new(),
            device: None,
            fs_type: None,
            min_size: None,
            max_size: None,
            auto_size: false,
            snapshots: false,
            outline: VolumeOutline::default(),
        }
    }

    /// Whether this volume inherits the min size of `mount_path` when that one is missing
    pub fn is_min_size_fallback_for(&self, mount_path: &str) -> bool {
        self.mount_path != mount_path
            && self.outline.min_size_fallback_for.iter().any(|p| p == mount_path)
    }

    /// Whether this volume inherits the max size of `mount_path` when that one is missing
    pub fn is_max_size_fallback_for(&self, mount_path: &str) -> bool {
        self.mount_path != mount_path
            && self.outline.max_size_fallback_for.iter().any(|p| p == mount_path)
    }

    /// Whether auto size is both requested and supported
    pub fn auto_size(&self) -> bool {
        self.auto_size && self.outline.support_auto_size
    }
}
