//! Product configuration: volume templates and storage defaults.
//!
//! The configuration is a JSON document with a `storage` section. Every
//! field is optional; missing sections fall back to the defaults below.
//!
//! ```json
//! {
//!   "storage": {
//!     "lvm": false,
//!     "space_policy": "delete",
//!     "encryption": { "method": "luks2", "pbkd_function": "pbkdf2" },
//!     "volumes": ["/", "swap"],
//!     "volume_templates": [
//!       { "mount_path": "/", "filesystem": "btrfs", "outline": { "required": true } }
//!     ]
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{EncryptionMethod, Filesystem, PbkdFunction, SpacePolicy};
use crate::volume::{Volume, VolumeOutline};

/// Installer product configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub storage: StorageConfig,
}

/// The `storage` section of the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Whether LVM is enabled by default
    pub lvm: bool,
    pub space_policy: SpacePolicy,
    pub encryption: EncryptionConfig,
    /// Mount paths proposed by default
    pub volumes: Vec<String>,
    pub volume_templates: Vec<VolumeTemplate>,
}

/// Default encryption settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncryptionConfig {
    pub method: Option<EncryptionMethod>,
    pub pbkd_function: Option<PbkdFunction>,
}

/// Default definition of a volume for a mount path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeTemplate {
    /// Templates without a mount path cannot be resolved to a volume
    pub mount_path: Option<String>,
    pub mount_options: Vec<String>,
    pub filesystem: Option<Filesystem>,
    pub size: TemplateSize,
    pub btrfs: TemplateBtrfs,
    pub outline: TemplateOutline,
}

/// Size defaults of a template (bytes)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSize {
    pub auto: bool,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateBtrfs {
    pub snapshots: bool,
}

/// Outline of a template, in configuration (snake_case) form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOutline {
    pub required: bool,
    pub filesystems: Vec<Filesystem>,
    pub adjust_by_ram: bool,
    pub auto_size: bool,
    pub snapshots_configurable: bool,
    pub min_size_fallback_for: Vec<String>,
    pub max_size_fallback_for: Vec<String>,
}

impl From<&TemplateOutline> for VolumeOutline {
    fn from(outline: &TemplateOutline) -> Self {
        Self {
            required: outline.required,
            filesystems: outline.filesystems.clone(),
            adjust_by_ram: outline.adjust_by_ram,
            support_auto_size: outline.auto_size,
            snapshots_configurable: outline.snapshots_configurable,
            min_size_fallback_for: outline.min_size_fallback_for.clone(),
            max_size_fallback_for: outline.max_size_fallback_for.clone(),
        }
    }
}

impl VolumeTemplate {
    /// Build the default volume described by this template.
    ///
    /// Returns `None` for templates without a mount path.
    pub fn to_volume(&self) -> Option<Volume> {
        let mount_path = self.mount_path.as_ref()?;
        let mut volume = Volume::new(mount_path.clone());
        volume.mount_options = self.mount_options.clone();
        volume.fs_type = self.filesystem;
        volume.min_size = self.size.min;
        volume.max_size = self.size.max;
        volume.auto_size = self.size.auto;
        volume.snapshots = self.btrfs.snapshots;
        volume.outline = VolumeOutline::from(&self.outline);
        Some(volume)
    }
}

impl Configuration {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Volume templates declared by the product, in declaration order
    pub fn volume_templates(&self) -> &[VolumeTemplate] {
        &self.storage.volume_templates
    }

    /// Template for the given mount path, if any
    pub fn template_for(&self, mount_path: &str) -> Option<&VolumeTemplate> {
        self.volume_templates()
            .iter()
            .find(|t| t.mount_path.as_deref() == Some(mount_path))
    }

    /// Default volume for a mount path.
    ///
    /// Uses the matching template; mount paths unknown to the product get a
    /// volume with no constraints.
    pub fn default_volume(&self, mount_path: &str) -> Volume {
        self.template_for(mount_path)
            .and_then(VolumeTemplate::to_volume)
            .unwrap_or_else(|| Volume::new(mount_path))
    }

    /// Mount paths proposed by default
    pub fn default_mount_paths(&self) -> &[String] {
        &self.storage.volumes
    }
}
