//! User-facing proposal settings.
//!
//! `ProposalSettings` is what the frontend sends on every settings update.
//! It is replaced as a whole, never patched field by field, and is treated as
//! an immutable snapshot while a conversion runs.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::config_file::Configuration;
use crate::error::{Result, StorageError};
use crate::types::{EncryptionMethod, PbkdFunction, SpaceAction, SpacePolicy};
use crate::volume::Volume;

/// LVM settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LvmSettings {
    pub enabled: bool,
    /// Devices for the system volume group
    pub system_vg_devices: Vec<String>,
}

/// Encryption settings. No password means no encryption.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncryptionSettings {
    pub password: Option<String>,
    pub method: Option<EncryptionMethod>,
    pub pbkd_function: Option<PbkdFunction>,
}

impl EncryptionSettings {
    /// Whether a non-empty password was given
    pub fn encrypt(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Space settings. `actions` is only meaningful for [`SpacePolicy::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceSettings {
    pub policy: SpacePolicy,
    pub actions: BTreeMap<String, SpaceAction>,
}

/// Settings of a storage proposal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProposalSettings {
    pub boot_device: Option<String>,
    pub lvm: LvmSettings,
    pub encryption: EncryptionSettings,
    pub space: SpaceSettings,
    pub volumes: Vec<Volume>,
}

impl ProposalSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings for the product.
    ///
    /// LVM, space policy and encryption defaults come from the storage
    /// section; volumes are the default mount paths built from their templates.
    pub fn from_config(config: &Configuration) -> Self {
        let storage = &config.storage;
        Self {
            boot_device: None,
            lvm: LvmSettings {
                enabled: storage.lvm,
                system_vg_devices: Vec::new(),
            },
            encryption: EncryptionSettings {
                password: None,
                method: storage.encryption.method,
                pbkd_function: storage.encryption.pbkd_function,
            },
            space: SpaceSettings {
                policy: storage.space_policy,
                actions: BTreeMap::new(),
            },
            volumes: config
                .default_mount_paths()
                .iter()
                .map(|path| config.default_volume(path))
                .collect(),
        }
    }

    /// Load settings from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Volume for the given mount path, if requested
    pub fn volume(&self, mount_path: &str) -> Option<&Volume> {
        self.volumes.iter().find(|v| v.mount_path == mount_path)
    }

    /// Devices the installation touches: boot device, system VG devices and
    /// the explicit devices of the volumes, without duplicates.
    pub fn installation_devices(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let lvm_devices: &[String] = if self.lvm.enabled {
            self.lvm.system_vg_devices.as_slice()
        } else {
            &[]
        };

        self.boot_device
            .iter()
            .chain(lvm_devices)
            .chain(self.volumes.iter().filter_map(|v| v.device.as_ref()))
            .filter(|d| seen.insert(d.as_str()))
            .cloned()
            .collect()
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let mut mount_paths = HashSet::new();
        for volume in &self.volumes {
            if volume.mount_path.trim().is_empty() {
                return Err(StorageError::validation("Volume mount path must be specified"));
            }
            if !mount_paths.insert(volume.mount_path.as_str()) {
                return Err(StorageError::validation(format!(
                    "Mount path {} is requested more than once",
                    volume.mount_path
                )));
            }
        }

        if self.lvm.system_vg_devices.iter().any(|d| d.trim().is_empty()) {
            return Err(StorageError::validation("System VG device names cannot be empty"));
        }

        Ok(())
    }
}
