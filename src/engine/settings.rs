//! Settings handed to the external storage-proposal engine.
//!
//! Field names follow the engine's own naming and are a hard compatibility
//! boundary: they are serialized exactly as declared here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::types::{
    EncryptionMethod, Filesystem, PbkdFunction, SpaceAction, SpaceStrategy, SwapReuse,
};

/// How the engine makes space on the candidate devices
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineSpaceSettings {
    pub strategy: SpaceStrategy,
    pub actions: BTreeMap<String, SpaceAction>,
}

/// Resolved volume descriptor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineVolume {
    pub mount_point: String,
    /// Whether the user requested the volume
    pub proposed: bool,
    pub proposed_configurable: bool,
    pub device: Option<String>,
    pub mount_options: Vec<String>,
    pub fs_type: Option<Filesystem>,
    pub fs_types: Vec<Filesystem>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
    pub max_size_lvm: Option<u64>,
    pub snapshots: bool,
    pub snapshots_configurable: bool,
    pub adjust_by_ram: bool,
    pub ignore_fallback_sizes: bool,
    pub ignore_adjust_by_ram: bool,
    /// Mount point whose min size this volume inherits when it is not proposed
    pub fallback_for_min_size: Option<String>,
    pub fallback_for_max_size: Option<String>,
    pub fallback_for_max_size_lvm: Option<String>,
}

/// Complete input of the storage-proposal engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineSettings {
    pub candidate_devices: Vec<String>,
    pub root_device: Option<String>,
    pub swap_reuse: SwapReuse,
    pub lvm: bool,
    pub separate_vgs: bool,
    pub lvm_vg_reuse: bool,
    pub encryption_password: Option<String>,
    pub encryption_method: Option<EncryptionMethod>,
    pub encryption_pbkdf: Option<PbkdFunction>,
    pub space_settings: EngineSpaceSettings,
    pub volumes: Vec<EngineVolume>,
}

impl EngineSettings {
    /// Volume descriptor for the given mount point
    pub fn volume(&self, mount_point: &str) -> Option<&EngineVolume> {
        self.volumes.iter().find(|v| v.mount_point == mount_point)
    }

    /// Whether a non-empty encryption password is set
    pub fn encrypt(&self) -> bool {
        self.encryption_password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Volumes the user requested
    pub fn proposed_volumes(&self) -> impl Iterator<Item = &EngineVolume> {
        self.volumes.iter().filter(|v| v.proposed)
    }
}

impl fmt::Display for EngineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine settings:")?;
        writeln!(f, "  Candidates: {}", self.candidate_devices.join(", "))?;
        writeln!(f, "  Root device: {}", self.root_device.as_deref().unwrap_or("-"))?;
        writeln!(f, "  LVM: {} (separate VGs: {})", self.lvm, self.separate_vgs)?;
        writeln!(f, "  Encrypted: {}", self.encrypt())?;
        writeln!(f, "  Space strategy: {}", self.space_settings.strategy)?;
        for (device, action) in &self.space_settings.actions {
            writeln!(f, "    {} -> {}", device, action)?;
        }
        write!(f, "  Volumes ({}):", self.volumes.len())?;
        for volume in &self.volumes {
            write!(
                f,
                "\n    {}{}",
                volume.mount_point,
                if volume.proposed { "" } else { " (not proposed)" }
            )?;
        }
        Ok(())
    }
}
