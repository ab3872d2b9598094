//! Inbound conversion: `EngineSettings` → `ProposalSettings`.
//!
//! Reads the settings the engine worked with back into the user-facing
//! model, e.g. to show the user what the current proposal was computed from.
//! Converting the result forward again yields the same engine settings.
//!
//! The space policy cannot be recovered from a resolved action map, so the
//! result always uses the `custom` policy with the engine's actions.

use crate::config_file::Configuration;
use crate::engine::settings::{EngineSettings, EngineVolume};
use crate::settings::{EncryptionSettings, LvmSettings, ProposalSettings, SpaceSettings};
use crate::types::SpacePolicy;
use crate::volume::Volume;

/// Convert engine settings back into proposal settings.
pub fn from_engine_settings(engine: &EngineSettings, config: &Configuration) -> ProposalSettings {
    ProposalSettings {
        boot_device: engine.root_device.clone(),
        lvm: LvmSettings {
            enabled: engine.lvm,
            system_vg_devices: system_vg_devices(engine),
        },
        encryption: EncryptionSettings {
            password: engine.encryption_password.clone(),
            method: engine.encryption_method,
            pbkd_function: engine.encryption_pbkdf,
        },
        space: SpaceSettings {
            policy: SpacePolicy::Custom,
            actions: engine.space_settings.actions.clone(),
        },
        volumes: engine
            .proposed_volumes()
            .map(|volume| to_volume(volume, engine, config))
            .collect(),
    }
}

/// Candidates only become VG devices when they differ from what the boot
/// device alone would give.
fn system_vg_devices(engine: &EngineSettings) -> Vec<String> {
    if engine.lvm && engine.candidate_devices.as_slice() != engine.root_device.as_slice() {
        engine.candidate_devices.clone()
    } else {
        Vec::new()
    }
}

fn to_volume(source: &EngineVolume, engine: &EngineSettings, config: &Configuration) -> Volume {
    let mount_point = source.mount_point.as_str();
    let mut volume = config.default_volume(mount_point);
    let auto_size = !source.ignore_fallback_sizes;

    volume.mount_options = source.mount_options.clone();
    volume.device = source.device.clone();
    volume.fs_type = source.fs_type;
    volume.min_size = source.min_size;
    volume.max_size = source.max_size;
    volume.auto_size = auto_size;
    volume.snapshots = source.snapshots;

    let outline = &mut volume.outline;
    outline.required = !source.proposed_configurable;
    outline.filesystems = source.fs_types.clone();
    outline.adjust_by_ram = source.adjust_by_ram;
    outline.snapshots_configurable = source.snapshots_configurable;
    outline.support_auto_size |= auto_size;
    outline.min_size_fallback_for = fallback_targets(engine, |v| &v.fallback_for_min_size, mount_point);
    outline.max_size_fallback_for = fallback_targets(engine, |v| &v.fallback_for_max_size, mount_point);

    volume
}

/// Mount points whose fallback field (picked by `field`) names `mount_point`
fn fallback_targets<F>(engine: &EngineSettings, field: F, mount_point: &str) -> Vec<String>
where
    F: Fn(&EngineVolume) -> &Option<String>,
{
    engine
        .volumes
        .iter()
        .filter(|v| field(v).as_deref() == Some(mount_point))
        .map(|v| v.mount_point.clone())
        .collect()
}
