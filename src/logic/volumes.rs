//! Volume and fallback resolution.
//!
//! Merges the user's volumes with the product's volume templates and
//! resolves the size fallbacks between them.
//!
//! # Resolution Rules
//!
//! 1. Every user volume is kept, in order, as proposed.
//! 2. Every template whose mount path the user did not request is added as a
//!    not-proposed volume, in configuration order. Templates without a mount
//!    path are skipped.
//! 3. If volume `V` lists `W` in `min_size_fallback_for`, then
//!    `W.fallback_for_min_size = V`. The same holds for
//!    `max_size_fallback_for`, which drives both `fallback_for_max_size` and
//!    `fallback_for_max_size_lvm`.
//! 4. When several volumes claim the same target, the last one in merged
//!    order wins. A volume never becomes its own fallback. References to
//!    unknown mount paths are ignored.

use std::collections::HashSet;

use crate::config_file::Configuration;
use crate::engine::settings::EngineVolume;
use crate::volume::Volume;

/// Resolve the final volume list for the engine.
pub fn resolve_volumes(volumes: &[Volume], config: &Configuration) -> Vec<EngineVolume> {
    let merged = merge_templates(volumes, config);

    let mut resolved: Vec<EngineVolume> = merged
        .iter()
        .map(|(volume, proposed)| to_engine_volume(volume, *proposed))
        .collect();

    for (source, _) in &merged {
        for target in resolved.iter_mut() {
            if source.is_min_size_fallback_for(&target.mount_point) {
                target.fallback_for_min_size = Some(source.mount_path.clone());
            }
            if source.is_max_size_fallback_for(&target.mount_point) {
                target.fallback_for_max_size = Some(source.mount_path.clone());
                target.fallback_for_max_size_lvm = Some(source.mount_path.clone());
            }
        }
    }

    resolved
}

/// User volumes (proposed) followed by the missing templates (not proposed)
fn merge_templates(volumes: &[Volume], config: &Configuration) -> Vec<(Volume, bool)> {
    let mut seen: HashSet<&str> = volumes.iter().map(|v| v.mount_path.as_str()).collect();
    let mut merged: Vec<(Volume, bool)> = volumes.iter().map(|v| (v.clone(), true)).collect();

    for template in config.volume_templates() {
        let Some(mount_path) = template.mount_path.as_deref() else {
            tracing::debug!("Skipping volume template without mount path");
            continue;
        };
        if !seen.insert(mount_path) {
            continue;
        }
        if let Some(volume) = template.to_volume() {
            merged.push((volume, false));
        }
    }

    merged
}

fn to_engine_volume(volume: &Volume, proposed: bool) -> EngineVolume {
    let auto_size = volume.auto_size();
    let outline = &volume.outline;

    EngineVolume {
        mount_point: volume.mount_path.clone(),
        proposed,
        proposed_configurable: !outline.required,
        device: volume.device.clone(),
        mount_options: volume.mount_options.clone(),
        fs_type: volume.fs_type,
        fs_types: outline.filesystems.clone(),
        min_size: volume.min_size,
        max_size: volume.max_size,
        max_size_lvm: volume.max_size,
        snapshots: volume.snapshots,
        snapshots_configurable: outline.snapshots_configurable,
        adjust_by_ram: outline.adjust_by_ram,
        ignore_fallback_sizes: !auto_size,
        ignore_adjust_by_ram: !auto_size,
        fallback_for_min_size: None,
        fallback_for_max_size: None,
        fallback_for_max_size_lvm: None,
    }
}
