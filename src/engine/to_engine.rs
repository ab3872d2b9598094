//! Outbound conversion: `ProposalSettings` → `EngineSettings`.
//!
//! # Steps
//!
//! 1. Candidate devices (`logic::candidates`)
//! 2. Space actions (`logic::space_policy`), the only step that queries the
//!    device graph
//! 3. Volumes and fallbacks (`logic::volumes`)
//! 4. Flat fields copied from the settings
//!
//! # What This Explicitly Refuses To Do
//!
//! - Mutate the device graph or the settings
//! - Retry a failed device graph query
//! - Configure separate VGs or VG reuse independently: `separate_vgs`
//!   follows `lvm` and `lvm_vg_reuse` is always off

use crate::config_file::Configuration;
use crate::devicegraph::DevicegraphQuery;
use crate::engine::settings::EngineSettings;
use crate::error::Result;
use crate::logic::candidates::resolve_candidate_devices;
use crate::logic::space_policy::resolve_space_settings;
use crate::logic::volumes::resolve_volumes;
use crate::settings::ProposalSettings;
use crate::types::SwapReuse;

/// Convert proposal settings into engine settings.
///
/// # Errors
///
/// Only fails when the device graph cannot be queried; the whole conversion
/// is aborted in that case.
pub fn to_engine_settings(
    settings: &ProposalSettings,
    config: &Configuration,
    devicegraph: &dyn DevicegraphQuery,
) -> Result<EngineSettings> {
    let candidate_devices = resolve_candidate_devices(settings);
    if candidate_devices.is_empty() {
        tracing::warn!("No candidate devices: neither a boot device nor system VG devices given");
    }
    let space_settings = resolve_space_settings(settings, &candidate_devices, devicegraph)?;
    let volumes = resolve_volumes(&settings.volumes, config);

    tracing::debug!(
        "Converted settings: {} candidate(s), {} space action(s), {} volume(s)",
        candidate_devices.len(),
        space_settings.actions.len(),
        volumes.len()
    );

    let encryption = &settings.encryption;
    Ok(EngineSettings {
        candidate_devices,
        root_device: settings.boot_device.clone(),
        swap_reuse: SwapReuse::None,
        lvm: settings.lvm.enabled,
        separate_vgs: settings.lvm.enabled,
        lvm_vg_reuse: false,
        encryption_password: encryption.password.clone(),
        encryption_method: encryption.method,
        encryption_pbkdf: encryption.pbkd_function,
        space_settings,
        volumes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devicegraph::tests::plain_partitions;
    use crate::types::{EncryptionMethod, PbkdFunction, SpaceAction, SpacePolicy, SpaceStrategy};
    use crate::volume::Volume;
    use std::collections::BTreeMap;

    fn settings() -> ProposalSettings {
        let mut settings = ProposalSettings::new();
        settings.boot_device = Some("/dev/sda".to_string());
        settings.lvm.enabled = true;
        settings.lvm.system_vg_devices = vec!["/dev/sda".to_string(), "/dev/sdb".to_string()];
        settings.encryption.password = Some("notsecret".to_string());
        settings.encryption.method = Some(EncryptionMethod::Luks2);
        settings.encryption.pbkd_function = Some(PbkdFunction::Argon2id);
        settings.space.policy = SpacePolicy::Custom;
        settings.space.actions =
            BTreeMap::from([("/dev/sda".to_string(), SpaceAction::ForceDelete)]);
        let mut volume = Volume::new("/test");
        volume.device = Some("/dev/sdc".to_string());
        settings.volumes = vec![volume];
        settings
    }

    #[test]
    fn test_converts_settings() {
        let engine =
            to_engine_settings(&settings(), &Configuration::default(), &plain_partitions())
                .expect("conversion failed"); // test: known-good input

        assert_eq!(engine.candidate_devices, vec!["/dev/sda", "/dev/sdb"]);
        assert_eq!(engine.root_device.as_deref(), Some("/dev/sda"));
        assert_eq!(engine.swap_reuse, SwapReuse::None);
        assert!(engine.lvm);
        assert!(engine.separate_vgs);
        assert!(!engine.lvm_vg_reuse);
        assert_eq!(engine.encryption_password.as_deref(), Some("notsecret"));
        assert_eq!(engine.encryption_method, Some(EncryptionMethod::Luks2));
        assert_eq!(engine.encryption_pbkdf, Some(PbkdFunction::Argon2id));
        assert_eq!(engine.space_settings.strategy, SpaceStrategy::BiggerResize);
        assert_eq!(
            engine.space_settings.actions,
            BTreeMap::from([("/dev/sda".to_string(), SpaceAction::ForceDelete)])
        );

        let test = engine.volume("/test").expect("volume converted"); // test: known mount point
        assert!(test.proposed);
        assert_eq!(test.device.as_deref(), Some("/dev/sdc"));
    }

    #[test]
    fn test_separate_vgs_follows_lvm() {
        let mut settings = settings();
        settings.lvm.enabled = false;
        let engine =
            to_engine_settings(&settings, &Configuration::default(), &plain_partitions()).unwrap();

        assert!(!engine.lvm);
        assert!(!engine.separate_vgs);
        assert!(!engine.lvm_vg_reuse);
        assert_eq!(engine.candidate_devices, vec!["/dev/sda"]);
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let mut settings = settings();
        settings.space.policy = SpacePolicy::Delete;
        let config = Configuration::default();
        let graph = plain_partitions();

        let first = to_engine_settings(&settings, &config, &graph).unwrap();
        let second = to_engine_settings(&settings, &config, &graph).unwrap();
        assert_eq!(first, second);
    }
}
