//! Candidate-device resolution.
//!
//! | LVM     | System VG devices | Boot device | Candidates          |
//! |---------|-------------------|-------------|---------------------|
//! | enabled | non-empty         | any         | system VG devices   |
//! | any     | empty / disabled  | present     | boot device         |
//! | any     | empty / disabled  | absent      | none                |
//!
//! Zero candidates is not an error: the engine decides what to do with it.

use std::collections::HashSet;

use crate::settings::ProposalSettings;

/// Resolve the devices the proposal may use.
///
/// The first matching row of the table above wins. Input order is kept and
/// duplicated device names are dropped.
pub fn resolve_candidate_devices(settings: &ProposalSettings) -> Vec<String> {
    let lvm = &settings.lvm;

    let candidates: Vec<String> = if lvm.enabled && !lvm.system_vg_devices.is_empty() {
        lvm.system_vg_devices.clone()
    } else {
        settings.boot_device.iter().cloned().collect()
    };

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|d| seen.insert(d.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(lvm: bool, vg_devices: &[&str], boot: Option<&str>) -> ProposalSettings {
        let mut settings = ProposalSettings::new();
        settings.lvm.enabled = lvm;
        settings.lvm.system_vg_devices = vg_devices.iter().map(|d| d.to_string()).collect();
        settings.boot_device = boot.map(str::to_string);
        settings
    }

    #[test]
    fn test_lvm_with_vg_devices_uses_vg_devices() {
        let settings = settings(true, &["/dev/sdb", "/dev/sdc"], Some("/dev/sda"));
        assert_eq!(resolve_candidate_devices(&settings), vec!["/dev/sdb", "/dev/sdc"]);
    }

    #[test]
    fn test_lvm_without_vg_devices_uses_boot_device() {
        let settings = settings(true, &[], Some("/dev/sda"));
        assert_eq!(resolve_candidate_devices(&settings), vec!["/dev/sda"]);
    }

    #[test]
    fn test_lvm_without_vg_devices_nor_boot_device() {
        let settings = settings(true, &[], None);
        assert!(resolve_candidate_devices(&settings).is_empty());
    }

    #[test]
    fn test_no_lvm_ignores_vg_devices() {
        let settings = settings(false, &["/dev/sdb"], Some("/dev/sda"));
        assert_eq!(resolve_candidate_devices(&settings), vec!["/dev/sda"]);
    }

    #[test]
    fn test_no_lvm_nor_boot_device() {
        let settings = settings(false, &["/dev/sdb"], None);
        assert!(resolve_candidate_devices(&settings).is_empty());
    }

    #[test]
    fn test_duplicated_vg_devices_are_dropped() {
        let settings = settings(true, &["/dev/sdb", "/dev/sda", "/dev/sdb"], None);
        assert_eq!(resolve_candidate_devices(&settings), vec!["/dev/sdb", "/dev/sda"]);
    }
}
