// Integration tests for the settings conversion
//
// These tests run the public API end to end against the JSON fixtures:
// - Candidate device resolution
// - Space policy expansion over a device graph
// - Template merging and size fallbacks
// - Reverse conversion and the proposal session

use std::collections::BTreeMap;
use std::path::PathBuf;

use storage_proposal::{
    Configuration, Devicegraph, DevicegraphQuery, EncryptionMethod, PbkdFunction, ProposalSession,
    ProposalSettings, SpaceAction, SpacePolicy, SpaceStrategy, StorageError, SwapReuse, Volume,
    from_engine_settings, to_engine_settings,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn devicegraph() -> Devicegraph {
    Devicegraph::load_from_file(fixture("plain-partitions.json")).expect("fixture should load") // test: fixture
}

fn product() -> Configuration {
    Configuration::load_from_file(fixture("product.json")).expect("fixture should load") // test: fixture
}

struct Unavailable;

impl DevicegraphQuery for Unavailable {
    fn devices_in_use(&self, _devices: &[String]) -> Result<Vec<String>, StorageError> {
        Err(StorageError::devicegraph_unavailable("snapshot not taken"))
    }
}

/// The settings of the reference scenario
fn scenario_settings() -> ProposalSettings {
    let mut settings = ProposalSettings::new();
    settings.boot_device = Some("/dev/sda".to_string());
    settings.lvm.enabled = true;
    settings.lvm.system_vg_devices = vec!["/dev/sda".to_string(), "/dev/sdb".to_string()];
    settings.encryption.password = Some("notsecret".to_string());
    settings.encryption.method = Some(EncryptionMethod::Luks2);
    settings.encryption.pbkd_function = Some(PbkdFunction::Argon2id);
    settings.space.policy = SpacePolicy::Custom;
    settings.space.actions = BTreeMap::from([("/dev/sda".to_string(), SpaceAction::ForceDelete)]);
    let mut volume = Volume::new("/test");
    volume.device = Some("/dev/sdc".to_string());
    settings.volumes = vec![volume];
    settings
}

#[test]
fn test_reference_scenario() {
    let engine = to_engine_settings(&scenario_settings(), &Configuration::default(), &devicegraph())
        .expect("conversion should succeed"); // test: known-good input

    assert_eq!(engine.candidate_devices, vec!["/dev/sda", "/dev/sdb"]);
    assert_eq!(engine.root_device.as_deref(), Some("/dev/sda"));
    assert_eq!(engine.swap_reuse, SwapReuse::None);
    assert!(engine.lvm && engine.separate_vgs && !engine.lvm_vg_reuse);
    assert_eq!(engine.encryption_pbkdf, Some(PbkdFunction::Argon2id));
    assert_eq!(engine.space_settings.strategy, SpaceStrategy::BiggerResize);
    assert_eq!(
        engine.space_settings.actions,
        BTreeMap::from([("/dev/sda".to_string(), SpaceAction::ForceDelete)])
    );
    assert!(engine.volume("/test").expect("volume /test").proposed); // test: known mount point
}

#[test]
fn test_delete_policy_over_devicegraph() {
    let mut settings = scenario_settings();
    settings.space.policy = SpacePolicy::Delete;

    let engine = to_engine_settings(&settings, &Configuration::default(), &devicegraph()).unwrap();
    let expected: BTreeMap<String, SpaceAction> =
        ["/dev/sda1", "/dev/sda2", "/dev/sda3", "/dev/sdb", "/dev/sdc"]
            .iter()
            .map(|d| (d.to_string(), SpaceAction::ForceDelete))
            .collect();
    assert_eq!(engine.space_settings.actions, expected);
}

#[test]
fn test_resize_policy_over_devicegraph() {
    let mut settings = scenario_settings();
    settings.space.policy = SpacePolicy::Resize;

    let engine = to_engine_settings(&settings, &Configuration::default(), &devicegraph()).unwrap();
    assert_eq!(engine.space_settings.actions.len(), 5);
    assert!(engine.space_settings.actions.values().all(|a| *a == SpaceAction::Resize));
}

#[test]
fn test_keep_policy_over_devicegraph() {
    let mut settings = scenario_settings();
    settings.space.policy = SpacePolicy::Keep;

    let engine = to_engine_settings(&settings, &Configuration::default(), &devicegraph()).unwrap();
    assert!(engine.space_settings.actions.is_empty());
}

#[test]
fn test_devicegraph_failure_aborts_conversion() {
    let mut settings = scenario_settings();
    settings.space.policy = SpacePolicy::Delete;

    let result = to_engine_settings(&settings, &Configuration::default(), &Unavailable);
    assert!(matches!(result, Err(StorageError::DevicegraphUnavailable(_))));
}

#[test]
fn test_custom_policy_never_queries_devicegraph() {
    let result = to_engine_settings(&scenario_settings(), &Configuration::default(), &Unavailable);
    assert!(result.is_ok());
}

#[test]
fn test_templates_are_merged() {
    let engine = to_engine_settings(&scenario_settings(), &product(), &devicegraph()).unwrap();

    let summary: Vec<(&str, bool)> = engine
        .volumes
        .iter()
        .map(|v| (v.mount_point.as_str(), v.proposed))
        .collect();
    assert_eq!(
        summary,
        vec![("/test", true), ("/", false), ("/home", false), ("swap", false)]
    );
}

#[test]
fn test_template_fallbacks_reach_home() {
    let config = product();
    let mut settings = ProposalSettings::from_config(&config);
    settings.boot_device = Some("/dev/sdd".to_string());

    let engine = to_engine_settings(&settings, &config, &devicegraph()).unwrap();

    let home = engine.volume("/home").unwrap();
    assert!(!home.proposed);
    assert_eq!(home.fallback_for_min_size.as_deref(), Some("/"));
    assert_eq!(home.fallback_for_max_size.as_deref(), Some("/"));
    assert_eq!(home.fallback_for_max_size_lvm.as_deref(), Some("/"));

    let root = engine.volume("/").unwrap();
    assert!(root.proposed);
    assert!(!root.proposed_configurable);
    assert!(root.snapshots);
    assert_eq!(root.max_size_lvm, Some(10737418240));
    assert_eq!(root.fallback_for_min_size, None);

    // sdd holds no data, so the delete policy has nothing to act on
    assert!(engine.space_settings.actions.is_empty());
}

#[test]
fn test_reverse_conversion_round_trip() {
    let config = product();
    let graph = devicegraph();
    let mut settings = ProposalSettings::from_config(&config);
    settings.boot_device = Some("/dev/sda".to_string());
    settings.encryption.password = Some("notsecret".to_string());

    let engine = to_engine_settings(&settings, &config, &graph).unwrap();
    let read_back = from_engine_settings(&engine, &config);

    assert_eq!(read_back.space.policy, SpacePolicy::Custom);
    assert_eq!(read_back.volumes.len(), 2);
    assert_eq!(to_engine_settings(&read_back, &config, &graph).unwrap(), engine);
}

#[test]
fn test_session_with_product_defaults() {
    let mut session = ProposalSession::new(product());
    let mut settings = session.default_settings();
    settings.boot_device = Some("/dev/sda".to_string());

    let engine = session.calculate(settings, &devicegraph()).unwrap();
    assert_eq!(engine.candidate_devices, vec!["/dev/sda"]);
    assert_eq!(engine.space_settings.actions.len(), 3);
    assert_eq!(engine.encryption_method, Some(EncryptionMethod::Luks2));

    assert_eq!(session.product_mount_points(), vec!["/", "/home", "swap"]);
}

#[test]
fn test_settings_file_round_trip() {
    use std::io::Write;

    let settings = scenario_settings();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&settings).unwrap().as_bytes()).unwrap();

    let loaded = ProposalSettings::load_from_file(file.path()).unwrap();
    assert_eq!(loaded, settings);
}
