//! Proposal session: the live settings of one installation.
//!
//! The session owns the product configuration, the settings currently in
//! effect and the engine settings derived from them. Each update replaces
//! the settings as a whole. Updates take `&mut self`, so only one
//! conversion per session can be in flight.

use strum::IntoEnumIterator;

use crate::config_file::Configuration;
use crate::devicegraph::{Devicegraph, DevicegraphQuery};
use crate::engine::settings::EngineSettings;
use crate::engine::to_engine::to_engine_settings;
use crate::error::Result;
use crate::settings::ProposalSettings;
use crate::types::EncryptionMethod;
use crate::volume::Volume;

/// Storage proposal state of one installation session
#[derive(Debug, Clone)]
pub struct ProposalSession {
    config: Configuration,
    settings: Option<ProposalSettings>,
    engine_settings: Option<EngineSettings>,
}

impl ProposalSession {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            settings: None,
            engine_settings: None,
        }
    }

    /// Settings to start from when the user has not changed anything yet
    pub fn default_settings(&self) -> ProposalSettings {
        ProposalSettings::from_config(&self.config)
    }

    /// Replace the settings and recompute the engine settings.
    ///
    /// The settings are validated first. On failure the previous settings
    /// and engine settings stay in place.
    pub fn calculate(
        &mut self,
        settings: ProposalSettings,
        devicegraph: &dyn DevicegraphQuery,
    ) -> Result<&EngineSettings> {
        settings.validate()?;
        let engine_settings = to_engine_settings(&settings, &self.config, devicegraph)?;

        tracing::info!(
            "Proposal settings updated: {} candidate device(s), space policy {}, encrypted: {}",
            engine_settings.candidate_devices.len(),
            settings.space.policy,
            settings.encryption.encrypt()
        );

        self.settings = Some(settings);
        Ok(self.engine_settings.insert(engine_settings))
    }

    /// Settings of the last successful calculation
    pub fn settings(&self) -> Option<&ProposalSettings> {
        self.settings.as_ref()
    }

    /// Engine settings of the last successful calculation
    pub fn engine_settings(&self) -> Option<&EngineSettings> {
        self.engine_settings.as_ref()
    }

    /// Default volume the frontend offers when adding a mount point
    pub fn default_volume(&self, mount_path: &str) -> Volume {
        self.config.default_volume(mount_path)
    }

    /// Mount paths the product defines templates for
    pub fn product_mount_points(&self) -> Vec<String> {
        self.config
            .volume_templates()
            .iter()
            .filter_map(|t| t.mount_path.clone())
            .collect()
    }

    /// Devices the user can pick as boot or system VG devices: the active
    /// disks of the device graph, in graph order
    pub fn available_devices(&self, devicegraph: &Devicegraph) -> Vec<String> {
        devicegraph
            .disks
            .iter()
            .filter(|disk| disk.block.active)
            .map(|disk| disk.block.name.clone())
            .collect()
    }

    /// Encryption methods the user can choose from
    pub fn encryption_methods(&self) -> Vec<EncryptionMethod> {
        EncryptionMethod::iter().collect()
    }
}
