//! Storage proposal settings engine
//!
//! Translates the user-facing description of the desired disk layout into
//! the settings consumed by an external storage-proposal engine, and back.

pub mod cli;
pub mod config_file;
pub mod devicegraph;
pub mod engine;
pub mod error;
pub mod export;
pub mod logic;
pub mod proposal;
pub mod settings;
pub mod types;
pub mod volume;

// Re-export main types for convenience
pub use config_file::{Configuration, VolumeTemplate};
pub use devicegraph::{DeviceRef, Devicegraph, DevicegraphQuery};
pub use engine::from_engine::from_engine_settings;
pub use engine::settings::{EngineSettings, EngineSpaceSettings, EngineVolume};
pub use engine::to_engine::to_engine_settings;
pub use error::StorageError;
pub use export::{ExportedDevice, InterfaceRegistry, PropertySource};
pub use proposal::ProposalSession;
pub use settings::{EncryptionSettings, LvmSettings, ProposalSettings, SpaceSettings};
pub use types::{
    EncryptionMethod, Filesystem, PbkdFunction, SpaceAction, SpacePolicy, SpaceStrategy, SwapReuse,
};
pub use volume::{Volume, VolumeOutline};
