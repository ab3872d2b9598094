//! Logic modules: resolve declarative settings into concrete engine input.
//!
//! Each resolver handles one concern of the outbound conversion and is a pure
//! function of its inputs (plus the read-only device graph query).
//!
//! # Modules
//!
//! - `candidates`: candidate devices from LVM and boot device settings
//! - `space_policy`: space policy to per-device action map
//! - `volumes`: template merging and size fallbacks

pub mod candidates;
pub mod space_policy;
pub mod volumes;
