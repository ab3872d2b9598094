//! Type-safe enums shared by the settings model and the engine settings
//!
//! Every value that crosses the settings API or the engine boundary is an
//! enum here, so a typo in a policy or action name fails at parse time
//! instead of silently producing an unexpected proposal.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Filesystem type for a volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Filesystem {
    #[default]
    Btrfs,
    Ext2,
    Ext3,
    Ext4,
    Vfat,
    Xfs,
    Swap,
}

/// Declarative policy for making space on the candidate devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpacePolicy {
    /// Keep existing partitions unless the engine has no other choice
    #[default]
    Keep,
    /// Resize every used device
    Resize,
    /// Delete every used device
    Delete,
    /// Use the actions given by the caller
    Custom,
}

/// Action the engine applies to an existing device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpaceAction {
    /// Delete the device unconditionally
    ForceDelete,
    /// Shrink the device if space is needed
    Resize,
    /// Delete the device only if space is needed
    Delete,
}

/// Strategy the engine uses to find space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpaceStrategy {
    /// Prefer resizing over deleting, sized to fit
    #[default]
    BiggerResize,
}

/// Encryption method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EncryptionMethod {
    Luks1,
    #[default]
    Luks2,
    #[strum(serialize = "pervasive_luks2")]
    #[serde(rename = "pervasive_luks2")]
    PervasiveLuks2,
    TpmFde,
    ProtectedSwap,
    SecureSwap,
    RandomSwap,
}

/// Password-based key derivation function for LUKS2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PbkdFunction {
    #[default]
    Pbkdf2,
    Argon2i,
    Argon2id,
}

/// Whether the engine may reuse existing swap devices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwapReuse {
    #[default]
    None,
    Any,
    Candidate,
}
