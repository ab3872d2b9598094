//! Space-policy resolution.
//!
//! Expands the declarative space policy into the per-device action map the
//! engine understands. The engine is always asked for the `bigger_resize`
//! strategy; the policy only decides which actions are forced.
//!
//! | Policy   | Actions                                   |
//! |----------|-------------------------------------------|
//! | `keep`   | none                                      |
//! | `resize` | `resize` for every device in use          |
//! | `delete` | `force_delete` for every device in use    |
//! | `custom` | the caller's actions, unchanged           |

use std::collections::{BTreeMap, HashSet};

use crate::devicegraph::DevicegraphQuery;
use crate::engine::settings::EngineSpaceSettings;
use crate::error::Result;
use crate::settings::ProposalSettings;
use crate::types::{SpaceAction, SpacePolicy, SpaceStrategy};

/// Resolve the space settings for the engine.
///
/// Devices in use are looked up on the candidate devices plus the devices
/// the installation touches (boot device, system VG devices, explicit volume
/// devices). With no candidates the action map is always empty.
///
/// # Errors
///
/// Propagates the device graph failure; no partial action map is returned.
pub fn resolve_space_settings(
    settings: &ProposalSettings,
    candidates: &[String],
    devicegraph: &dyn DevicegraphQuery,
) -> Result<EngineSpaceSettings> {
    let actions = if candidates.is_empty() {
        BTreeMap::new()
    } else {
        resolve_actions(settings, candidates, devicegraph)?
    };

    Ok(EngineSpaceSettings {
        strategy: SpaceStrategy::BiggerResize,
        actions,
    })
}

fn resolve_actions(
    settings: &ProposalSettings,
    candidates: &[String],
    devicegraph: &dyn DevicegraphQuery,
) -> Result<BTreeMap<String, SpaceAction>> {
    let action = match settings.space.policy {
        SpacePolicy::Custom => return Ok(settings.space.actions.clone()),
        SpacePolicy::Keep => return Ok(BTreeMap::new()),
        SpacePolicy::Resize => SpaceAction::Resize,
        SpacePolicy::Delete => SpaceAction::ForceDelete,
    };

    let used = devicegraph.devices_in_use(&query_devices(settings, candidates))?;
    tracing::debug!(
        "Space policy {} applies {} to {} device(s)",
        settings.space.policy,
        action,
        used.len()
    );

    Ok(used.into_iter().map(|device| (device, action)).collect())
}

/// Candidates first, then the installation devices, without duplicates
fn query_devices(settings: &ProposalSettings, candidates: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .cloned()
        .chain(settings.installation_devices())
        .filter(|d| seen.insert(d.clone()))
        .collect()
}
