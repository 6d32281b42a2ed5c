//! Installed icon pack discovery.

use crate::error::IconPackError;
use crate::registry::PackageRegistry;
use crate::types::IconPack;
use log::{debug, info};
use std::collections::HashSet;

/// List installed icon packs, sorted by label ignoring case.
///
/// A package advertising several theme actions is listed once. Candidates
/// whose metadata cannot be read are dropped, though a later action may
/// still accept them; only a failing registry query fails the call.
pub fn list_icon_packs(
    registry: &dyn PackageRegistry,
    theme_actions: &[String],
) -> Result<Vec<IconPack>, IconPackError> {
    let mut seen = HashSet::new();
    let mut packs = Vec::new();

    for action in theme_actions {
        for activity in registry.query_intent_activities(action)? {
            if seen.contains(&activity.package_id) {
                continue;
            }

            match registry.application_info(&activity.package_id) {
                Ok(info) => {
                    seen.insert(activity.package_id);
                    packs.push(IconPack {
                        display_name: info.display_label().to_string(),
                        package_id: info.package_id,
                    });
                }
                Err(e) => debug!("Ignoring icon pack candidate {}: {}", activity.package_id, e),
            }
        }
    }

    packs.sort_by_cached_key(|p| p.display_name.to_lowercase());
    info!("Found {} icon packs", packs.len());
    Ok(packs)
}
