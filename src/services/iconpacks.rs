//! Icon pack service shim.
//!
//! Wraps the capy-iconpacks crate to provide pack listing, single icon lookup
//! and batch export.

use crate::config::LauncherConfig;
use capy_iconpacks::{FsRegistry, IconPack, IconPackError, IconPackManager};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Install the global icon pack manager over `packages_dir`.
/// Call this once from main before any lookup.
pub fn start(packages_dir: &Path, config: &LauncherConfig) {
    info!("Using packages in {}", packages_dir.display());

    let registry = FsRegistry::new(packages_dir);
    let manager = IconPackManager::new(Arc::new(registry), config.icon_packs.clone());
    if !capy_iconpacks::install_manager(manager) {
        warn!("Icon pack manager already started");
    }
}

/// Installed icon packs, sorted by label.
pub fn list_icon_packs() -> Result<Vec<IconPack>, IconPackError> {
    capy_iconpacks::list_icon_packs()
}

/// PNG bytes of `app_id`'s icon in `pack_id`.
pub fn get_icon_for_app(pack_id: &str, app_id: &str) -> Result<Option<Vec<u8>>, IconPackError> {
    capy_iconpacks::get_icon_for_app(pack_id, app_id)
}

/// Outcome of a batch export.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

/// Write `<app>.png` into `out_dir` for every installed app the pack has an icon for.
///
/// Apps are resolved on tokio's blocking pool, at most `jobs` at a time.
pub fn export_pack(
    manager: Arc<IconPackManager>,
    pack_id: &str,
    out_dir: &Path,
    jobs: usize,
) -> Result<ExportSummary, Box<dyn std::error::Error>> {
    // Fail fast on a missing pack instead of once per app.
    manager.cache().get_or_build(pack_id)?;
    let apps = manager.registry().installed_packages()?;
    fs::create_dir_all(out_dir)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .max_blocking_threads(jobs.max(1))
        .build()?;

    let summary = rt.block_on(async {
        let handles: Vec<_> = apps
            .into_iter()
            .filter(|app| app != pack_id)
            .map(|app| {
                let manager = manager.clone();
                let pack_id = pack_id.to_string();
                let path = out_dir.join(format!("{}.png", app));
                tokio::task::spawn_blocking(move || {
                    let icon = manager.get_icon_for_app(&pack_id, &app);
                    (app, path, icon)
                })
            })
            .collect();

        let mut summary = ExportSummary::default();
        for handle in handles {
            let (app, path, icon) = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    warn!("Export task failed: {}", e);
                    summary.failed += 1;
                    continue;
                }
            };

            match icon {
                Ok(Some(png)) => match fs::write(&path, png) {
                    Ok(()) => summary.written.push(path),
                    Err(e) => {
                        warn!("Cannot write {}: {}", path.display(), e);
                        summary.failed += 1;
                    }
                },
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    warn!("Cannot resolve icon for {}: {}", app, e);
                    summary.failed += 1;
                }
            }
        }
        summary
    });

    info!(
        "Exported {} icons from {} ({} without icon, {} failed)",
        summary.written.len(),
        pack_id,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}
