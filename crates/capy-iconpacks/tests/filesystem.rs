//! End-to-end tests against packages installed in a temporary directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use capy_iconpacks::{FsRegistry, IconPackConfig, IconPackManager};
use image::{Rgba, RgbaImage};

fn install(root: &Path, package_id: &str, manifest: &str) {
    let dir = root.join(package_id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("package.json"), manifest).unwrap();
}

fn install_pack(root: &Path, package_id: &str, label: &str, appfilter: &str) {
    install(
        root,
        package_id,
        &format!(
            r#"{{"label": "{}", "activities": [
                {{"name": ".Adw", "actions": ["org.adw.launcher.THEMES"]}},
                {{"name": ".Go", "actions": ["com.gau.go.launcherex.theme"]}}
            ]}}"#,
            label
        ),
    );
    let assets = root.join(package_id).join("assets");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("appfilter.xml"), appfilter).unwrap();
}

fn install_app(root: &Path, package_id: &str) {
    install(
        root,
        package_id,
        r#"{"activities": [{"name": ".Main",
            "actions": ["android.intent.action.MAIN"],
            "categories": ["android.intent.category.LAUNCHER"]}]}"#,
    );
}

fn manager(root: &Path) -> IconPackManager {
    IconPackManager::new(Arc::new(FsRegistry::new(root)), IconPackConfig::default())
}

#[test]
fn test_list_installed_packs() {
    let root = tempfile::tempdir().unwrap();
    install_pack(root.path(), "com.zed.icons", "zed Icons", "<resources/>");
    install_pack(root.path(), "com.arc.icons", "Arc Icons", "<resources/>");
    install_pack(root.path(), "com.mid.icons", "mid icons", "<resources/>");
    install(root.path(), "com.broken.icons", "{oops");
    install_app(root.path(), "app.pkg");

    let names: Vec<_> = manager(root.path())
        .list_icon_packs()
        .unwrap()
        .into_iter()
        .map(|p| p.display_name)
        .collect();

    assert_eq!(names, ["Arc Icons", "mid icons", "zed Icons"]);
}

#[test]
fn test_icon_from_installed_pack() {
    let root = tempfile::tempdir().unwrap();
    install_pack(
        root.path(),
        "com.arc.icons",
        "Arc Icons",
        r#"<?xml version="1.0" encoding="utf-8"?>
        <resources>
            <item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="app_pkg" />
            <item component="ComponentInfo{app.tinted/app.tinted.Main}" drawable="tinted" />
        </resources>"#,
    );
    let drawables = root.path().join("com.arc.icons/res/drawable-xxhdpi");
    fs::create_dir_all(&drawables).unwrap();
    RgbaImage::from_pixel(48, 48, Rgba([0, 128, 255, 255]))
        .save(drawables.join("app_pkg.png"))
        .unwrap();
    fs::write(drawables.join("tinted.color"), "#00ff00").unwrap();
    install_app(root.path(), "app.pkg");
    install_app(root.path(), "app.tinted");
    install_app(root.path(), "app.plain");

    let manager = manager(root.path());

    let png = manager.get_icon_for_app("com.arc.icons", "app.pkg").unwrap().unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (48, 48));

    let png = manager.get_icon_for_app("com.arc.icons", "app.tinted").unwrap().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (192, 192));
    assert_eq!(*decoded.get_pixel(0, 0), Rgba([0, 255, 0, 255]));

    assert!(manager.get_icon_for_app("com.arc.icons", "app.plain").unwrap().is_none());
    assert!(manager.get_icon_for_app("com.missing", "app.pkg").unwrap_err().is_not_found());
}

#[test]
fn test_pack_without_descriptor_resolves_nothing() {
    let root = tempfile::tempdir().unwrap();
    install(
        root.path(),
        "com.bare.icons",
        r#"{"label": "Bare", "activities": [{"name": ".Adw", "actions": ["org.adw.launcher.THEMES"]}]}"#,
    );
    install_app(root.path(), "app.pkg");

    let manager = manager(root.path());
    assert_eq!(manager.list_icon_packs().unwrap().len(), 1);
    assert!(manager.get_icon_for_app("com.bare.icons", "app.pkg").unwrap().is_none());
    assert!(manager.cache().get_or_build("com.bare.icons").unwrap().mapping.is_empty());
}
