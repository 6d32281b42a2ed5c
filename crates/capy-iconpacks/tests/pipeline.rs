//! End-to-end resolution tests against the in-memory registry.

use std::sync::Arc;
use std::thread;

use capy_iconpacks::memory::{MemoryPackage, MemoryRegistry, MemoryResources};
use capy_iconpacks::{IconPackConfig, IconPackError, IconPackManager};
use image::{Rgba, RgbaImage};

const ADW: &str = "org.adw.launcher.THEMES";

fn manager(registry: MemoryRegistry) -> IconPackManager {
    IconPackManager::new(Arc::new(registry), IconPackConfig::default())
}

fn app() -> MemoryPackage {
    MemoryPackage::new("app.pkg").label("App").launchable("app.pkg.Main")
}

#[test]
fn test_mapped_bitmap_round_trips_as_png() {
    let pack = MemoryResources::new()
        .asset(
            "appfilter.xml",
            r#"<item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_app"/>"#,
        )
        .bitmap("icon_app", RgbaImage::from_pixel(48, 48, Rgba([255, 128, 0, 255])));
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").handles(ADW).resources(pack))
            .with_package(app()),
    );

    let png = manager.get_icon_for_app("pack.one", "app.pkg").unwrap().unwrap();
    assert!(!png.is_empty());

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (48, 48));
    assert_eq!(*decoded.get_pixel(24, 24), Rgba([255, 128, 0, 255]));
}

#[test]
fn test_duplicate_component_keeps_first_drawable() {
    let pack = MemoryResources::new()
        .asset(
            "appfilter.xml",
            r#"<resources>
                <item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_first"/>
                <item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_second"/>
            </resources>"#,
        )
        .bitmap("icon_first", RgbaImage::from_pixel(10, 10, Rgba([1, 1, 1, 255])))
        .bitmap("icon_second", RgbaImage::from_pixel(20, 20, Rgba([2, 2, 2, 255])));
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").resources(pack))
            .with_package(app()),
    );

    let parsed = manager.cache().get_or_build("pack.one").unwrap();
    assert_eq!(parsed.mapping.len(), 1);
    assert_eq!(
        parsed.mapping.drawable_for("ComponentInfo{app.pkg/app.pkg.Main}"),
        Some("icon_first")
    );

    let png = manager.get_icon_for_app("pack.one", "app.pkg").unwrap().unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (10, 10));
}

#[test]
fn test_uninstalled_pack() {
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").label("One").handles(ADW))
            .with_package(app()),
    );

    let err = manager.get_icon_for_app("pack.gone", "app.pkg").unwrap_err();
    assert!(matches!(err, IconPackError::PackNotFound(ref id) if id == "pack.gone"));

    let packs = manager.list_icon_packs().unwrap();
    assert!(packs.iter().all(|p| p.package_id != "pack.gone"));
    assert_eq!(packs.len(), 1);
}

#[test]
fn test_sizeless_drawable_renders_at_fallback_size() {
    let pack = MemoryResources::new()
        .asset(
            "appfilter.xml",
            r#"<item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_fill"/>"#,
        )
        .color("icon_fill", Rgba([0, 0, 0, 255]));
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").resources(pack))
            .with_package(app()),
    );

    let png = manager.get_icon_for_app("pack.one", "app.pkg").unwrap().unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (192, 192));
}

#[test]
fn test_not_found_outcomes_are_not_errors() {
    let pack = MemoryResources::new().asset(
        "appfilter.xml",
        r#"<resources>
            <item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_missing"/>
        </resources>"#,
    );
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").resources(pack))
            .with_package(app())
            .with_package(MemoryPackage::new("app.headless"))
            .with_package(MemoryPackage::new("app.other").launchable(".Main")),
    );

    // blank ids
    assert_eq!(manager.get_icon_for_app(" ", "app.pkg").unwrap(), None);
    // no launch component
    assert_eq!(manager.get_icon_for_app("pack.one", "app.headless").unwrap(), None);
    // component absent from the mapping
    assert_eq!(manager.get_icon_for_app("pack.one", "app.other").unwrap(), None);
    // mapped drawable does not exist in the pack
    assert_eq!(manager.get_icon_for_app("pack.one", "app.pkg").unwrap(), None);
}

#[test]
fn test_only_exact_component_matches() {
    let pack = MemoryResources::new()
        .asset(
            "appfilter.xml",
            r#"<resources>
                <item component="ComponentInfo{app.pkg/app.pkg.Other}" drawable="icon_app"/>
                <item component="app.pkg" drawable="icon_app"/>
                <item component="ComponentInfo{app.pkg/.Main}" drawable="icon_app"/>
            </resources>"#,
        )
        .bitmap("icon_app", RgbaImage::new(4, 4));
    let manager = manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").resources(pack))
            .with_package(app()),
    );

    assert!(manager.resolve_icon("pack.one", "app.pkg").unwrap().is_none());
}

#[test]
fn test_repeated_resolution_parses_once() {
    let pack = MemoryResources::new().asset(
        "appfilter.xml",
        r#"<item component="ComponentInfo{app.pkg/app.pkg.Main}" drawable="icon_app"/>"#,
    );
    let opens = pack.open_counter();
    let manager = Arc::new(manager(
        MemoryRegistry::new()
            .with_package(MemoryPackage::new("pack.one").resources(pack))
            .with_package(MemoryPackage::new("pack.two"))
            .with_package(app()),
    ));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let manager = manager.clone();
            let pack_id = if i % 2 == 0 { "pack.one" } else { "pack.two" };
            thread::spawn(move || manager.resolve_icon(pack_id, "app.pkg").map(|a| a.is_some()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), false);
    }

    let first = manager.cache().get_or_build("pack.one").unwrap();
    let again = manager.cache().get_or_build("pack.one").unwrap();
    assert_eq!(first.mapping, again.mapping);
    assert_eq!(opens.get(), 1);
    assert_eq!(manager.cache().len(), 2);
}
