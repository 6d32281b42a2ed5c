//! Path helpers for XDG directories.

use std::path::PathBuf;

/// Overrides the installed packages root.
pub const PACKAGES_ENV: &str = "CAPY_PACKAGES_DIR";

const APP_DIR: &str = "CapyLauncher";

/// Drawable directories, highest density first. Earlier directories win.
pub const DRAWABLE_DIRS: [&str; 7] = [
    "drawable-xxxhdpi",
    "drawable-xxhdpi",
    "drawable-xhdpi",
    "drawable-hdpi",
    "drawable-mdpi",
    "drawable-nodpi",
    "drawable",
];

/// Root holding one directory per installed package.
/// `$CAPY_PACKAGES_DIR`, else `$XDG_DATA_HOME/CapyLauncher/packages`.
pub fn get_packages_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os(PACKAGES_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    let data_home = dirs::data_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(".local/share")
    });
    data_home.join(APP_DIR).join("packages")
}

/// Default launcher config file, `$XDG_CONFIG_HOME/CapyLauncher/config.json`.
pub fn get_config_path() -> PathBuf {
    let config_home = dirs::config_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_default();
        PathBuf::from(home).join(".config")
    });
    config_home.join(APP_DIR).join("config.json")
}

/// Whether `name` is a single plain path component.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
