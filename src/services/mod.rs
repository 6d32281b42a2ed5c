//! Shared services for CapyLauncher.
//!
//! - `iconpacks` - Icon pack discovery and per-app icon lookup

pub mod iconpacks;
