//! CapyLauncher - icon pack front-end for the Capy launcher
//!
//! Lists installed icon packs and extracts per-app icons from them as PNG.

mod cli;
mod config;
mod services;

use cli::Command;
use config::LauncherConfig;
use log::info;
use services::iconpacks;
use std::error::Error;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(capy_iconpacks::paths::get_config_path);
    let config = LauncherConfig::load(&config_path);

    let packages_dir = args
        .packages
        .clone()
        .or_else(|| config.packages_dir.clone())
        .unwrap_or_else(capy_iconpacks::paths::get_packages_directory);
    iconpacks::start(&packages_dir, &config);

    match args.command {
        Command::List { json } => {
            let packs = iconpacks::list_icon_packs()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&packs)?);
            } else if packs.is_empty() {
                println!("No icon packs installed.");
            } else {
                for pack in &packs {
                    println!("{:<40} {}", pack.package_id, pack.display_name);
                }
            }
        }
        Command::Icon { pack, app, out } => {
            let Some(png) = iconpacks::get_icon_for_app(&pack, &app)? else {
                eprintln!("{} has no icon for {}", pack, app);
                std::process::exit(1);
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, &png)?;
                    info!("Wrote {} ({} bytes)", path.display(), png.len());
                }
                None => {
                    let path = PathBuf::from(format!("{}.png", app));
                    if std::io::stdout().is_terminal() {
                        std::fs::write(&path, &png)?;
                        info!("Wrote {} ({} bytes)", path.display(), png.len());
                    } else {
                        std::io::stdout().lock().write_all(&png)?;
                    }
                }
            }
        }
        Command::Export { pack, out } => {
            let summary = iconpacks::export_pack(
                capy_iconpacks::get_manager(),
                &pack,
                &out,
                config.export_jobs(),
            )?;
            println!(
                "{} icons written to {} ({} apps without icon, {} failed)",
                summary.written.len(),
                out.display(),
                summary.skipped,
                summary.failed
            );
        }
        Command::Help => println!("{}", cli::USAGE),
    }

    Ok(())
}
