//! Command line parsing.

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: capy-launcher [--packages DIR] [--config FILE] <command>

Commands:
  list [--json]                 List installed icon packs
  icon <pack> <app> [--out FILE] Write the pack's icon for an app as PNG
                                (default <app>.png, stdout when piped)
  export <pack> [--out DIR]     Write the pack's icon for every installed app

Environment:
  CAPY_PACKAGES_DIR             Installed packages root
  RUST_LOG                      Log filter (default: info)";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    List { json: bool },
    Icon { pack: String, app: String, out: Option<PathBuf> },
    Export { pack: String, out: PathBuf },
    Help,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Args {
    pub packages: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub command: Command,
}

pub fn parse() -> Result<Args, pico_args::Error> {
    parse_from(pico_args::Arguments::from_env())
}

fn parse_from(mut args: pico_args::Arguments) -> Result<Args, pico_args::Error> {
    let help = args.contains(["-h", "--help"]);
    let packages = args.opt_value_from_str("--packages")?;
    let config = args.opt_value_from_str("--config")?;

    let command = if help {
        Command::Help
    } else {
        match args.subcommand()?.as_deref() {
            Some("list") => Command::List {
                json: args.contains("--json"),
            },
            Some("icon") => {
                let out = args.opt_value_from_str("--out")?;
                Command::Icon {
                    pack: args.free_from_str()?,
                    app: args.free_from_str()?,
                    out,
                }
            }
            Some("export") => {
                let out: Option<PathBuf> = args.opt_value_from_str("--out")?;
                Command::Export {
                    pack: args.free_from_str()?,
                    out: out.unwrap_or_else(|| PathBuf::from(".")),
                }
            }
            Some(other) => {
                return Err(pico_args::Error::ArgumentParsingFailed {
                    cause: format!("unknown command '{}'", other),
                });
            }
            None => Command::Help,
        }
    };

    let rest = args.finish();
    if !rest.is_empty() {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: format!("unexpected arguments: {:?}", rest),
        });
    }

    Ok(Args {
        packages,
        config,
        command,
    })
}
