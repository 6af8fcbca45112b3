use anyhow::Result;
use clap::Parser;

use crate::console::{self, ConsoleCliArgs, ConsoleConfig};

const USAGE: &str = "Usage: airmap [serve [flags]]\n\n\
Commands:\n  serve    Start the airport map console (default)\n  help     Show this message\n\n\
Run `airmap serve --help` for the flag list. Every flag has an AIRMAP_*\n\
environment variable fallback.";

pub fn handle_commands(args: &[String]) -> Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let cli = ConsoleCliArgs::parse_from(&args[1..]);
            console::run(ConsoleConfig::try_from(cli)?)?;
            Ok(true)
        }
        Some("help") | Some("--help") | Some("-h") => {
            println!("{USAGE}");
            Ok(true)
        }
        _ => Ok(false),
    }
}
