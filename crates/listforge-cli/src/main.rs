//! listforge developer CLI.
//!
//! Compiles a TOML list configuration and prints what the server would
//! expose: the GraphQL SDL or the admin metadata snapshot.

use clap::{Parser, Subcommand};
use listforge::{App, config::Config};
use std::{
    error::Error,
    io::{self, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "listforge", version, about = "Compile listforge list configurations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

///
/// Command
///

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the GraphQL SDL for every configured list.
    Sdl {
        #[arg(short, long, value_name = "FILE", env = "LISTFORGE_CONFIG")]
        config: PathBuf,
    },

    /// Print the admin metadata snapshot as JSON.
    AdminMeta {
        #[arg(short, long, value_name = "FILE", env = "LISTFORGE_CONFIG")]
        config: PathBuf,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli.command) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{output}").is_err() {
                return ExitCode::FAILURE;
            }

            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "listforge failed");
            eprintln!("error: {err}");

            ExitCode::FAILURE
        }
    }
}

fn run(command: &Command) -> Result<String, Box<dyn Error>> {
    match command {
        Command::Sdl { config } => Ok(load(config)?.schema_sdl()),
        Command::AdminMeta { config, pretty } => {
            let snapshot = load(config)?.admin_meta();
            let json = if *pretty {
                snapshot.to_json_pretty()?
            } else {
                snapshot.to_json()?
            };

            Ok(json)
        }
    }
}

fn load(path: &Path) -> Result<App, listforge::Error> {
    debug!(path = %path.display(), "loading config");
    let config = Config::load(path)?;

    App::from_config(&config)
}
