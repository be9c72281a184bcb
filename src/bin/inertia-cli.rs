use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use inertia_adapter::assets::{md5_file, md5_hex};
use inertia_adapter::config::{load_config, ConfigError};

#[derive(Parser)]
#[command(name = "inertia-cli")]
#[command(about = "Tooling for the Inertia adapter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the asset version the adapter would send
    Version {
        /// Hash the contents of this file (e.g. the bundler manifest)
        #[arg(short, long, conflicts_with = "value")]
        file: Option<PathBuf>,

        /// Hash this literal version string
        #[arg(short, long)]
        value: Option<String>,
    },
    /// Validate a config file
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Version { file, value } => {
            let version = match (file, value) {
                (Some(path), _) => match md5_file(&path) {
                    Ok(v) => v,
                    Err(e) => {
                        eprintln!("{}", e);
                        return ExitCode::FAILURE;
                    }
                },
                (None, Some(value)) => md5_hex(value),
                (None, None) => {
                    eprintln!("either --file or --value is required");
                    return ExitCode::FAILURE;
                }
            };
            println!("{}", version);
        }
        Commands::CheckConfig { path } => match load_config(&path) {
            Ok(_) => println!("{}: ok", path.display()),
            Err(ConfigError::Validation(errors)) => {
                for err in errors {
                    eprintln!("{}: {}", path.display(), err);
                }
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
