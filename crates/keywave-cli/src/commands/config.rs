//! Configuration file management command.

use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand};
use keywave_config::{SynthConfig, config_file_path};

use super::common::load_config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Where to write (defaults to the user config file)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Configuration file to read
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the user configuration file path
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Init { path, force } => {
            let path = path.unwrap_or_else(config_file_path);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            SynthConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommand::Show { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
        ConfigCommand::Path => {
            println!("{}", config_file_path().display());
        }
    }
    Ok(())
}
