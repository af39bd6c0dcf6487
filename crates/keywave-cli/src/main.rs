//! Keywave CLI - play a monophonic synthesizer from the computer keyboard.

mod commands;
mod menu;
mod piano_roll;
mod session;
mod terminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keywave")]
#[command(author, version, about = "Keywave terminal synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive player
    Play(commands::play::PlayArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Solve the kick decay factor for a note
    Kick(commands::kick::KickArgs),

    /// Print the piano key table
    Notes(commands::notes::NotesArgs),

    /// Manage the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => commands::play::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Kick(args) => commands::kick::run(args),
        Commands::Notes(args) => commands::notes::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
