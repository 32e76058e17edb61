use clap::{Parser, Subcommand};
use quadcrack::config::InputPaths;
use std::process::ExitCode;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Quadgram hill-climbing solver for substitution ciphers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    paths: InputPaths,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for the substitution key
    Crack(cmd::crack::CrackArgs),
    /// Apply a known key and score the result
    Decrypt(cmd::decrypt::DecryptArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Initializing quadcrack...");

    let result = match cli.command {
        Commands::Crack(args) => cmd::crack::run(args, &cli.paths, cli.debug),
        Commands::Decrypt(args) => cmd::decrypt::run(args, &cli.paths),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ CRITICAL ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
