//! earshot CLI - harmonic analysis and HRTF spatial rendering.

mod commands;
mod report;

use clap::{Parser, Subcommand};
use earshot_config::EarshotConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "earshot")]
#[command(author, version, about = "Harmonic analyzer and HRTF spatializer", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the user configuration, if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the harmonics of one WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Analyze every file matching a glob pattern and write reports
    Batch(commands::batch::BatchArgs),

    /// Map frequencies to equal-tempered notes
    Note(commands::note::NoteArgs),

    /// List the strongest spectral peaks of a WAV file
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// Cut a WAV file into numbered segments
    Split(commands::split::SplitArgs),

    /// Show the head-related impulse response for one direction
    Hrir(commands::hrir::HrirArgs),

    /// Compare analog and digital head-shadow responses
    Response(commands::response::ResponseArgs),

    /// Render sources at azimuths to stereo WAV
    Spatialize(commands::spatialize::SpatializeArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    // Logs go to stderr so reports and tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let (config, source) = EarshotConfig::resolve(cli.config.as_deref())?;
    match &source {
        Some(path) => tracing::info!(path = %path.display(), "using configuration file"),
        None => tracing::debug!("using built-in configuration"),
    }

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, config),
        Commands::Batch(args) => commands::batch::run(args, config),
        Commands::Note(args) => commands::note::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args, config),
        Commands::Info(args) => commands::info::run(args, config),
        Commands::Split(args) => commands::split::run(args),
        Commands::Hrir(args) => commands::hrir::run(args, config),
        Commands::Response(args) => commands::response::run(args, config),
        Commands::Spatialize(args) => commands::spatialize::run(args, config),
        Commands::Generate(args) => commands::generate::run(args, config),
    }
}
