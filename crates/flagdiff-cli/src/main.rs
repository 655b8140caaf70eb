//! flagdiff CLI
//!
//! Compares feature-flag snapshots stored as JSON files.

use clap::{Parser, Subcommand, ValueEnum};
use flagdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "flagdiff")]
#[command(about = "flagdiff - Feature-flag snapshot comparison", long_about = None)]
struct Cli {
    /// Logging profile
    #[arg(
        long,
        value_enum,
        global = true,
        env = "FLAGDIFF_LOG_PROFILE",
        default_value = "quiet"
    )]
    log_profile: LogProfile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    /// Human-readable logs on stderr
    Dev,
    /// JSON logs on stderr
    Prod,
    /// No log output
    Quiet,
}

impl From<LogProfile> for Profile {
    fn from(p: LogProfile) -> Self {
        match p {
            LogProfile::Dev => Profile::Development,
            LogProfile::Prod => Profile::Production,
            LogProfile::Quiet => Profile::Test,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two snapshots (live vs proposed)
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_profile.into());

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
