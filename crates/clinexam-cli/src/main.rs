use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clinexam_cli::commands;
use clinexam_cli::config::{self, LogFormat};
use clinexam_core::models::domain::Domain;
use clinexam_engine::Engine;
use eyre::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clinexam")]
#[command(version)]
#[command(about = "Clinical scores, alerts, protocols and triage from an examination snapshot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered scales
    Scales {
        /// Only scales from this domain
        #[arg(short, long)]
        domain: Option<Domain>,
    },

    /// Compute one scale over a snapshot
    Score {
        /// Scale id, e.g. child_pugh
        scale_id: String,

        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Run the full engine over a snapshot
    Recompute {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Set one leaf by dotted path and write the snapshot back
    Set {
        /// Snapshot JSON file (created if missing)
        snapshot: PathBuf,

        /// Dotted field path, e.g. vitals.systolic_bp
        path: String,

        /// Leaf value as JSON: true, 85, "ruq", ["epistaxis"]
        value: String,
    },

    /// Build the completion payload for a finished assessment
    Complete {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;
    init_tracing(config.log_format);
    if let Some(from) = config.migrated_from {
        tracing::info!(from, to = config::CURRENT_VERSION, "migrated config");
    }

    let pretty = cli.pretty || config.pretty;
    let engine = Engine::new(config.engine_config());

    let output = match cli.command {
        Commands::Scales { domain } => commands::to_json(&commands::list_scales(domain), pretty)?,
        Commands::Score { scale_id, snapshot } => {
            commands::to_json(&commands::score(&scale_id, &snapshot)?, pretty)?
        }
        Commands::Recompute { snapshot } => {
            commands::to_json(&commands::recompute(&engine, &snapshot)?, pretty)?
        }
        Commands::Set {
            snapshot,
            path,
            value,
        } => commands::to_json(&commands::set_leaf(&snapshot, &path, &value)?, pretty)?,
        Commands::Complete { snapshot, output } => {
            let payload = commands::complete(&engine, &snapshot)?;
            let json = commands::to_json(&payload, pretty)?;
            if let Some(path) = output {
                commands::write_atomic(&path, &json)?;
                tracing::info!(path = %path.display(), "completion payload written");
                return Ok(());
            }
            json
        }
    };

    println!("{output}");
    Ok(())
}
