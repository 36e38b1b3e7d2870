use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "assistme")]
#[command(about = "AssistMe - voice commands and accessibility controls")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.assistme/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive voice session on the console (type what you would say)
    Run,

    /// Classify a single utterance and print the resulting intent
    Classify {
        /// The transcript to classify
        text: String,

        /// Locale whose rule table is used (en, es, fr, de)
        #[arg(long)]
        locale: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the active intent rules in priority order
    Rules {
        /// Locale whose rule table is listed
        #[arg(long)]
        locale: Option<String>,
    },

    /// Initialize a new ~/.assistme/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Classify { text, locale, json }) => {
            cli::classify::classify_command(config_path, &text, locale.as_deref(), json)?;
        }
        Some(Commands::Rules { locale }) => {
            cli::rules::rules_command(config_path, locale.as_deref())?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(cli.config.clone(), force).await?;
        }
        Some(Commands::Run) | None => {
            // Default: interactive session
            cli::run::run_command(config_path).await?;
        }
    }

    Ok(())
}
