mod dashboard;
mod script;

use clap::{Parser, Subcommand};
use reelpulse_metrics::Period;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "reelpulse-cli")]
#[command(about = "ReelPulse command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Watch the performance panel for the connected social accounts.
    Dashboard {
        /// Reporting window: day, week, or month.
        #[arg(long, default_value = "month")]
        period: Period,
        /// Print one complete snapshot and exit.
        #[arg(long)]
        once: bool,
        /// Emit the rendered view as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Draft a video script from a prompt.
    Script {
        #[arg(long)]
        prompt: String,
        /// Target length in seconds.
        #[arg(long, default_value_t = 30)]
        duration: u32,
        #[arg(long)]
        style: String,
        #[arg(long)]
        tone: String,
        #[arg(long)]
        voice_gender: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        accent: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = reelpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Dashboard { period, once, json }) => {
            dashboard::run_dashboard(&config, period, once, json).await?;
        }
        Some(Commands::Script {
            prompt,
            duration,
            style,
            tone,
            voice_gender,
            language,
            accent,
        }) => {
            let request = reelpulse_scriptgen::ScriptRequest {
                prompt,
                duration,
                visual_style: style,
                tone,
                voice_gender,
                language,
                accent,
            };
            script::run_script(&config, &request).await?;
        }
        None => println!("reelpulse-cli: use `dashboard` or `script`; see --help"),
    }

    Ok(())
}
