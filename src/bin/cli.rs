//! Orion CLI
//!
//! Command-line interface for Orion operations:
//! - Analyze text
//! - Get the sentiment of text
//! - Render the dashboard charts to SVG files
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use orion::charts::{ChartKind, LabelPrecision};
use orion::config::{generate_default_config, Config};
use orion::panels::{ChartPanel, InteractionPanel};
use orion::service::AnalyticsClient;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "orion-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI text analysis and query insights from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analytics service origin
    #[arg(long, global = true)]
    pub service_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a response for some text
    Analyze {
        /// Text to analyze
        text: String,
    },

    /// Get the sentiment label of some text
    Sentiment {
        /// Text to classify
        text: String,
    },

    /// Fetch the analytics datasets and write the four charts as SVG
    Render {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Donut label precision (whole, tenth)
        #[arg(short, long)]
        precision: Option<LabelPrecision>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.service_url {
        config.service.base_url = url;
    }

    orion::init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Analyze { text } => {
            let panel = InteractionPanel::new(client(&config)?);
            let state = panel.submit_analysis(&text).await;
            println!("{}", state.response_text);
        }

        Commands::Sentiment { text } => {
            let panel = InteractionPanel::new(client(&config)?);
            let state = panel.submit_sentiment(&text).await;
            match state.sentiment_tone() {
                Some(tone) => println!("{} ({:?})", state.sentiment_text, tone),
                None => println!("{}", state.sentiment_text),
            }
        }

        Commands::Render { out, precision } => {
            let mut options = config.dashboard.chart_options();
            if let Some(precision) = precision {
                options.label_precision = precision;
            }

            let panel = ChartPanel::mount(client(&config)?);
            let snapshot =
                match tokio::time::timeout(config.dashboard.fetch_timeout(), panel.settled()).await
                {
                    Ok(snapshot) => snapshot,
                    Err(_) => {
                        eprintln!("Timed out waiting for chart data, rendering what arrived");
                        panel.snapshot()
                    }
                };

            std::fs::create_dir_all(&out)
                .with_context(|| format!("Failed to create {}", out.display()))?;

            for kind in ChartKind::ALL {
                let path = out.join(kind.file_name());
                std::fs::write(&path, snapshot.render(kind, &options))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Wrote {}", path.display());
            }

            println!(
                "trends: {} points ({:?}), categories: {} ({:?}), engagement: {} ({:?})",
                snapshot.trends.items.len(),
                snapshot.trends.status,
                snapshot.categories.items.len(),
                snapshot.categories.status,
                snapshot.engagement.items.len(),
                snapshot.engagement.status,
            );
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn client(config: &Config) -> anyhow::Result<Arc<AnalyticsClient>> {
    let client = AnalyticsClient::new(config.service.client_config())
        .context("Failed to build analytics client")?;
    Ok(Arc::new(client))
}
