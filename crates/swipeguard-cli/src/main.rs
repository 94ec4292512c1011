//! SwipeGuard CLI
//!
//! Scores exported dating-app conversations from the command line.
//!
//! Conversation files are JSON objects mapping match name to
//! `{"messages": [{"text": .., "timestamp": .., "sender": ..}]}`; results are
//! printed to stdout as pretty JSON keyed the same way.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use swipeguard_classifiers::{
    AnalysisResult, BatchFilter, ConversationAnalyzer, TimewasterClassifier,
};
use tracing::info;

mod input;

/// Log filter when `RUST_LOG` is unset; prefix-matches every swipeguard crate
const DEFAULT_LOG_FILTER: &str = "swipeguard=info";
const VERBOSE_LOG_FILTER: &str = "swipeguard=debug";

#[derive(Parser, Debug)]
#[command(name = "swipeguard")]
#[command(about = "Conversation quality scoring for dating-app chats", long_about = None)]
struct Cli {
    /// Settings file (.json, .yaml or .yml)
    #[arg(short, long, env = "SWIPEGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify each conversation as engaged or timewaster
    Score {
        /// Conversation file
        file: PathBuf,

        /// Override the engagement threshold from the settings file
        #[arg(long)]
        min_engagement_score: Option<f64>,
    },

    /// Extract sentiment, topics and flow for each conversation
    Analyze {
        /// Conversation file
        file: PathBuf,
    },

    /// Print the intent of a single message
    Intent {
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let settings = input::load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Score {
            file,
            min_engagement_score,
        } => {
            let mut filter_config = settings.filter;
            if let Some(threshold) = min_engagement_score {
                filter_config.min_engagement_score = threshold;
            }

            let classifier = TimewasterClassifier::new(filter_config)?;
            let conversations = input::load_conversations(&file)?;

            let results = BatchFilter::new(Arc::new(classifier))
                .filter(conversations)
                .await?;

            let timewasters = results.values().filter(|r| r.is_timewaster).count();
            info!(
                "Scored {} conversations, {} potential timewasters",
                results.len(),
                timewasters
            );

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Analyze { file } => {
            let analyzer = ConversationAnalyzer::new(settings.analyzer)?;
            let conversations = input::load_conversations(&file)?;

            let results: BTreeMap<String, AnalysisResult> = conversations
                .into_iter()
                .map(|(name, conversation)| {
                    let analysis = analyzer.analyze_conversation(&conversation.texts());
                    (name, analysis)
                })
                .collect();

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Intent { text } => {
            let analyzer = ConversationAnalyzer::new(settings.analyzer)?;
            println!("{}", analyzer.detect_intent(&text));
        }
    }

    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays JSON
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
