use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truthlens_core::Vote;

#[derive(Parser, Debug)]
#[command(name = "truthlens")]
#[command(
    author,
    version,
    about = "Multilingual fake-news credibility checker"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "truthlens.yaml", global = true)]
    pub config: String,

    /// Labelled training corpus (CSV with text,label columns)
    #[arg(long, global = true)]
    pub corpus: Option<PathBuf>,

    /// Directory holding vectorizer.json and model.json
    #[arg(long, global = true)]
    pub model_dir: Option<PathBuf>,

    /// Feedback CSV file
    #[arg(long, global = true)]
    pub feedback_file: Option<PathBuf>,

    /// Skip translation of non-English input
    #[arg(long, global = true)]
    pub no_translate: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Listen address
        #[arg(short, long)]
        listen: Option<String>,

        /// Listen port
        #[arg(short = 'P', long)]
        port: Option<u16>,
    },

    /// Analyze one statement and print the result
    Analyze {
        /// Statement to check
        text: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a vote on a statement
    Feedback {
        /// Statement the vote refers to
        text: String,

        /// Submitter name
        #[arg(short, long)]
        name: String,

        /// like or dislike
        #[arg(long, value_parser = parse_vote)]
        vote: Vote,

        /// Optional free-text comment
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Print the feedback summary for a statement
    Summary {
        /// Statement to look up
        text: String,
    },
}

fn parse_vote(s: &str) -> Result<Vote, String> {
    s.parse().map_err(|e: truthlens_core::Error| e.to_string())
}
