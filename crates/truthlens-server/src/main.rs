//! TruthLens
//!
//! Multilingual fake-news credibility checker.
//!
//! Serves the analysis pipeline and the community feedback store over HTTP,
//! or runs a single analysis or vote from the command line.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use truthlens_core::NewsId;
use truthlens_feedback::{FeedbackStore, FeedbackSummary};
use truthlens_server::config::AppConfig;
use truthlens_server::routes::EMPTY_TEXT;
use truthlens_server::state::{build_analyzer, AppState};
use truthlens_server::{create_router, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = AppConfig::load(&cli.config, &cli)?;

    match cli.command {
        Commands::Serve { .. } => serve(config).await,
        Commands::Analyze { text, json } => analyze(&config, &text, json).await,
        Commands::Feedback {
            text,
            name,
            vote,
            comment,
        } => {
            if text.trim().is_empty() {
                anyhow::bail!(EMPTY_TEXT);
            }
            let store = FeedbackStore::new(config.feedback_path.clone());
            let summary = store.submit(&NewsId::from_text(&text), &name, vote, &comment)?;
            print_summary(&summary);
            Ok(())
        }
        Commands::Summary { text } => {
            let store = FeedbackStore::new(config.feedback_path.clone());
            print_summary(&store.summarize(&NewsId::from_text(&text))?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    info!("Starting TruthLens server");

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    let addr: SocketAddr = format!("{}:{}", config.server.listen, config.server.port).parse()?;
    let state = AppState::new(config, metrics_handle)?;
    info!("Analyzer running in {} mode", state.analyzer.mode());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    // Graceful shutdown handler
    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn analyze(config: &AppConfig, text: &str, json: bool) -> Result<()> {
    let analyzer = build_analyzer(config)?;
    let analysis = analyzer.analyze(text).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("Prediction: {} ({}%)", analysis.label, analysis.score);
    println!("News ID: {}", analysis.news_id);
    if let Some(translated) = &analysis.translated {
        println!("Translation: {}", translated);
    }
    println!("Highlighted: {}", analysis.highlighted);
    println!();
    println!("{}", analysis.explanation);
    Ok(())
}

fn print_summary(summary: &FeedbackSummary) {
    println!("Likes: {}", summary.likes);
    if !summary.like_names.is_empty() {
        println!("  {}", summary.like_names.join(", "));
    }
    println!("Dislikes: {}", summary.dislikes);
    if !summary.dislike_names.is_empty() {
        println!("  {}", summary.dislike_names.join(", "));
    }
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("truthlens=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("truthlens=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "truthlens_analyses_total",
        "Total number of analyses by label and scoring mode"
    );
    metrics::describe_counter!(
        "truthlens_feedback_total",
        "Total number of feedback votes recorded"
    );
    metrics::describe_counter!(
        "truthlens_rejected_total",
        "Total number of blank inputs rejected"
    );
    metrics::describe_histogram!(
        "truthlens_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Analysis pipeline latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
