//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use truthlens_classifiers::translate::DEFAULT_ENDPOINT;
use truthlens_classifiers::{HttpTranslator, PassthroughTranslator, Translator};

use crate::cli::{Cli, Commands};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Labelled training corpus used to gate the model
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Directory holding the model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Append-only feedback file
    #[serde(default = "default_feedback_path")]
    pub feedback_path: PathBuf,

    /// Translation service settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(corpus) = &cli.corpus {
            config.corpus_path = corpus.clone();
        }

        if let Some(model_dir) = &cli.model_dir {
            config.model_dir = model_dir.clone();
        }

        if let Some(feedback) = &cli.feedback_file {
            config.feedback_path = feedback.clone();
        }

        if cli.no_translate {
            config.translation.enabled = false;
        }

        if let Commands::Serve { listen, port } = &cli.command {
            if let Some(listen) = listen {
                config.server.listen = listen.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            model_dir: default_model_dir(),
            feedback_path: default_feedback_path(),
            translation: TranslationConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Translate non-English input to the target language
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Target language code
    #[serde(default = "default_target")]
    pub target: String,
}

impl TranslationConfig {
    /// Build the configured translator
    pub fn build(&self) -> anyhow::Result<Arc<dyn Translator>> {
        if !self.enabled {
            return Ok(Arc::new(PassthroughTranslator));
        }
        let translator = HttpTranslator::new(
            self.endpoint.clone(),
            self.target.clone(),
            Duration::from_millis(self.timeout_ms),
        )?;
        Ok(Arc::new(translator))
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            target: default_target(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum request body size
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/training_sample.csv")
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("model")
}

fn default_feedback_path() -> PathBuf {
    PathBuf::from("data/feedback.csv")
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_target() -> String {
    "en".to_string()
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_without_file() {
        let cli = Cli::parse_from(["truthlens", "summary", "x"]);
        let config = AppConfig::load("/nonexistent/truthlens.yaml", &cli).unwrap();

        assert_eq!(config.corpus_path, PathBuf::from("data/training_sample.csv"));
        assert_eq!(config.model_dir, PathBuf::from("model"));
        assert_eq!(config.feedback_path, PathBuf::from("data/feedback.csv"));
        assert!(config.translation.enabled);
        assert_eq!(config.translation.timeout_ms, 5000);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, 65536);
    }

    #[test]
    fn test_partial_file_and_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truthlens.yaml");
        std::fs::write(
            &path,
            "model_dir: /srv/model\n\
             translation:\n  timeout_ms: 1500\n\
             server:\n  port: 9000\n",
        )
        .unwrap();

        let cli = Cli::parse_from([
            "truthlens",
            "--no-translate",
            "--feedback-file",
            "/tmp/votes.csv",
            "serve",
            "--listen",
            "127.0.0.1",
        ]);
        let config = AppConfig::load(path.to_str().unwrap(), &cli).unwrap();

        assert_eq!(config.model_dir, PathBuf::from("/srv/model"));
        assert_eq!(config.corpus_path, PathBuf::from("data/training_sample.csv"));
        assert_eq!(config.feedback_path, PathBuf::from("/tmp/votes.csv"));
        assert!(!config.translation.enabled);
        assert_eq!(config.translation.timeout_ms, 1500);
        assert_eq!(config.server.listen, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truthlens.yaml");
        std::fs::write(&path, "server: [not, a, map]\n").unwrap();

        let cli = Cli::parse_from(["truthlens", "summary", "x"]);
        assert!(AppConfig::load(path.to_str().unwrap(), &cli).is_err());
    }
}
