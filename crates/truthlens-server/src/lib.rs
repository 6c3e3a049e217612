//! TruthLens Server
//!
//! HTTP API and command-line surface over the analysis pipeline and the
//! feedback store.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use routes::{create_router, AppError};
pub use state::AppState;
