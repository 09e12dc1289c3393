pub mod app;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod report;
pub mod source;
pub mod state;
pub mod stats;
pub mod storage;

pub use app::router;
pub use config::{AnalyzerConfig, ServiceConfig};
pub use errors::{AnalysisError, UpstreamError};
pub use profile::derive_profile;
pub use state::AppState;
pub use stats::analyze;
pub use storage::SnapshotSource;
