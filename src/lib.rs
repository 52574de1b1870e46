//! Career tools API library
//!
//! Rate-limited generation pipeline behind the interactive career tools:
//! cover-letter writing, salary analysis, and leadership-readiness scoring

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use handlers::{create_router, create_router_with_provider, AppState};
pub use models::ToolKind;
pub use services::{CompletionProvider, FixedWindowQuota, HttpCompletionClient, QuotaStore};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
