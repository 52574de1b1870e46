//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Generative-AI provider configuration
    pub provider: ProviderConfig,
    /// Per-tool quota configuration
    pub quota: QuotaConfig,
    /// Request configuration
    pub request: RequestConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Generative-AI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model name sent upstream
    pub model: String,
    /// Request timeout in seconds, applied to each attempt
    pub timeout_secs: u64,
    /// Maximum tokens per completion
    pub max_tokens: u32,
}

/// Per-tool quota configuration
///
/// Observed product tiers keep these between 3 and 10 requests per hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Window duration in seconds, shared by all tools
    pub window_secs: u64,
    /// Cover-letter requests per window
    pub cover_letter_limit: u32,
    /// Salary-analysis requests per window
    pub salary_analysis_limit: u32,
    /// Leadership-assessment requests per window
    pub leadership_limit: u32,
}

/// Request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Maximum request body size in bytes
    pub max_request_size: usize,
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Allowed origins for CORS
    pub allowed_origins: Vec<String>,
    /// Whether CORS is enabled
    pub cors_enabled: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Settings {
    /// Create a new configuration instance from the environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "0.0.0.0"),
                port: get_env_or_default("SERVER_PORT", "8084")
                    .parse()
                    .context("Invalid port number")?,
            },
            provider: ProviderConfig {
                api_key: env::var("GENERATION_API_KEY")
                    .context("GENERATION_API_KEY environment variable not set")?,
                base_url: get_env_or_default("GENERATION_BASE_URL", "https://api.openai.com/v1"),
                model: get_env_or_default("GENERATION_MODEL", "gpt-4o-mini"),
                timeout_secs: get_env_or_default("GENERATION_TIMEOUT_SECS", "15")
                    .parse()
                    .context("Invalid generation timeout")?,
                max_tokens: get_env_or_default("GENERATION_MAX_TOKENS", "1024")
                    .parse()
                    .context("Invalid generation max tokens")?,
            },
            quota: QuotaConfig {
                window_secs: get_env_or_default("QUOTA_WINDOW_SECS", "3600")
                    .parse()
                    .context("Invalid quota window")?,
                cover_letter_limit: get_env_or_default("COVER_LETTER_LIMIT", "5")
                    .parse()
                    .context("Invalid cover-letter limit")?,
                salary_analysis_limit: get_env_or_default("SALARY_ANALYSIS_LIMIT", "10")
                    .parse()
                    .context("Invalid salary-analysis limit")?,
                leadership_limit: get_env_or_default("LEADERSHIP_LIMIT", "3")
                    .parse()
                    .context("Invalid leadership limit")?,
            },
            request: RequestConfig {
                max_request_size: get_env_or_default("MAX_REQUEST_SIZE", "262144")
                    .parse()
                    .context("Invalid maximum request size")?,
            },
            security: SecurityConfig {
                allowed_origins: get_env_or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
                cors_enabled: get_env_or_default("CORS_ENABLED", "true")
                    .parse()
                    .context("Invalid CORS enabled flag")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if self.provider.api_key.is_empty() {
            anyhow::bail!("Generation API key cannot be empty");
        }

        if self.provider.api_key.contains(char::is_whitespace) {
            anyhow::bail!("Generation API key cannot contain whitespace characters");
        }

        if self.provider.api_key.len() < 8 {
            anyhow::bail!("Generation API key must be at least 8 characters long");
        }

        if !self.provider.base_url.starts_with("http") {
            anyhow::bail!("Invalid generation base URL format, should start with 'http'");
        }

        if self.provider.timeout_secs == 0 {
            anyhow::bail!("Generation timeout cannot be 0");
        }

        if self.provider.max_tokens == 0 {
            anyhow::bail!("Generation max tokens cannot be 0");
        }

        if self.quota.window_secs == 0 {
            anyhow::bail!("Quota window cannot be 0");
        }

        if self.quota.cover_letter_limit == 0
            || self.quota.salary_analysis_limit == 0
            || self.quota.leadership_limit == 0
        {
            anyhow::bail!("Quota limits cannot be 0");
        }

        if self.request.max_request_size == 0 {
            anyhow::bail!("Maximum request size cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
