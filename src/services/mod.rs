//! Service layer module
//!
//! Contains the quota gate, request validation, prompt construction, the
//! generation client, output parsing, and the pipeline tying them together

pub mod client;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod quota;
pub mod validate;

pub use client::{CompletionProvider, HttpCompletionClient};
pub use quota::{FixedWindowQuota, QuotaDecision, QuotaStore, ToolQuotas};
