//! Per-client request quotas
//!
//! Fixed-window counters keyed by client identity. State is in-memory and
//! lost on restart; this is a soft limit on free-tool usage, not a security
//! control.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::QuotaConfig;
use crate::models::ToolKind;

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window after this decision
    pub remaining: u32,
    /// Seconds until the window rolls over; set only on denial
    pub retry_after_secs: Option<u64>,
}

/// Quota gate consulted once per request, before any other stage
///
/// Implementations must apply the read-check-increment atomically with
/// respect to concurrent requests from the same identity. The in-memory
/// implementation below can be swapped for an external counter store
/// without touching the pipeline.
pub trait QuotaStore: Send + Sync {
    /// Check the identity's window and claim a slot if one is available
    ///
    /// Never fails; always returns a decision.
    fn check_and_increment(&self, identity: &str) -> QuotaDecision;
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counter over an in-memory map
pub struct FixedWindowQuota {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

/// Map size above which expired windows are swept before inserting
const PURGE_THRESHOLD: usize = 1024;

impl FixedWindowQuota {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn retry_after(&self, elapsed: Duration) -> u64 {
        let remaining = self.window.saturating_sub(elapsed);
        // Denials always report at least one second so callers never see
        // "retry after 0" on a still-closed window.
        remaining.as_secs().max(1)
    }
}

impl QuotaStore for FixedWindowQuota {
    fn check_and_increment(&self, identity: &str) -> QuotaDecision {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("quota lock poisoned");

        if windows.len() > PURGE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
            debug!("Purged expired quota windows, {} remain", windows.len());
        }

        let entry = windows.entry(identity.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        // Window boundary: reset takes precedence over the limit check, so
        // a request arriving exactly at the boundary starts a fresh window.
        let elapsed = now.duration_since(entry.started);
        if elapsed >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.limit {
            return QuotaDecision {
                allowed: false,
                remaining: 0,
                retry_after_secs: Some(self.retry_after(now.duration_since(entry.started))),
            };
        }

        entry.count += 1;
        QuotaDecision {
            allowed: true,
            remaining: self.limit - entry.count,
            retry_after_secs: None,
        }
    }
}

/// One quota store per tool, built from configuration
pub struct ToolQuotas {
    cover_letter: FixedWindowQuota,
    salary_analysis: FixedWindowQuota,
    leadership_assessment: FixedWindowQuota,
}

impl ToolQuotas {
    pub fn from_config(config: &QuotaConfig) -> Self {
        let window = Duration::from_secs(config.window_secs);
        Self {
            cover_letter: FixedWindowQuota::new(config.cover_letter_limit, window),
            salary_analysis: FixedWindowQuota::new(config.salary_analysis_limit, window),
            leadership_assessment: FixedWindowQuota::new(config.leadership_limit, window),
        }
    }

    /// The quota gate for a tool's endpoint
    pub fn for_tool(&self, tool: ToolKind) -> &dyn QuotaStore {
        match tool {
            ToolKind::CoverLetter => &self.cover_letter,
            ToolKind::SalaryAnalysis => &self.salary_analysis,
            ToolKind::LeadershipAssessment => &self.leadership_assessment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let quota = FixedWindowQuota::new(3, Duration::from_secs(3600));

        for expected_remaining in [2, 1, 0] {
            let decision = quota.check_and_increment("client-a");
            assert!(decision.allowed);
            assert_eq!(decision.remaining, expected_remaining);
            assert_eq!(decision.retry_after_secs, None);
        }

        let denied = quota.check_and_increment("client-a");
        assert!(!denied.allowed);
        assert!(denied.retry_after_secs.unwrap() > 0);
    }

    #[test]
    fn test_identities_do_not_share_windows() {
        let quota = FixedWindowQuota::new(1, Duration::from_secs(3600));

        assert!(quota.check_and_increment("client-a").allowed);
        assert!(!quota.check_and_increment("client-a").allowed);
        assert!(quota.check_and_increment("client-b").allowed);
    }

    #[test]
    fn test_window_reset_grants_fresh_count() {
        let quota = FixedWindowQuota::new(2, Duration::from_millis(40));

        assert!(quota.check_and_increment("client-a").allowed);
        assert!(quota.check_and_increment("client-a").allowed);
        assert!(!quota.check_and_increment("client-a").allowed);

        std::thread::sleep(Duration::from_millis(50));

        let decision = quota.check_and_increment("client-a");
        assert!(decision.allowed);
        assert_eq!(decision.remaining, 1);
    }

    #[test]
    fn test_concurrent_increments_never_exceed_limit() {
        use std::sync::Arc;

        let quota = Arc::new(FixedWindowQuota::new(10, Duration::from_secs(3600)));
        let mut handles = Vec::new();

        for _ in 0..4 {
            let quota = Arc::clone(&quota);
            handles.push(std::thread::spawn(move || {
                (0..10)
                    .filter(|_| quota.check_and_increment("shared").allowed)
                    .count()
            }));
        }

        let granted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(granted, 10);
    }

    #[test]
    fn test_tool_quotas_are_independent() {
        let config = QuotaConfig {
            window_secs: 3600,
            cover_letter_limit: 1,
            salary_analysis_limit: 2,
            leadership_limit: 1,
        };
        let quotas = ToolQuotas::from_config(&config);

        assert!(quotas
            .for_tool(ToolKind::CoverLetter)
            .check_and_increment("c")
            .allowed);
        assert!(!quotas
            .for_tool(ToolKind::CoverLetter)
            .check_and_increment("c")
            .allowed);
        // Exhausting one tool leaves the others untouched.
        assert!(quotas
            .for_tool(ToolKind::SalaryAnalysis)
            .check_and_increment("c")
            .allowed);
    }
}
