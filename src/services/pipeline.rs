//! Generation pipeline
//!
//! One request runs the stages in a fixed order: quota gate, validation,
//! prompt construction, upstream generation, output parsing. Any stage
//! failure becomes exactly one typed error; a request never produces a
//! partial result alongside an error.
//!
//! The quota slot is claimed before the upstream call and never rolled
//! back, so requests abandoned mid-call still count against the window.

use tracing::{debug, info};

use crate::models::ToolKind;
use crate::services::client::CompletionProvider;
use crate::services::prompt::ToolPrompt;
use crate::services::quota::QuotaStore;
use crate::utils::error::{AppError, AppResult};

/// Run one generation request through the full pipeline
pub async fn run<V, O>(
    quota: &dyn QuotaStore,
    provider: &dyn CompletionProvider,
    identity: &str,
    tool: ToolKind,
    validate: impl FnOnce() -> AppResult<V>,
    build_prompt: impl FnOnce(&V) -> ToolPrompt,
    parse: impl FnOnce(&str) -> AppResult<O>,
) -> AppResult<O> {
    let decision = quota.check_and_increment(identity);
    if !decision.allowed {
        info!(
            "Quota denied: tool={}, identity={}, retry_after={:?}",
            tool, identity, decision.retry_after_secs
        );
        return Err(AppError::RateLimit {
            retry_after_secs: decision.retry_after_secs.unwrap_or(1),
        });
    }
    debug!(
        "Quota granted: tool={}, identity={}, remaining={}",
        tool, identity, decision.remaining
    );

    let input = validate()?;
    let prompt = build_prompt(&input);

    let raw = provider.complete(prompt.system, &prompt.user).await?;
    debug!("Completion received: tool={}, chars={}", tool, raw.len());

    let result = parse(&raw)?;
    info!("Generation succeeded: tool={}", tool);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::quota::QuotaDecision;
    use crate::utils::error::helpers;
    use async_trait::async_trait;

    struct AlwaysAllow;
    struct AlwaysDeny;

    impl QuotaStore for AlwaysAllow {
        fn check_and_increment(&self, _identity: &str) -> QuotaDecision {
            QuotaDecision {
                allowed: true,
                remaining: 1,
                retry_after_secs: None,
            }
        }
    }

    impl QuotaStore for AlwaysDeny {
        fn check_and_increment(&self, _identity: &str) -> QuotaDecision {
            QuotaDecision {
                allowed: false,
                remaining: 0,
                retry_after_secs: Some(1200),
            }
        }
    }

    struct FixedProvider(&'static str);
    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _system: &str, _user: &str) -> AppResult<String> {
            Err(helpers::transient_upstream("down"))
        }
    }

    fn prompt(_input: &String) -> ToolPrompt {
        ToolPrompt {
            system: "sys",
            user: "user".to_string(),
        }
    }

    #[tokio::test]
    async fn test_happy_path() {
        let result = run(
            &AlwaysAllow,
            &FixedProvider("output"),
            "client",
            ToolKind::CoverLetter,
            || Ok("input".to_string()),
            prompt,
            |raw| Ok(raw.to_uppercase()),
        )
        .await
        .unwrap();
        assert_eq!(result, "OUTPUT");
    }

    #[tokio::test]
    async fn test_quota_denial_short_circuits() {
        // The validator would fail loudly if it ran.
        let result: AppResult<String> = run(
            &AlwaysDeny,
            &FixedProvider("output"),
            "client",
            ToolKind::CoverLetter,
            || panic!("validation must not run after a quota denial"),
            prompt,
            |_| panic!("parse must not run"),
        )
        .await;

        match result.unwrap_err() {
            AppError::RateLimit { retry_after_secs } => assert_eq!(retry_after_secs, 1200),
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_failure_skips_upstream() {
        let result: AppResult<String> = run(
            &AlwaysAllow,
            &FailingProvider,
            "client",
            ToolKind::SalaryAnalysis,
            || Err(helpers::validation_error("jobTitle", "is required")),
            prompt,
            |_| panic!("parse must not run"),
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Validation { field: "jobTitle", .. }
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let result: AppResult<String> = run(
            &AlwaysAllow,
            &FailingProvider,
            "client",
            ToolKind::LeadershipAssessment,
            || Ok("input".to_string()),
            prompt,
            |_| panic!("parse must not run"),
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::Upstream { transient: true, .. }
        ));
    }

    #[tokio::test]
    async fn test_parse_failure_propagates() {
        let result: AppResult<String> = run(
            &AlwaysAllow,
            &FixedProvider("not json"),
            "client",
            ToolKind::LeadershipAssessment,
            || Ok("input".to_string()),
            prompt,
            |_| Err(helpers::parse_error("no JSON object in model output")),
        )
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_still_consumes_quota() {
        use crate::services::quota::FixedWindowQuota;
        use std::time::Duration;

        let quota = FixedWindowQuota::new(1, Duration::from_secs(3600));

        let _ = run(
            &quota,
            &FixedProvider("output"),
            "client",
            ToolKind::CoverLetter,
            || AppResult::<String>::Err(helpers::validation_error("resume", "is required")),
            prompt,
            |raw| Ok(raw.to_string()),
        )
        .await;

        // The failed request claimed the only slot.
        assert!(!quota.check_and_increment("client").allowed);
    }
}
