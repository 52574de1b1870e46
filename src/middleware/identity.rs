//! Client identity derivation
//!
//! Derives the opaque per-caller key used for quota bucketing. This is not
//! authentication: the tools are anonymous, and the key only has to be
//! stable enough to meter a browser session behind the usual proxies.

use axum::http::HeaderMap;

/// Fallback identity when no address header is present
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Get the client identifier for quota bucketing
///
/// Checks proxy headers in priority order and falls back to a shared
/// bucket when none is present.
pub fn client_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded_for) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        // X-Forwarded-For may contain multiple IPs, take the first one
        if let Some(ip) = forwarded_for.split(',').next() {
            let ip = ip.trim();
            if !ip.is_empty() {
                return format!("ip_{ip}");
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let ip = real_ip.trim();
        if !ip.is_empty() {
            return format!("ip_{ip}");
        }
    }

    UNKNOWN_IDENTITY.to_string()
}
