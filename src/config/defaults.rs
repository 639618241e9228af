//! Default values and fixed endpoints.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default per-call timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Base of the Opsmatic webhook URL, without the integration token.
///
/// Also serves as the prefix a webhook URL must carry to count as
/// "installed" during reconciliation, so hooks installed with a rotated
/// token are still recognized.
pub const OPSMATIC_HOOK_BASE: &str = "https://api.opsmatic.com/webhooks/events/pagerduty";

/// Default per-call timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}
