//! Renders per-service installation status lines.

use crate::reconcile::ReconciledService;

/// Status text for a service with the target webhook attached.
pub const INSTALLED: &str = "installed";

/// Status text for a service without it.
pub const NOT_INSTALLED: &str = "not installed";

/// Returns the status text for a reconciled service.
#[must_use]
pub fn status(service: &ReconciledService) -> &'static str {
    if service.webhook_installed() {
        INSTALLED
    } else {
        NOT_INSTALLED
    }
}

/// Formats one status line: `{id} {name} {status}`.
#[must_use]
pub fn line(service: &ReconciledService) -> String {
    format!("{} {} {}", service.id, service.name, status(service))
}

/// Formats one line per service, preserving input order.
#[must_use]
pub fn lines(services: &[ReconciledService]) -> Vec<String> {
    services.iter().map(line).collect()
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
