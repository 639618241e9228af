//! Cross-references fetched services against fetched webhooks.
//!
//! Pure functions, no I/O. The reconciled view is derived afresh on every
//! run from live remote state, which is what makes the install step safe
//! to re-run.

use crate::api::{SERVICE_REF_TYPE, Service, Webhook};

/// A service annotated with the target webhooks currently attached to it.
///
/// Ephemeral, in-memory only. `webhooks` holds every fetched webhook that
/// matches this service and the target URL prefix; installation status is
/// defined solely by non-emptiness. Duplicates are kept as-is — the count
/// only matters as "at least one" when deciding whether to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledService {
    /// Identifier copied from the service.
    pub id: String,
    /// Display name copied from the service.
    pub name: String,
    /// Matching webhooks attached to this service.
    pub webhooks: Vec<Webhook>,
}

impl ReconciledService {
    /// Returns true if at least one matching webhook is attached.
    #[must_use]
    pub fn webhook_installed(&self) -> bool {
        !self.webhooks.is_empty()
    }
}

/// Matches each webhook to the service it targets.
///
/// Produces exactly one [`ReconciledService`] per input service, in input
/// order. A webhook counts for a service when all three hold:
///
/// - `webhook_object.id` equals the service id
/// - `webhook_object.type` equals `"service"`
/// - its URL starts with `target_prefix`, compared case-insensitively
///   after trimming leading whitespace
#[must_use]
pub fn combine(
    services: &[Service],
    webhooks: &[Webhook],
    target_prefix: &str,
) -> Vec<ReconciledService> {
    services
        .iter()
        .map(|service| ReconciledService {
            id: service.id.clone(),
            name: service.name.clone(),
            webhooks: webhooks
                .iter()
                .filter(|hook| matches_target(hook, &service.id, target_prefix))
                .cloned()
                .collect(),
        })
        .collect()
}

/// The three-way matching predicate from the contract above.
fn matches_target(hook: &Webhook, service_id: &str, target_prefix: &str) -> bool {
    hook.webhook_object.id == service_id
        && hook.webhook_object.kind == SERVICE_REF_TYPE
        && url_has_prefix(&hook.url, target_prefix)
}

/// Case-insensitive prefix check, ignoring leading whitespace.
fn url_has_prefix(url: &str, prefix: &str) -> bool {
    url.trim_start()
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
