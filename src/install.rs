//! Installs the target webhook on services that are missing it.

use serde::Serialize;

use crate::api::{ApiError, HttpClient, ResourceClient, SERVICE_REF_TYPE};
use crate::reconcile::ReconciledService;

/// Display name given to webhooks this tool creates.
const HOOK_NAME: &str = "Opsmatic Webhook";

/// Creation payload for `POST /webhooks`.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    name: &'a str,
    url: &'a str,
    webhook_object: WebhookObjectRef<'a>,
}

/// Service reference inside the creation payload.
#[derive(Debug, Serialize)]
struct WebhookObjectRef<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    id: &'a str,
}

/// Creates the target webhook on every service whose reconciled webhook
/// set is empty.
///
/// Returns the number of services a webhook was created for. Safe to
/// re-run: reconciliation reflects live remote state, so a service that
/// already holds a matching webhook is skipped.
///
/// # Errors
///
/// Fail-fast: the first failed submission propagates and the remaining
/// services are left untouched. There is no rollback of webhooks already
/// created in this run; a subsequent run picks up where this one stopped.
pub async fn install_missing<H: HttpClient>(
    client: &ResourceClient<H>,
    reconciled: &[ReconciledService],
    hook_url: &str,
) -> Result<usize, ApiError> {
    let mut created = 0;

    for service in reconciled {
        if service.webhook_installed() {
            continue;
        }

        tracing::info!(
            "Installing webhook on {id} ({name})",
            id = service.id,
            name = service.name,
        );

        let payload = WebhookPayload {
            name: HOOK_NAME,
            url: hook_url,
            webhook_object: WebhookObjectRef {
                kind: SERVICE_REF_TYPE,
                id: &service.id,
            },
        };

        client.submit("webhooks", &payload).await?;
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
