//! Application execution logic.
//!
//! Sequences the pipeline: fetch all services, fetch all webhooks,
//! reconcile, report, and (when enabled) install missing webhooks.
//! Calls are strictly sequential; each stage depends on the previous
//! one, so the first error aborts the run.

use thiserror::Error;

use crate::api::{
    ApiError, HttpClient, ReqwestClient, ResourceClient, Service, Webhook, fetch_all,
};
use crate::config::{ValidatedConfig, defaults};
use crate::install::install_missing;
use crate::reconcile::{ReconciledService, combine};
use crate::report;

/// Error type for runtime execution failures.
///
/// Wraps the underlying [`ApiError`] with the pipeline stage that failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Fetching the service list failed.
    #[error("Failed to fetch services: {0}")]
    ServiceFetch(#[source] ApiError),

    /// Fetching the webhook list failed.
    #[error("Failed to fetch webhooks: {0}")]
    WebhookFetch(#[source] ApiError),

    /// Installing a missing webhook failed.
    ///
    /// Webhooks created earlier in the same run stay in place; a later
    /// run reconciles against them and only fills in what is still missing.
    #[error("Failed to install webhooks: {0}")]
    Install(#[source] ApiError),
}

/// Executes one audit run against the configured account.
///
/// Prints one status line per service to stdout, then installs the
/// webhook on services missing it when `add_hooks` is enabled.
///
/// # Errors
///
/// Returns [`RunError`] when any fetch or install call fails; nothing is
/// retried and no report is produced for a failed run.
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let client = ResourceClient::new(
        ReqwestClient::new(),
        config.api_base.clone(),
        config.auth.clone(),
        config.timeout,
    );

    let reconciled = audit(&client).await?;

    for line in report::lines(&reconciled) {
        println!("{line}");
    }

    if config.add_hooks {
        let created = install_missing(&client, &reconciled, &config.hook_url)
            .await
            .map_err(RunError::Install)?;
        println!("Created {created} webhook(s)");
    }

    Ok(())
}

/// Fetches both collections and reconciles them.
///
/// Generic over the HTTP client so the whole pipeline can run against a
/// mock in tests.
///
/// # Errors
///
/// Returns [`RunError`] if either collection fails to fetch completely.
pub async fn audit<H: HttpClient>(
    client: &ResourceClient<H>,
) -> Result<Vec<ReconciledService>, RunError> {
    let services: Vec<Service> = fetch_all(client, "services", None)
        .await
        .map_err(RunError::ServiceFetch)?;
    tracing::info!("Fetched {} service(s)", services.len());

    let webhooks: Vec<Webhook> = fetch_all(client, "webhooks", None)
        .await
        .map_err(RunError::WebhookFetch)?;
    tracing::info!("Fetched {} webhook(s)", webhooks.len());

    Ok(combine(&services, &webhooks, defaults::OPSMATIC_HOOK_BASE))
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
