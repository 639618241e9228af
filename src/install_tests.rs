//! Tests for the webhook install step.

use std::time::Duration;

use serde_json::json;

use crate::api::mock::{MockClient, ok_json};
use crate::api::{ApiError, HttpResponse, ResourceClient, Webhook, WebhookObject};
use crate::reconcile::ReconciledService;

use super::install_missing;

const HOOK_URL: &str = "https://api.opsmatic.com/webhooks/events/pagerduty?token=X";

fn client(mock: &MockClient) -> ResourceClient<&MockClient> {
    ResourceClient::new(
        mock,
        url::Url::parse("https://acme.pagerduty.com/api/v1/").unwrap(),
        http::HeaderValue::from_static("Token token=test-key"),
        Duration::from_secs(30),
    )
}

fn with_hook(id: &str, name: &str) -> ReconciledService {
    ReconciledService {
        id: id.to_string(),
        name: name.to_string(),
        webhooks: vec![Webhook {
            url: HOOK_URL.to_string(),
            webhook_object: WebhookObject {
                kind: "service".to_string(),
                id: id.to_string(),
            },
        }],
    }
}

fn without_hook(id: &str, name: &str) -> ReconciledService {
    ReconciledService {
        id: id.to_string(),
        name: name.to_string(),
        webhooks: vec![],
    }
}

#[tokio::test]
async fn creates_webhook_only_for_missing_services() {
    let mock = MockClient::json_sequence(vec![json!({"id": "H1"})]);
    let reconciled = vec![with_hook("S1", "Web"), without_hook("S2", "DB")];

    let created = install_missing(&client(&mock), &reconciled, HOOK_URL)
        .await
        .unwrap();

    assert_eq!(created, 1);
    assert_eq!(mock.calls(), 1);

    let requests = mock.captured_requests();
    assert_eq!(
        requests[0].url.as_str(),
        "https://acme.pagerduty.com/api/v1/webhooks"
    );
    let sent: serde_json::Value =
        serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        sent,
        json!({
            "name": "Opsmatic Webhook",
            "url": HOOK_URL,
            "webhook_object": {"type": "service", "id": "S2"}
        })
    );
}

#[tokio::test]
async fn creates_nothing_when_all_services_have_the_hook() {
    let mock = MockClient::new(vec![]);
    let reconciled = vec![with_hook("S1", "Web"), with_hook("S2", "DB")];

    let created = install_missing(&client(&mock), &reconciled, HOOK_URL)
        .await
        .unwrap();

    assert_eq!(created, 0);
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn counts_one_creation_per_missing_service() {
    let mock = MockClient::json_sequence(vec![json!({}), json!({}), json!({})]);
    let reconciled = vec![
        without_hook("S1", "Web"),
        without_hook("S2", "DB"),
        without_hook("S3", "API"),
    ];

    let created = install_missing(&client(&mock), &reconciled, HOOK_URL)
        .await
        .unwrap();

    assert_eq!(created, 3);
    assert_eq!(mock.calls(), 3);
}

#[tokio::test]
async fn first_failed_submission_aborts_remaining_services() {
    // S1 fails; S2 must not be attempted
    let mock = MockClient::new(vec![Ok(HttpResponse::new(
        http::StatusCode::INTERNAL_SERVER_ERROR,
        http::HeaderMap::new(),
        vec![],
    ))]);
    let reconciled = vec![without_hook("S1", "Web"), without_hook("S2", "DB")];

    let err = install_missing(&client(&mock), &reconciled, HOOK_URL)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { .. }));
    assert_eq!(mock.calls(), 1);
}

#[tokio::test]
async fn a_single_existing_hook_suppresses_creation_even_with_duplicates() {
    let mock = MockClient::new(vec![Ok(ok_json(&json!({})))]);
    let mut duplicated = with_hook("S1", "Web");
    let extra = duplicated.webhooks[0].clone();
    duplicated.webhooks.push(extra);

    let created = install_missing(&client(&mock), &[duplicated], HOOK_URL)
        .await
        .unwrap();

    assert_eq!(created, 0);
    assert_eq!(mock.calls(), 0);
}
