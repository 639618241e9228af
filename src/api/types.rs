//! Wire types for the PagerDuty v1 API.
//!
//! Only the fields this tool reads are modeled; the remote objects carry
//! many more, which serde ignores on deserialization.

use serde::Deserialize;

/// The `webhook_object.type` value for a service-scoped webhook.
pub const SERVICE_REF_TYPE: &str = "service";

/// A remote service: a monitored system that can have webhooks attached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Service {
    /// Opaque unique identifier assigned by the remote system.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Informational URL for the service.
    #[serde(default)]
    pub service_url: String,
}

/// A remote webhook: a callback URL triggered on events, scoped to a
/// service via [`WebhookObject`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Webhook {
    /// Target callback URL.
    pub url: String,
    /// Reference to the object this webhook is attached to.
    pub webhook_object: WebhookObject,
}

/// Reference identifying which remote object a webhook is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookObject {
    /// Object type; [`SERVICE_REF_TYPE`] for service-scoped webhooks.
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier of the referenced object.
    pub id: String,
}
