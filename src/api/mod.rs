//! PagerDuty API layer.
//!
//! This module provides:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Authenticated resource access ([`ResourceClient`])
//! - Offset/limit pagination ([`fetch_all`])
//! - Wire types for services and webhooks ([`Service`], [`Webhook`])

mod client;
mod error;
mod http;
mod paginate;
mod resource;
mod types;


#[cfg(test)]
pub(crate) mod mock;

pub use client::ReqwestClient;
pub use error::{ApiError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use paginate::{PAGE_SIZE, fetch_all};
pub use resource::ResourceClient;
pub use types::{SERVICE_REF_TYPE, Service, Webhook, WebhookObject};
