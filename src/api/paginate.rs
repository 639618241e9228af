//! Offset/limit pagination over PagerDuty collection endpoints.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{ApiError, HttpClient, ResourceClient};

/// Elements requested per page.
///
/// 100 is the documented maximum page size for the PagerDuty v1 API.
pub const PAGE_SIZE: u64 = 100;

/// Fetches every element of a paginated collection.
///
/// Requests `offset = page * 100` for page 0, 1, 2, … until the number of
/// accumulated elements reaches the `total` the server advertises. Elements
/// are returned in the server's natural page order. Every call hits the
/// network afresh; nothing is cached.
///
/// `collection_key` names the JSON field holding the page's element array;
/// it defaults to the endpoint name (the v1 convention: `/services` pages
/// carry a `services` array).
///
/// # Errors
///
/// Returns [`ApiError`] if any page fetch fails, a page body is not the
/// expected `{ total, <key>: [...] }` shape, or a page comes back empty
/// before `total` elements have been seen ([`ApiError::ShortPage`] — an
/// exhausted collection and a failing server are different conditions).
pub async fn fetch_all<T, H>(
    client: &ResourceClient<H>,
    endpoint: &str,
    collection_key: Option<&str>,
) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    H: HttpClient,
{
    let key = collection_key.unwrap_or(endpoint);
    let mut items: Vec<T> = Vec::new();
    let mut page: u64 = 0;

    loop {
        let offset = page * PAGE_SIZE;
        let path = format!("{endpoint}?offset={offset}&limit={PAGE_SIZE}");
        let body = client.fetch(&path).await?;

        let (total, page_items) = parse_page(&body, &path, key)?;

        let collected = items.len() as u64 + page_items.len() as u64;
        if page_items.is_empty() && collected < total {
            return Err(ApiError::ShortPage {
                endpoint: endpoint.to_string(),
                got: collected,
                total,
            });
        }

        items.extend(page_items);

        if items.len() as u64 >= total {
            tracing::debug!(
                "Fetched {count} element(s) from {endpoint} in {pages} page(s)",
                count = items.len(),
                pages = page + 1,
            );
            return Ok(items);
        }

        page += 1;
    }
}

/// Parses one page body into its advertised total and element array.
fn parse_page<T: DeserializeOwned>(
    body: &[u8],
    path: &str,
    key: &str,
) -> Result<(u64, Vec<T>), ApiError> {
    let malformed = |reason: String| ApiError::Malformed {
        url: path.to_string(),
        reason,
    };

    let mut page: Value = serde_json::from_slice(body)
        .map_err(|e| malformed(format!("body is not valid JSON: {e}")))?;

    let total = page
        .get("total")
        .and_then(Value::as_u64)
        .ok_or_else(|| malformed("missing integer `total` field".to_string()))?;

    let elements = page
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| malformed(format!("missing `{key}` array")))?;

    let items: Vec<T> = serde_json::from_value(elements)
        .map_err(|e| malformed(format!("`{key}` elements failed to deserialize: {e}")))?;

    Ok((total, items))
}
