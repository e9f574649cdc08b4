//! Minerva search API client
//!
//! Builds a two-hour search window around an attribute, submits it to
//! `POST <minerva>/api/v1/search` and turns the returned search id into a
//! Strix UI link.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use minerva_core::{AttrType, Attribute};
use minerva_secrets::SecretBundle;

use crate::HandlerError;

/// Timestamp layout expected by the search API (naive, no offset)
pub const SEARCH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// How far back from the reference time a search reaches
pub const SEARCH_WINDOW_HOURS: i64 = 2;

/// One search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub term: String,
}

/// Body of `POST /api/v1/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecSearchRequest {
    pub query: Vec<Query>,
    pub start_date_time: String,
    pub end_date_time: String,
}

/// Response of `POST /api/v1/search`; only the id is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct ExecSearchResponse {
    pub search_id: String,
}

/// Search term for an attribute: usernames lose their `@realm` suffix
pub fn search_term(attr: &Attribute) -> &str {
    match attr.attr_type {
        AttrType::UserName => attr.value.split('@').next().unwrap_or(&attr.value),
        _ => &attr.value,
    }
}

/// Build the search body for `attr`
///
/// The window ends at the attribute's own timestamp, or at `now` when the
/// attribute has none.
pub fn build_request(attr: &Attribute, now: DateTime<Utc>) -> ExecSearchRequest {
    let end = attr.timestamp.unwrap_or(now);
    let start = end - Duration::hours(SEARCH_WINDOW_HOURS);

    ExecSearchRequest {
        query: vec![Query {
            term: search_term(attr).to_string(),
        }],
        start_date_time: start.format(SEARCH_TIME_FORMAT).to_string(),
        end_date_time: end.format(SEARCH_TIME_FORMAT).to_string(),
    }
}

/// Strix link for a search id
pub fn strix_url(secrets: &SecretBundle, search_id: &str) -> String {
    format!("{}/#/search/{}", secrets.strix_endpoint, search_id)
}

/// Submit a search for `attr` and return the Strix link to its results
pub async fn send_search_request(
    client: &Client,
    secrets: &SecretBundle,
    attr: &Attribute,
    now: DateTime<Utc>,
) -> Result<String, HandlerError> {
    let url = format!("{}/api/v1/search", secrets.minerva_endpoint);
    let body = build_request(attr, now);

    let response = client
        .post(&url)
        .header("x-api-key", &secrets.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| HandlerError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    debug!(code = status.as_u16(), url = %url, "Sent request to minerva");

    if !status.is_success() {
        return Err(HandlerError::Transport {
            url,
            reason: format!("unexpected status {}", status),
        });
    }

    let raw = response.bytes().await.map_err(|e| HandlerError::Decode {
        url: url.clone(),
        reason: format!("fail to read body: {}", e),
    })?;

    let resp: ExecSearchResponse =
        serde_json::from_slice(&raw).map_err(|e| HandlerError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    Ok(strix_url(secrets, &resp.search_id))
}
