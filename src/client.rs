use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use tracing::{debug, warn};

use crate::form::{Field, Level};
use crate::models::{BackendConfig, InterviewRequest, Slot};

/// The booking backend as seen by the schedule page.
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Slots open for the given field and level.
    async fn availability(&self, field: Field, level: Level) -> Result<Vec<Slot>>;

    /// Request an interview in one of the slots. Any 2xx is success.
    async fn schedule_interview(&self, request: &InterviewRequest) -> Result<()>;
}

pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref token) = self.token {
            if let Ok(val) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, val);
            }
        }
        headers
    }

    fn availability_url(&self, field: Field, level: Level) -> String {
        format!(
            "{}/availability?field={}&level={}",
            self.base_url,
            urlencoding::encode(field.as_str()),
            urlencoding::encode(level.as_str()),
        )
    }
}

/// Pull `availability` out of a response body. Entries that are not slots are
/// skipped; a missing, null or non-array value is an empty list.
pub(crate) fn parse_availability(body: &serde_json::Value) -> Vec<Slot> {
    let items = match body.get("availability") {
        None | Some(serde_json::Value::Null) => return Vec::new(),
        Some(serde_json::Value::Array(items)) => items,
        Some(other) => {
            warn!("Ignoring availability that is not a list: {}", other);
            return Vec::new();
        }
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<Slot>(item.clone()) {
            Ok(slot) => Some(slot),
            Err(e) => {
                warn!("Skipping availability entry {}: {} ({})", i, e, item);
                None
            }
        })
        .collect()
}

#[async_trait]
impl InterviewApi for BackendClient {
    async fn availability(&self, field: Field, level: Level) -> Result<Vec<Slot>> {
        let url = self.availability_url(field, level);

        let resp = self
            .client
            .get(&url)
            .headers(self.default_headers())
            .send()
            .await
            .context("Failed to fetch availability")?
            .error_for_status()
            .context("Availability request rejected")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed to read availability response")?;
        debug!("Availability response (status {}): {}", status, text);

        let body: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse availability (status {status}): {text}"))?;

        let slots = parse_availability(&body);
        debug!("Fetched {} slots for {}/{}", slots.len(), field.as_str(), level.as_str());
        Ok(slots)
    }

    async fn schedule_interview(&self, request: &InterviewRequest) -> Result<()> {
        let url = format!("{}/interviews", self.base_url);

        let resp = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(request)
            .send()
            .await
            .context("Failed to send interview request")?
            .error_for_status()
            .context("Interview request rejected")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        debug!("Interview response (status {}): {}", status, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_availability_list() {
        let body = json!({
            "availability": [
                {"id": "s1", "date": "2024-05-01T00:00:00Z", "start_time": "10:00",
                 "end_time": "10:30", "interviewer": {"name": "Ana"}}
            ]
        });
        let slots = parse_availability(&body);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].id, "s1");
    }

    #[test]
    fn test_missing_or_malformed_availability_is_empty() {
        assert!(parse_availability(&json!({})).is_empty());
        assert!(parse_availability(&json!({"availability": null})).is_empty());
        assert!(parse_availability(&json!({"availability": "soon"})).is_empty());
        assert!(parse_availability(&json!({"availability": [{"id": 1}]})).is_empty());
    }

    #[test]
    fn test_bad_entry_does_not_hide_good_ones() {
        let body = json!({
            "availability": [
                {"id": "s1", "date": "2024-05-01", "start_time": "10:00",
                 "end_time": "10:30", "interviewer": {"name": "Ana"}},
                {"id": "s2", "end_time": "11:30"},
                {"id": 7, "date": "2024-05-02", "start_time": "12:00", "end_time": "12:30"}
            ]
        });
        let ids: Vec<String> = parse_availability(&body).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["s1", "7"]);
    }

    #[test]
    fn test_availability_url() {
        let client = BackendClient::new(&BackendConfig {
            base_url: "http://localhost:8000/api/".into(),
            token: None,
        })
        .unwrap();
        assert_eq!(
            client.availability_url(Field::Backend, Level::Mid),
            "http://localhost:8000/api/availability?field=backend&level=mid"
        );
    }

    #[test]
    fn test_token_header() {
        let client = BackendClient::new(&BackendConfig {
            base_url: "http://localhost".into(),
            token: Some("abc".into()),
        })
        .unwrap();
        let headers = client.default_headers();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }
}
