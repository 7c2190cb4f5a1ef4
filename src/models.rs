use serde::{Deserialize, Deserializer, Serialize};

use crate::form::{Field, Level};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
        }
    }
}

fn default_addr() -> String {
    "0.0.0.0:3009".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Interviewer {
    #[serde(default)]
    pub name: Option<String>,
}

/// An availability window as returned by `GET /availability`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Slot {
    /// Backends send either a string or a number; kept as the string posted back.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// ISO date, sometimes with a time component (`2024-05-01T00:00:00Z`).
    #[serde(default)]
    pub date: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub interviewer: Option<Interviewer>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Body of `POST /interviews`.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct InterviewRequest {
    pub availability_id: String,
    pub field: Field,
    pub level: Level,
    pub title: String,
    pub notes: String,
}
