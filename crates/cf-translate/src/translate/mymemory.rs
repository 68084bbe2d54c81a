//! MyMemory backend (free tier, roughly 5000 characters a day)

use crate::client::{build_client, ensure_success, join_url};
use crate::error::Error;
use crate::translate::{dialect, TranslationBackend, TRANSLATE_TIMEOUT};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Public MyMemory endpoint
pub const MYMEMORY_URL: &str = "https://api.mymemory.translated.net";

const NAME: &str = "mymemory";

const LANGUAGE_CODES: &[(&str, &str)] = &[("zh", "zh-CN")];

/// MyMemory `GET /get` backend
#[derive(Debug, Clone)]
pub struct MyMemory {
    base_url: String,
}

impl MyMemory {
    /// Create a backend for the public endpoint
    pub fn new() -> Self {
        Self::with_base_url(MYMEMORY_URL)
    }

    /// Create a backend for another endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn request_url(&self, text: &str, source: &str, target: &str) -> Result<Url, Error> {
        let raw = join_url(&self.base_url, "get");
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::RequestError(format!("Invalid URL {}: {}", raw, e)))?;
        url.query_pairs_mut().append_pair("q", text).append_pair(
            "langpair",
            &format!(
                "{}|{}",
                dialect(source, LANGUAGE_CODES),
                dialect(target, LANGUAGE_CODES)
            ),
        );
        Ok(url)
    }
}

impl Default for MyMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "responseData", default)]
    response_data: Option<ResponseData>,
    /// Number or numeric string depending on the failure path
    #[serde(rename = "responseStatus", default)]
    response_status: Value,
    #[serde(rename = "responseDetails", default)]
    response_details: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

impl GetResponse {
    fn is_ok(&self) -> bool {
        match &self.response_status {
            Value::Number(n) => n.as_u64() == Some(200),
            Value::String(s) => s == "200",
            _ => false,
        }
    }

    fn into_text(self) -> Result<String, Error> {
        if !self.is_ok() {
            let reason = match self.response_details {
                Value::String(s) if !s.is_empty() => s,
                _ => format!("responseStatus {}", self.response_status),
            };
            return Err(Error::TranslationFailed {
                backend: NAME,
                reason,
            });
        }
        self.response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::EmptyTranslation { backend: NAME })
    }
}

#[async_trait]
impl TranslationBackend for MyMemory {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Error> {
        let url = self.request_url(text, source, target)?;
        debug!(backend = NAME, "Sending translation request");

        let client = build_client(None, "application/json", TRANSLATE_TIMEOUT)?;
        let response = client.get(url).send().await.map_err(Error::from_reqwest)?;
        let response = ensure_success(response)?;
        let body = response.text().await.map_err(Error::from_reqwest)?;

        let parsed: GetResponse =
            serde_json::from_str(&body).map_err(|e| Error::TranslationFailed {
                backend: NAME,
                reason: e.to_string(),
            })?;
        parsed.into_text()
    }
}
