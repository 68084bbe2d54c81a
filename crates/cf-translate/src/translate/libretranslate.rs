//! LibreTranslate backend

use crate::client::{build_client, join_url};
use crate::error::Error;
use crate::translate::{dialect, TranslationBackend, TRANSLATE_TIMEOUT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Community instance that needs no API key
pub const LIBRETRANSLATE_URL: &str = "https://translate.cutie.dating";

const NAME: &str = "libretranslate";

/// LibreTranslate names Simplified Chinese explicitly
const LANGUAGE_CODES: &[(&str, &str)] = &[("zh", "zh-Hans")];

/// LibreTranslate `POST /translate` backend
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    base_url: String,
}

impl LibreTranslate {
    /// Create a backend for the default community instance
    pub fn new() -> Self {
        Self::with_base_url(LIBRETRANSLATE_URL)
    }

    /// Create a backend for another instance
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for LibreTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl TranslationBackend for LibreTranslate {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, Error> {
        let url = join_url(&self.base_url, "translate");
        let request = TranslateRequest {
            q: text,
            source: dialect(source, LANGUAGE_CODES),
            target: dialect(target, LANGUAGE_CODES),
            format: "text",
        };
        debug!(backend = NAME, url = %url, "Sending translation request");

        let client = build_client(None, "application/json", TRANSLATE_TIMEOUT)?;
        let response = client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Error::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::from_reqwest)?;

        let parsed: TranslateResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(Error::HttpStatus {
                    url,
                    status: status.as_u16(),
                })
            }
            Err(e) => {
                return Err(Error::TranslationFailed {
                    backend: NAME,
                    reason: e.to_string(),
                })
            }
        };

        if let Some(reason) = parsed.error {
            return Err(Error::TranslationFailed {
                backend: NAME,
                reason,
            });
        }
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        parsed
            .translated_text
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::EmptyTranslation { backend: NAME })
    }
}
