use reqwest::Client;
use serde_json::Value;

use super::{BackendError, TARGET_LANGUAGE, TranslationBackend, ensure_success};

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";
const NAME: &str = "google";

/// Keyless Google translation through the public `gtx` client endpoint.
#[derive(Debug)]
pub struct GoogleBackend {
    client: Client,
    endpoint: String,
}

impl GoogleBackend {
    pub fn new(client: Client, endpoint: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranslationBackend for GoogleBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, sentence: &str) -> Result<String, BackendError> {
        let url = format!(
            "{}/translate_a/single",
            self.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", TARGET_LANGUAGE),
                ("dt", "t"),
                ("q", sentence),
            ])
            .send()
            .await
            .map_err(BackendError::request)?;

        let response = ensure_success(NAME, response).await?;
        let body: Value = response.json().await.map_err(BackendError::request)?;
        parse_response(&body)
    }
}

/// Concatenates the translated segments of a `translate_a/single` reply.
///
/// The reply is a nested array; `[0]` lists segments whose first element is
/// the translated text.
fn parse_response(body: &Value) -> Result<String, BackendError> {
    let malformed = |reason: &str| BackendError::Malformed {
        backend: NAME,
        reason: reason.to_string(),
    };

    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing segment list"))?;

    segments
        .iter()
        .map(|segment| {
            segment
                .get(0)
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("segment without text"))
        })
        .collect()
}
