use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{BackendError, Credential, TranslationBackend, ensure_success};

const FREE_ENDPOINT: &str = "https://api-free.deepl.com";
const PRO_ENDPOINT: &str = "https://api.deepl.com";
const NAME: &str = "deepl";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    target_lang: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// `DeepL` API v2 backend.
#[derive(Debug)]
pub struct DeepLBackend {
    client: Client,
    credential: Credential,
    endpoint: String,
}

impl DeepLBackend {
    /// Free-plan keys (suffix `:fx`) default to the free API host.
    pub fn new(client: Client, credential: Credential, endpoint: Option<String>) -> Self {
        let endpoint = endpoint.unwrap_or_else(|| default_endpoint(&credential).to_string());
        Self {
            client,
            credential,
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn default_endpoint(credential: &Credential) -> &'static str {
    if credential.expose().ends_with(":fx") {
        FREE_ENDPOINT
    } else {
        PRO_ENDPOINT
    }
}

impl TranslationBackend for DeepLBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, sentence: &str) -> Result<String, BackendError> {
        let url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.credential.expose()),
            )
            .json(&TranslateRequest {
                text: [sentence],
                target_lang: "JA",
            })
            .send()
            .await
            .map_err(BackendError::request)?;

        let response = ensure_success(NAME, response).await?;
        let body = response.text().await.map_err(BackendError::request)?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<String, BackendError> {
    let parsed: TranslateResponse =
        serde_json::from_str(body).map_err(|e| BackendError::Malformed {
            backend: NAME,
            reason: e.to_string(),
        })?;

    parsed
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| BackendError::Malformed {
            backend: NAME,
            reason: "empty translations list".to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(TranslateRequest {
            text: ["Hello."],
            target_lang: "JA",
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"text": ["Hello."], "target_lang": "JA"})
        );
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"translations":[{"detected_source_language":"EN","text":"こんにちは。"}]}"#;
        assert_eq!(parse_response(body).unwrap(), "こんにちは。");
    }

    #[test]
    fn test_parse_response_empty_list() {
        let err = parse_response(r#"{"translations":[]}"#).unwrap_err();
        assert!(err.to_string().contains("empty translations list"));
    }

    #[test]
    fn test_endpoint_follows_key_plan() {
        let free = DeepLBackend::new(Client::new(), Credential::new("k:fx"), None);
        assert_eq!(free.endpoint(), FREE_ENDPOINT);

        let pro = DeepLBackend::new(Client::new(), Credential::new("k"), None);
        assert_eq!(pro.endpoint(), PRO_ENDPOINT);

        let custom = DeepLBackend::new(
            Client::new(),
            Credential::new("k:fx"),
            Some("http://localhost:8080".to_string()),
        );
        assert_eq!(custom.endpoint(), "http://localhost:8080");
    }
}
