//! Answers Prompt Source
//!
//! Reads placeholder phrases from the Answers autocomplete endpoint, called
//! with an empty input so it returns the experience's popular queries.
//!
//! # Answers API
//!
//! `GET /v2/accounts/me/answers/autocomplete?v=…&api_key=…&experienceKey=…&input=&version=…&locale=…`
//!
//! ```json
//! { "response": { "results": [ { "value": "boiling pots" }, { "value": "kettles" } ] } }
//! ```

use async_trait::async_trait;
use serde::Deserialize;

use super::{PromptError, PromptList, PromptSource};
use crate::config::EndpointConfig;

#[derive(Debug, Deserialize)]
struct AutocompleteBody {
    response: AutocompleteResponse,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<AutocompleteResult>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResult {
    value: String,
}

/// Prompt source backed by the Answers autocomplete endpoint
#[derive(Clone, Debug)]
pub struct AnswersPromptSource {
    endpoint: EndpointConfig,
    http_client: reqwest::Client,
}

impl AnswersPromptSource {
    /// Create a source for the given endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: EndpointConfig) -> Result<Self, PromptError> {
        let http_client = endpoint.http_client()?;
        Ok(Self::with_client(endpoint, http_client))
    }

    /// Create a source sharing an existing HTTP client
    #[must_use]
    pub fn with_client(endpoint: EndpointConfig, http_client: reqwest::Client) -> Self {
        Self {
            endpoint,
            http_client,
        }
    }

    /// URL of the prompt request
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidUrl`] if the configured base is not a URL.
    pub fn request_url(&self) -> Result<reqwest::Url, PromptError> {
        let mut params = self.endpoint.base_params();
        params.push(("input", String::new()));

        reqwest::Url::parse_with_params(&self.endpoint.answers_url("autocomplete"), &params)
            .map_err(|e| PromptError::InvalidUrl(e.to_string()))
    }
}

/// Decode an autocomplete body into phrases, keeping the response order
///
/// # Errors
///
/// Returns [`PromptError::Decode`] if the body is not the expected JSON.
pub fn parse_prompts(body: &str) -> Result<PromptList, PromptError> {
    let parsed: AutocompleteBody =
        serde_json::from_str(body).map_err(|e| PromptError::Decode(e.to_string()))?;
    Ok(parsed.response.results.into_iter().map(|r| r.value).collect())
}

#[async_trait]
impl PromptSource for AnswersPromptSource {
    fn name(&self) -> &'static str {
        "Answers"
    }

    async fn fetch_prompts(&self) -> Result<PromptList, PromptError> {
        let url = self.request_url()?;
        tracing::debug!(endpoint = %self.endpoint.answers_url("autocomplete"), "Fetching prompts");

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PromptError::Status { status, body });
        }

        let body = response.text().await?;
        parse_prompts(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> EndpointConfig {
        EndpointConfig {
            api_key: "secret".to_string(),
            experience_key: "retail-search".to_string(),
            ..EndpointConfig::default()
        }
    }

    #[test]
    fn test_request_url_carries_all_parameters() {
        let source = AnswersPromptSource::new(endpoint()).unwrap();
        let url = source.request_url().unwrap();

        assert_eq!(url.path(), "/v2/accounts/me/answers/autocomplete");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("v"), Some("20190101"));
        assert_eq!(get("api_key"), Some("secret"));
        assert_eq!(get("sessionTrackingEnabled"), Some("false"));
        assert_eq!(get("experienceKey"), Some("retail-search"));
        assert_eq!(get("input"), Some(""));
        assert_eq!(get("version"), Some("PRODUCTION"));
        assert_eq!(get("locale"), Some("en"));
    }

    #[test]
    fn test_invalid_base_is_reported() {
        let source = AnswersPromptSource::new(EndpointConfig {
            api_base: "not a url".to_string(),
            ..endpoint()
        })
        .unwrap();
        assert!(matches!(
            source.request_url(),
            Err(PromptError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_prompts_preserves_order() {
        let body = r#"{"meta":{},"response":{"input":{"value":""},"results":[
            {"value":"boiling pots","matchedSubstrings":[]},
            {"value":"kettles"},
            {"value":""}
        ]}}"#;

        let prompts = parse_prompts(body).unwrap();
        assert_eq!(
            prompts.iter().collect::<Vec<_>>(),
            vec!["boiling pots", "kettles", ""]
        );
    }

    #[test]
    fn test_parse_prompts_without_results_is_empty() {
        let prompts = parse_prompts(r#"{"response":{}}"#).unwrap();
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_parse_prompts_rejects_malformed_body() {
        assert!(matches!(
            parse_prompts("<html>oops</html>"),
            Err(PromptError::Decode(_))
        ));
        assert!(matches!(
            parse_prompts(r#"{"response":{"results":[{"label":"x"}]}}"#),
            Err(PromptError::Decode(_))
        ));
    }
}
