//! Answers Autocomplete Backend
//!
//! Runs each keystroke as a universal query restricted to the configured
//! verticals.
//!
//! # Answers API
//!
//! `GET /v2/accounts/me/answers/query?…&input=boil&restrictVerticals=products&limit={"products":4}`
//!
//! ```json
//! {
//!   "response": {
//!     "modules": [
//!       {
//!         "verticalConfigId": "products",
//!         "results": [
//!           { "data": { "name": "Boiling Pot", "c_customPhoto": { "url": "https://…" } } }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::pipeline::AutocompleteSettings;
use super::traits::{
    AutocompleteBackend, AutocompleteError, SuggestionQuery, SuggestionResult, VerticalResults,
};
use crate::config::EndpointConfig;

#[derive(Debug, Deserialize)]
struct QueryBody {
    response: QueryResponse,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    modules: Vec<QueryModule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryModule {
    vertical_config_id: String,
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    data: serde_json::Map<String, Value>,
}

/// Autocomplete backend backed by the Answers universal query endpoint
#[derive(Clone, Debug)]
pub struct AnswersAutocomplete {
    endpoint: EndpointConfig,
    settings: AutocompleteSettings,
    http_client: reqwest::Client,
}

impl AnswersAutocomplete {
    /// Create a backend for the given endpoint and vertical settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: EndpointConfig,
        settings: AutocompleteSettings,
    ) -> Result<Self, AutocompleteError> {
        let http_client = endpoint.http_client()?;
        Ok(Self::with_client(endpoint, settings, http_client))
    }

    /// Create a backend sharing an existing HTTP client
    #[must_use]
    pub fn with_client(
        endpoint: EndpointConfig,
        settings: AutocompleteSettings,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            endpoint,
            settings,
            http_client,
        }
    }

    /// URL of the query for `text`
    ///
    /// # Errors
    ///
    /// Returns [`AutocompleteError::InvalidUrl`] if the configured base is not a URL.
    pub fn request_url(&self, text: &str) -> Result<reqwest::Url, AutocompleteError> {
        let limits: serde_json::Map<String, Value> = self
            .settings
            .verticals
            .iter()
            .map(|v| (v.clone(), Value::from(self.settings.limit_for(v))))
            .collect();

        let mut params = self.endpoint.base_params();
        params.push(("input", text.to_string()));
        params.push(("restrictVerticals", self.settings.verticals.join(",")));
        params.push(("limit", Value::Object(limits).to_string()));

        reqwest::Url::parse_with_params(&self.endpoint.answers_url("query"), &params)
            .map_err(|e| AutocompleteError::InvalidUrl(e.to_string()))
    }
}

/// Decode a universal query body into per-vertical results
///
/// Records with no `name` keep an empty label; the pipeline drops them.
///
/// # Errors
///
/// Returns [`AutocompleteError::Decode`] if the body is not the expected JSON.
pub fn parse_results(body: &str, image_field: &str) -> Result<Vec<VerticalResults>, AutocompleteError> {
    let parsed: QueryBody =
        serde_json::from_str(body).map_err(|e| AutocompleteError::Decode(e.to_string()))?;

    Ok(parsed
        .response
        .modules
        .into_iter()
        .map(|module| {
            let results = module
                .results
                .into_iter()
                .map(|result| SuggestionResult {
                    label: result
                        .data
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    preview_image_url: result.data.get(image_field).and_then(image_url),
                })
                .collect();
            VerticalResults::new(module.vertical_config_id, results)
        })
        .collect())
}

/// Image field is either a bare URL or an image object
fn image_url(value: &Value) -> Option<String> {
    let url = match value {
        Value::String(url) => Some(url.as_str()),
        Value::Object(fields) => fields
            .get("url")
            .and_then(Value::as_str)
            .or_else(|| fields.get("image")?.get("url")?.as_str()),
        _ => None,
    }?;
    (!url.is_empty()).then(|| url.to_string())
}

#[async_trait]
impl AutocompleteBackend for AnswersAutocomplete {
    fn name(&self) -> &'static str {
        "Answers"
    }

    async fn query(&self, query: &SuggestionQuery) -> Result<Vec<VerticalResults>, AutocompleteError> {
        let url = self.request_url(&query.text)?;
        tracing::debug!(request_id = %query.request_id, "Querying autocomplete");

        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AutocompleteError::Status { status, body });
        }

        let body = response.text().await?;
        parse_results(&body, &self.settings.image_field)
    }
}
