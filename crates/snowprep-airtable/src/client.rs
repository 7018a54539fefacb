//! Blocking Airtable API client.

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::error::{AirtableError, Result};
use crate::types::{AirtableRecord, RecordPage};

/// Airtable REST API base URL.
const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("snowprep/", env!("CARGO_PKG_VERSION"));

/// Client for the Airtable list-records endpoint.
#[derive(Clone)]
pub struct AirtableClient {
    client: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for AirtableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirtableClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AirtableClient {
    /// Creates a client authenticating with a personal access token.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AirtableError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: AIRTABLE_API_URL.to_string(),
        })
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches every record of a table, following `offset` until the last page.
    pub fn fetch_records(
        &self,
        base_id: &str,
        table_id: &str,
        filter_formula: Option<&str>,
    ) -> Result<Vec<AirtableRecord>> {
        let mut all_records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(base_id, table_id, filter_formula, offset.as_deref())?;
            tracing::debug!(
                table = table_id,
                fetched = page.records.len(),
                "fetched records page"
            );
            all_records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        Ok(all_records)
    }

    fn fetch_page(
        &self,
        base_id: &str,
        table_id: &str,
        filter_formula: Option<&str>,
        offset: Option<&str>,
    ) -> Result<RecordPage> {
        let url = self.page_url(base_id, table_id, filter_formula, offset)?;
        tracing::debug!("Fetching records from {}", url.path());

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        tracing::debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            return Err(AirtableError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_page(&body)
    }

    fn page_url(
        &self,
        base_id: &str,
        table_id: &str,
        filter_formula: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Url> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(formula) = filter_formula {
            params.push(("filterByFormula", formula));
        }
        if let Some(offset) = offset {
            params.push(("offset", offset));
        }

        let base = format!("{}/{}/{}", self.base_url, base_id, table_id);
        let url = if params.is_empty() {
            Url::parse(&base)
        } else {
            Url::parse_with_params(&base, &params)
        };
        url.map_err(|e| AirtableError::Network(format!("invalid request URL {base}: {e}")))
    }
}

/// Parses a list-records response body.
///
/// A body carrying `error` becomes [`AirtableError::Api`]; a body without a
/// `records` array becomes [`AirtableError::UnexpectedFormat`].
pub fn parse_page(body: &str) -> Result<RecordPage> {
    let value: Value = serde_json::from_str(body)?;

    if let Some(error) = value.get("error") {
        return Err(AirtableError::Api(error.to_string()));
    }
    if !value.get("records").is_some_and(Value::is_array) {
        return Err(AirtableError::UnexpectedFormat(truncate(body, 200)));
    }

    Ok(serde_json::from_value(value)?)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
