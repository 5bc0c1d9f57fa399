use super::{ProviderBackend, ProviderKind};
use crate::config::{MatchStrictness, SmartyStreetsConfig};
use crate::errors::{Result, ValidatorError};
use crate::models::{Address, AddressResult};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

const REDACTED_PARAMS: [&str; 2] = ["auth-id", "auth-token"];

/// Client for the SmartyStreets US Street API.
///
/// API documentation: <https://smartystreets.com/docs/cloud/us-street-api>
///
/// The API answers `[]` when nothing matches, which is a valid "no match" result.
/// Any transport or HTTP failure is turned into an error result instead of an `Err`.
pub struct SmartyStreetsProvider {
    client: Client,
    base_url: Url,
    auth_id: String,
    auth_token: String,
    candidates: u32,
    match_strictness: MatchStrictness,
}

impl SmartyStreetsProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoint, credentials and request options.
    pub fn new(config: &SmartyStreetsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ValidatorError::Configuration(format!(
                    "Failed to create SmartyStreets client: {}",
                    e
                ))
            })?;

        Self::with_client(config, client)
    }

    /// Creates a provider on top of an existing client, keeping its timeouts and proxies.
    pub fn with_client(config: &SmartyStreetsConfig, client: Client) -> Result<Self> {
        let base_url = Url::parse(&config.api_url).map_err(|e| {
            ValidatorError::Configuration(format!(
                "Invalid SmartyStreets API URL '{}': {}",
                config.api_url, e
            ))
        })?;

        Ok(Self {
            client,
            base_url,
            auth_id: config.auth_id.clone(),
            auth_token: config.auth_token.clone(),
            candidates: config.candidates,
            match_strictness: config.match_strictness,
        })
    }

    /// Full request URI for `address`, credentials included.
    pub fn request_url(&self, address: &Address) -> Url {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("auth-id", &self.auth_id)
            .append_pair("auth-token", &self.auth_token)
            .append_pair("candidates", &self.candidates.to_string())
            .append_pair("match", self.match_strictness.as_str())
            .append_pair("street", &field(&address.street1))
            .append_pair("secondary", "")
            .append_pair("state", &field(&address.state))
            .append_pair("city", &field(&address.city))
            .append_pair("zipcode", &field(&address.zip_code));
        url
    }

    fn parse_results(
        status: StatusCode,
        headers: HashMap<String, Vec<String>>,
        body: String,
        url: &Url,
    ) -> AddressResult {
        match parse_candidates(&body) {
            Ok(candidates) => {
                tracing::info!(
                    "SmartyStreets returned {} candidate(s) (HTTP {})",
                    candidates.len(),
                    status.as_u16()
                );

                let mut result = AddressResult::with_addresses(candidates);
                result
                    .set_http_status_code(status.as_u16())
                    .set_http_headers(headers)
                    .set_http_raw_body(body);
                result
            }
            Err(e) => {
                tracing::warn!("Failed to parse SmartyStreets response: {}", e);

                let mut result = parse_error(
                    status.as_u16(),
                    &format!("Failed to parse SmartyStreets response: {}", e),
                    url,
                );
                result.set_http_headers(headers).set_http_raw_body(body);
                result
            }
        }
    }
}

#[async_trait]
impl ProviderBackend for SmartyStreetsProvider {
    async fn api_call(&self, address: &Address) -> Result<AddressResult> {
        let url = self.request_url(address);

        tracing::debug!("Validating address with SmartyStreets: {}", address);
        // Credentials only ever reach the result message, never the logs
        tracing::debug!("SmartyStreets URL: {}", redact_credentials(&url));

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let status_code = e.status().map(|s| s.as_u16()).unwrap_or(0);
                let e = e.without_url();
                tracing::warn!("SmartyStreets request failed: {}", e);
                return Ok(parse_error(status_code, &e.to_string(), &url));
            }
        };

        let status = response.status();
        let headers = collect_headers(response.headers());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                tracing::warn!("Failed to read SmartyStreets response: {}", e);
                let mut result = parse_error(status.as_u16(), &e.to_string(), &url);
                result.set_http_headers(headers);
                return Ok(result);
            }
        };

        if !status.is_success() {
            tracing::warn!(
                "SmartyStreets returned {} for {}",
                status,
                redact_credentials(&url)
            );
            let mut result = parse_error(status.as_u16(), &describe_status(status, &body), &url);
            result.set_http_headers(headers).set_http_raw_body(body);
            return Ok(result);
        }

        Ok(Self::parse_results(status, headers, body, &url))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::SmartyStreets
    }
}

/// Error result whose message is `"<description>. API: <uri>"`.
///
/// The URI carries the credentials; keep the message away from shared log sinks.
fn parse_error(status_code: u16, description: &str, url: &Url) -> AddressResult {
    let mut result = AddressResult::new();
    result
        .set_error(true)
        .set_http_status_code(status_code)
        .set_message(format!("{}. API: {}", description, url));
    result
}

fn describe_status(status: StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown status");
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {} {}", status.as_u16(), reason)
    } else {
        format!("HTTP {} {}: {}", status.as_u16(), reason, body)
    }
}

fn collect_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut collected: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}

/// Returns the request URI with the credential parameters masked, for logging.
pub fn redact_credentials(url: &Url) -> String {
    let mut base = url.clone();
    base.set_query(None);

    let query = url
        .query_pairs()
        .map(|(key, value)| {
            if REDACTED_PARAMS.iter().any(|param| key == *param) {
                format!("{}=[REDACTED]", key)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query)
    }
}

// ============ Response shape ============

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    input_index: Option<i64>,
    delivery_line_1: Option<String>,
    components: Option<Components>,
    metadata: Option<Metadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Components {
    city_name: Option<String>,
    state_abbreviation: Option<String>,
    zipcode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Metadata {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl From<Candidate> for Address {
    fn from(candidate: Candidate) -> Self {
        let components = candidate.components.unwrap_or_default();
        let metadata = candidate.metadata.unwrap_or_default();

        Address {
            street1: candidate.delivery_line_1,
            city: components.city_name,
            state: components.state_abbreviation,
            zip_code: components.zipcode,
            latitude: metadata.latitude.unwrap_or_default(),
            longitude: metadata.longitude.unwrap_or_default(),
            index: candidate.input_index.unwrap_or_default(),
            ..Address::default()
        }
    }
}

/// Maps a response body to candidates.
///
/// An empty body or any JSON value other than an array means zero candidates.
fn parse_candidates(body: &str) -> serde_json::Result<Vec<Address>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let Value::Array(elements) = serde_json::from_str::<Value>(body)? else {
        return Ok(Vec::new());
    };

    elements
        .into_iter()
        .map(|element| serde_json::from_value::<Candidate>(element).map(Address::from))
        .collect()
}
