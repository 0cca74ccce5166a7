// src/client/rest.rs
use super::error::{ApiError, ClientError};
use super::QueryClient;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

const REST_PATH: &str = "rest/v1/";

/// Client for the Supabase REST (PostgREST) endpoint.
#[derive(Debug, Clone)]
pub struct RestClient {
    base: Url,
    client: Client,
    timeout: Duration,
}

impl RestClient {
    /// Validate the endpoint and key and build the underlying HTTP client.
    /// Nothing is sent over the network here.
    pub fn new(endpoint_url: &str, access_key: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint_url = endpoint_url.trim();
        let access_key = access_key.trim();

        if endpoint_url.is_empty() {
            return Err(ClientError::MissingUrl);
        }
        if access_key.is_empty() {
            return Err(ClientError::MissingKey);
        }

        let base = rest_base(endpoint_url)?;
        let headers = auth_headers(access_key)?;

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        debug!("REST client bound to {}", base);

        Ok(Self {
            base,
            client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of the count query for `resource`.
    pub fn count_url(&self, resource: &str) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl {
                url: self.base.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .push(resource);
        url.query_pairs_mut().append_pair("select", "count");
        Ok(url)
    }
}

#[async_trait]
impl QueryClient for RestClient {
    async fn count_rows(&self, resource: &str) -> Result<Value, ClientError> {
        let url = self.count_url(resource)?;
        debug!("GET {}", url);

        let response = match timeout(self.timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(ClientError::Timeout(self.timeout)),
            Ok(Err(e)) => return Err(ClientError::Transport(describe(&e))),
            Err(_) => return Err(ClientError::Timeout(self.timeout)),
        };

        let status = response.status();
        let body = match timeout(self.timeout, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(ClientError::Transport(describe(&e))),
            Err(_) => return Err(ClientError::Timeout(self.timeout)),
        };

        if !status.is_success() {
            return Err(ClientError::Api(ApiError::from_body(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            )));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Api(ApiError {
            status: status.as_u16(),
            code: None,
            message: format!("response was not valid JSON: {}", e),
            details: None,
            hint: None,
        }))
    }
}

/// `{endpoint}/rest/v1/`, keeping any path already on the endpoint.
fn rest_base(endpoint_url: &str) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: endpoint_url.to_string(),
        reason,
    };

    let mut url = Url::parse(endpoint_url).map_err(|e| invalid(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("must be a valid HTTP or HTTPS URL, got scheme {:?}", other))),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.join(REST_PATH).map_err(|e| invalid(e.to_string()))
}

fn auth_headers(access_key: &str) -> Result<HeaderMap, ClientError> {
    let apikey = HeaderValue::from_str(access_key)
        .map_err(|_| ClientError::InvalidKey("contains characters not allowed in a header".to_string()))?;
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", access_key))
        .map_err(|_| ClientError::InvalidKey("contains characters not allowed in a header".to_string()))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert("apikey", apikey);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    Ok(headers)
}

// reqwest's Display stops at the outermost layer; walk the sources so
// "connection refused" or the DNS failure shows up in the report.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
