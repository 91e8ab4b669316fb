//! Request assembly shared by every resource client.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, HttpTransport, Transport};
use crate::model::{Model, format_datetime};

const ACCOUNT_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-account-token");

/// Per-call overrides. Extra headers are applied last; extra query
/// parameters sit underneath the operation's named parameters.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub api_key: Option<String>,
    pub account_token: Option<String>,
    pub additional_headers: BTreeMap<String, String>,
    pub additional_query_parameters: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn account_token(mut self, token: impl Into<String>) -> Self {
        self.account_token = Some(token.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_query_parameters
            .insert(name.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Values that can appear in a query string.
pub trait QueryValue {
    fn to_query(&self) -> String;
}

impl QueryValue for String {
    fn to_query(&self) -> String {
        self.clone()
    }
}

impl QueryValue for bool {
    fn to_query(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for i64 {
    fn to_query(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for DateTime<Utc> {
    fn to_query(&self) -> String {
        format_datetime(self)
    }
}

/// Ordered query parameters; setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Adds the parameter only when it is present.
    pub fn opt<V: QueryValue>(mut self, key: &str, value: &Option<V>) -> Self {
        if let Some(value) = value {
            self.set(key, value.to_query());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Caller extras first, then these named parameters on top.
    fn layered_over(self, extra: &BTreeMap<String, String>) -> Vec<(String, String)> {
        let mut merged = QueryParams::new();
        for (key, value) in extra {
            merged.set(key, value.clone());
        }
        for (key, value) in self.pairs {
            merged.set(&key, value);
        }
        merged.pairs
    }
}

/// Shared, cheaply cloned handle every resource client sends through.
#[derive(Clone)]
pub struct RequestClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(config.base_url.clone(), &config.user_agent);
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get<T: Model>(
        &self,
        path: &str,
        query: QueryParams,
        options: Option<&RequestOptions>,
    ) -> Result<T> {
        let request = self.build(Method::GET, path, query, None, options)?;
        self.execute(request)
    }

    pub fn post<T: Model, B: Model>(
        &self,
        path: &str,
        body: &B,
        options: Option<&RequestOptions>,
    ) -> Result<T> {
        let request = self.build(
            Method::POST,
            path,
            QueryParams::new(),
            Some(body.to_value()),
            options,
        )?;
        self.execute(request)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        query: QueryParams,
        body: Option<serde_json::Value>,
        options: Option<&RequestOptions>,
    ) -> Result<HttpRequest> {
        let defaults = RequestOptions::default();
        let options = options.unwrap_or(&defaults);
        Ok(HttpRequest {
            method,
            path: path.to_string(),
            headers: self.headers(options)?,
            query: query.layered_over(&options.additional_query_parameters),
            body,
            timeout: options.timeout.or(self.config.timeout),
        })
    }

    fn headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let api_key = options.api_key.as_deref().unwrap_or(&self.config.api_key);
        headers.insert(AUTHORIZATION, header_value("Authorization", &format!("Bearer {api_key}"))?);

        let account_token = options
            .account_token
            .as_deref()
            .or(self.config.account_token.as_deref());
        if let Some(token) = account_token {
            headers.insert(ACCOUNT_TOKEN_HEADER, header_value(ACCOUNT_TOKEN_HEADER.as_str(), token)?);
        }

        for (name, value) in &options.additional_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidHeader { name: name.clone() })?;
            headers.insert(header_name, header_value(name, value)?);
        }
        Ok(headers)
    }

    #[instrument(level = "debug", skip_all, fields(method = %request.method, path = %request.path))]
    fn execute<T: Model>(&self, request: HttpRequest) -> Result<T> {
        let response = self.transport.send(request)?;
        debug!(status = response.status, "response received");
        if !response.is_success() {
            return Err(Error::Http {
                status: response.status,
                body: response.body,
            });
        }
        T::from_json(&response.body)
    }
}

impl fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Percent-encodes an id for use as one path segment, so `/`, `?` and `#`
/// cannot change the route.
pub fn path_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_omitted() {
        let query = QueryParams::new()
            .opt("cursor", &None::<String>)
            .opt("page_size", &Some(50_i64))
            .opt("include_remote_data", &None::<bool>);
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("page_size"), Some("50"));
    }

    #[test]
    fn test_named_parameters_win_over_extras() {
        let mut extra = BTreeMap::new();
        extra.insert("page_size".to_string(), "10".to_string());
        extra.insert("trace".to_string(), "1".to_string());
        let merged = QueryParams::new()
            .opt("page_size", &Some(25_i64))
            .layered_over(&extra);
        assert_eq!(
            merged,
            vec![
                ("page_size".to_string(), "25".to_string()),
                ("trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_path_segment_escapes_route_characters() {
        assert_eq!(path_segment("job-1_a.b~c"), "job-1_a.b~c");
        assert_eq!(path_segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(path_segment("two words"), "two%20words");
    }

    #[test]
    fn test_datetime_query_is_rfc3339() {
        let at = DateTime::parse_from_rfc3339("2021-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let query = QueryParams::new().opt("created_after", &Some(at));
        assert_eq!(query.get("created_after"), Some("2021-01-01T00:00:00Z"));
    }
}
