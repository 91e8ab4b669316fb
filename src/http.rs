use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::error::Result;

/// A fully assembled request, ready for a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and hands back the raw response. Implementations own
/// connection handling; retries are not expected here.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest transport against a fixed base URL.
///
/// The reqwest client owns a private runtime, so it is only built on the
/// first `send`. Constructing the transport is safe inside an async context;
/// sending is not, which is why the async twins send from `spawn_blocking`.
pub struct HttpTransport {
    base_url: String,
    user_agent: String,
    client: OnceLock<Client>,
}

impl HttpTransport {
    pub fn new(base_url: String, user_agent: &str) -> Self {
        Self {
            base_url,
            user_agent: user_agent.to_string(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let built = Client::builder().user_agent(&self.user_agent).build()?;
        Ok(self.client.get_or_init(|| built))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = self.url(&request.path);
        let mut req = self
            .client()?
            .request(request.method, url)
            .headers(request.headers);
        req = apply_query(req, &request.query);
        if let Some(value) = request.body {
            req = req.json(&value);
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(HttpResponse { status, body })
    }
}

fn apply_query(req: RequestBuilder, query: &[(String, String)]) -> RequestBuilder {
    if query.is_empty() {
        return req;
    }
    req.query(&query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let missing = HttpResponse {
            status: 404,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }

    #[test]
    fn test_client_is_built_on_first_use() {
        let transport = HttpTransport::new("https://api.merge.dev/".to_string(), "test-agent");
        assert!(transport.client.get().is_none());
        assert_eq!(
            transport.url("/api/ats/v1/jobs"),
            "https://api.merge.dev/api/ats/v1/jobs"
        );
    }

    #[tokio::test]
    async fn test_transport_can_be_created_inside_a_runtime() {
        let transport = HttpTransport::new("https://api.merge.dev".to_string(), "test-agent");
        drop(transport);
    }
}
