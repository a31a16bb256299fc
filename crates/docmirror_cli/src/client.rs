//! Blocking reqwest implementation of the engine's HTTP client seam.

use docmirror_sync_engine::{HttpClient, HttpMethod, HttpResponse, SyncConfig};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;

/// Header carrying the static credential.
const AUTH_HEADER: &str = "X-Auth-Token";

/// HTTP client that sends the credential and JSON headers on every request.
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds a client from the run configuration.
    pub fn new(config: &SyncConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(&config.token)?;
        token.set_sensitive(true);
        headers.insert(AUTH_HEADER, token);

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn send(&self, method: HttpMethod, url: &str, body: Vec<u8>) -> Result<HttpResponse, String> {
        let method = match method {
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        };

        let response = self
            .client
            .request(method, url)
            .body(body)
            .send()
            .map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| e.to_string())?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
