//! HTTP adapter for the remote resource API.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::io::config::SyncConfig;
use crate::io::error::TransportError;
use crate::io::gateway::{Gateway, GatewayRequest, Method};

/// Gateway that issues real HTTP requests with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Gateway for HttpGateway {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: GatewayRequest) -> Result<Value, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(err = %err, "request failed before a response");
            TransportError::Network(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "non-success response");
            return Err(TransportError::status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "response received");
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let gateway = HttpGateway::new(&SyncConfig {
            base_url: "http://localhost:9000/".to_string(),
            request_timeout_secs: 1,
        })
        .expect("gateway");
        assert_eq!(gateway.url("/api/groups"), "http://localhost:9000/api/groups");
    }

    #[test]
    fn rejects_invalid_config() {
        let err = HttpGateway::new(&SyncConfig {
            base_url: String::new(),
            request_timeout_secs: 1,
        })
        .expect_err("empty base url");
        assert!(err.to_string().contains("base_url"));
    }
}
