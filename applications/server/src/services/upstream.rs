//! Upstream audio fetch
//!
//! The proxy buffers the whole file from the drive download endpoint and
//! hands it back in one response. One request per call; redirects are
//! followed, nothing is retried.

use crate::config::ProxySettings;
use crate::error::{ProxyError, Result, ServerError};
use async_trait::async_trait;
use bytes::Bytes;
use lesson_core::drive::download_url;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Source of audio bytes for a drive file id
#[async_trait]
pub trait AudioUpstream: Send + Sync {
    /// Fetch the complete file body
    async fn fetch(&self, file_id: &str) -> std::result::Result<Bytes, ProxyError>;
}

/// Fetches from the public drive download endpoint
#[derive(Debug, Clone)]
pub struct DriveUpstream {
    http: Client,
    download_url: String,
}

impl DriveUpstream {
    /// Create an upstream for `download_url` with an overall request timeout
    pub fn new(download_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("LessonServer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ServerError::Internal(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            download_url: download_url.into(),
        })
    }

    pub fn from_settings(settings: &ProxySettings) -> Result<Self> {
        Self::new(settings.download_url.clone(), settings.timeout())
    }
}

#[async_trait]
impl AudioUpstream for DriveUpstream {
    async fn fetch(&self, file_id: &str) -> std::result::Result<Bytes, ProxyError> {
        let url = download_url(&self.download_url, file_id)
            .map_err(|e| ProxyError::InvalidUrl(e.to_string()))?;

        debug!("Fetching audio from {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes for file {}", body.len(), file_id);
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream(server: &MockServer) -> DriveUpstream {
        DriveUpstream::new(
            format!("{}/uc?export=download", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_body_with_id_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/uc"))
            .and(query_param("export", "download"))
            .and(query_param("id", "abc_123"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3audio".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let body = upstream(&server).fetch("abc_123").await.unwrap();
        assert_eq!(&body[..], b"ID3audio");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = upstream(&server).fetch("abc").await;
        assert!(matches!(result, Err(ProxyError::UpstreamStatus(403))));
    }

    #[tokio::test]
    async fn invalid_base_url_is_reported() {
        let upstream = DriveUpstream::new("not a url", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            upstream.fetch("abc").await,
            Err(ProxyError::InvalidUrl(_))
        ));
    }
}
