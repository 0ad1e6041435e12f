//! HTTP-based OpenAPI spec loader

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::generation::{GenerationError, RawSpec, SpecFormat, SpecLoader};

/// Loads OpenAPI specifications from HTTP/HTTPS URLs
pub struct HttpSpecLoader {
    client: Client,
}

impl HttpSpecLoader {
    pub fn new() -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| GenerationError::LoadError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SpecLoader for HttpSpecLoader {
    async fn load(&self, source: &str) -> Result<RawSpec, GenerationError> {
        let url = Url::parse(source)
            .map_err(|e| GenerationError::LoadError(format!("Invalid spec URL {source}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GenerationError::LoadError(format!(
                "HttpSpecLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        tracing::debug!("Fetching OpenAPI spec from {url}");
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to fetch OpenAPI spec from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::LoadError(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let content = response.text().await.map_err(|e| {
            GenerationError::LoadError(format!("Failed to read response body: {e}"))
        })?;

        let format = SpecFormat::detect(url.path(), content_type.as_deref());
        Ok(RawSpec::new(source, content, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_loader_json() {
        let mock_server = MockServer::start().await;

        let spec_json = r#"{"openapi": "3.1.0", "paths": {}}"#;

        Mock::given(method("GET"))
            .and(path("/spec"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(spec_json, "application/json"))
            .mount(&mock_server)
            .await;

        let loader = HttpSpecLoader::new().unwrap();
        let url = format!("{}/spec", mock_server.uri());
        let raw = loader.load(&url).await.unwrap();

        assert_eq!(raw.format, SpecFormat::Json);
        assert_eq!(raw.content, spec_json);
        assert_eq!(raw.source, url);
    }

    #[tokio::test]
    async fn test_http_loader_yaml_by_extension() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/openapi.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("openapi: 3.1.0\n"))
            .mount(&mock_server)
            .await;

        let loader = HttpSpecLoader::new().unwrap();
        let url = format!("{}/openapi.yaml", mock_server.uri());
        let raw = loader.load(&url).await.unwrap();

        assert_eq!(raw.format, SpecFormat::Yaml);
    }

    #[tokio::test]
    async fn test_http_loader_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notfound"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let loader = HttpSpecLoader::new().unwrap();
        let url = format!("{}/notfound", mock_server.uri());
        let result = loader.load(&url).await;

        match result {
            Err(GenerationError::LoadError(msg)) => assert!(msg.contains("HTTP 404")),
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_loader_rejects_other_schemes() {
        let loader = HttpSpecLoader::new().unwrap();
        let result = loader.load("file:///path/to/spec.yaml").await;

        match result {
            Err(GenerationError::LoadError(msg)) => assert!(msg.contains("only handles HTTP")),
            other => panic!("Expected LoadError, got {other:?}"),
        }
    }
}
