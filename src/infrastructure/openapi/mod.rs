//! OpenAPI loading and parsing

pub mod composite_loader;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

pub use composite_loader::CompositeSpecLoader;
pub use file_loader::FileSpecLoader;
pub use http_loader::HttpSpecLoader;
pub use parser::{SpecParser, parse_document};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{GenerationError, SpecFormat, SpecLoader};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_loader_yaml() {
        let loader = FileSpecLoader::new();

        let mut temp_file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("Failed to create temp file");
        let spec_yaml = "openapi: 3.1.0\ntags:\n  - name: Projects\npaths: {}\n";
        temp_file
            .write_all(spec_yaml.as_bytes())
            .expect("Failed to write temp file");
        temp_file.flush().expect("Failed to flush temp file");

        let raw = loader
            .load(temp_file.path().to_str().unwrap())
            .await
            .expect("Failed to load spec");

        assert_eq!(raw.format, SpecFormat::Yaml);
        assert_eq!(raw.content, spec_yaml);

        let doc = SpecParser::parse_raw(&raw).unwrap();
        assert_eq!(doc.tags[0].name, "Projects");
    }

    #[tokio::test]
    async fn test_file_loader_not_found() {
        let loader = FileSpecLoader::new();

        let result = loader.load("/nonexistent/openapi.yaml").await;
        assert!(matches!(result, Err(GenerationError::LoadError(_))));
    }

    #[tokio::test]
    async fn test_composite_loader_file() {
        let loader = CompositeSpecLoader::new().unwrap();

        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(br#"{"openapi": "3.1.0", "paths": {}}"#)
            .expect("Failed to write temp file");
        temp_file.flush().expect("Failed to flush temp file");

        let raw = loader.load(temp_file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(raw.format, SpecFormat::Unknown);
        assert!(SpecParser::parse_raw(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_composite_loader_http() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/openapi.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "openapi: 3.1.0\nservers:\n  - url: https://api.example.com\n",
            ))
            .mount(&mock_server)
            .await;

        let loader = CompositeSpecLoader::new().unwrap();
        let url = format!("{}/openapi.yaml", mock_server.uri());
        let raw = loader.load(&url).await.unwrap();

        let doc = SpecParser::parse_raw(&raw).unwrap();
        assert_eq!(doc.first_server_url(), Some("https://api.example.com"));
    }
}
