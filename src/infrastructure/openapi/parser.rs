//! OpenAPI document parser
//!
//! Turns loaded spec text into a JSON value and walks that value into the
//! typed [`SpecDocument`]. The walk is lenient: missing sections become empty
//! collections and entries that lack required fields are skipped. Only a
//! document whose root is not a mapping is rejected.

use serde_json::Value as JsonValue;
use std::str::FromStr;

use super::types::{HttpMethod, Operation, PathItem, Server, SpecDocument, TagDefinition};
use crate::generation::{GenerationError, RawSpec, SpecFormat};

/// Parse raw spec text into a JSON value according to its format
pub fn parse_document(raw: &RawSpec) -> Result<JsonValue, GenerationError> {
    let value: JsonValue = match raw.format {
        SpecFormat::Json => serde_json::from_str(&raw.content).map_err(|e| {
            GenerationError::ParseError(format!("Failed to parse JSON {}: {e}", raw.source))
        })?,
        SpecFormat::Yaml => yaml_to_json(&raw.content).map_err(|e| {
            GenerationError::ParseError(format!("Failed to parse YAML {}: {e}", raw.source))
        })?,
        SpecFormat::Unknown => match serde_json::from_str(&raw.content) {
            Ok(value) => value,
            Err(_) => yaml_to_json(&raw.content).map_err(|e| {
                GenerationError::ParseError(format!(
                    "Failed to parse OpenAPI spec {}: {e}",
                    raw.source
                ))
            })?,
        },
    };

    if !value.is_object() {
        return Err(GenerationError::ParseError(format!(
            "OpenAPI spec {} must be a mapping at the top level",
            raw.source
        )));
    }

    Ok(value)
}

// Unquoted keys such as `200:` load as YAML integers; serde_json stringifies them
fn yaml_to_json(content: &str) -> Result<JsonValue, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    serde_json::to_value(value).map_err(serde::ser::Error::custom)
}

/// Walks a JSON value into a [`SpecDocument`]
pub struct SpecParser<'a> {
    json: &'a JsonValue,
}

impl<'a> SpecParser<'a> {
    pub fn new(json: &'a JsonValue) -> Self {
        Self { json }
    }

    /// Convenience for parsing straight from loaded text
    pub fn parse_raw(raw: &RawSpec) -> Result<SpecDocument, GenerationError> {
        let json = parse_document(raw)?;
        SpecParser::new(&json).parse()
    }

    pub fn parse(&self) -> Result<SpecDocument, GenerationError> {
        if !self.json.is_object() {
            return Err(GenerationError::ParseError(
                "OpenAPI spec must be a mapping at the top level".to_string(),
            ));
        }

        let document = SpecDocument {
            tags: self.parse_tags(),
            servers: self.parse_servers(),
            paths: self.parse_paths(),
        };

        tracing::debug!(
            "Parsed spec with {} tags, {} servers, {} paths",
            document.tags.len(),
            document.servers.len(),
            document.paths.len()
        );

        Ok(document)
    }

    fn parse_tags(&self) -> Vec<TagDefinition> {
        self.json
            .get("tags")
            .and_then(JsonValue::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| {
                        Some(TagDefinition {
                            name: tag.get("name").and_then(JsonValue::as_str)?.to_string(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_servers(&self) -> Vec<Server> {
        self.json
            .get("servers")
            .and_then(JsonValue::as_array)
            .map(|servers| {
                servers
                    .iter()
                    .map(|server| Server {
                        url: server
                            .get("url")
                            .and_then(JsonValue::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parse_paths(&self) -> Vec<PathItem> {
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        paths
            .iter()
            .map(|(path, item)| PathItem {
                path: path.clone(),
                operations: parse_operations(item),
            })
            .collect()
    }
}

fn parse_operations(item: &JsonValue) -> Vec<Operation> {
    let Some(entries) = item.as_object() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(key, op)| {
            // path-level keys such as `parameters` or `servers` are not methods
            let method = HttpMethod::from_str(key).ok()?;
            let op = op.as_object()?;

            Some(Operation {
                method,
                summary: non_empty_str(op.get("summary")),
                tags: op
                    .get("tags")
                    .and_then(JsonValue::as_array)
                    .map(|tags| {
                        tags.iter()
                            .filter_map(JsonValue::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn non_empty_str(value: Option<&JsonValue>) -> Option<String> {
    value
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(content: &str) -> RawSpec {
        RawSpec::new("openapi.yaml", content, SpecFormat::Yaml)
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let doc = SpecParser::parse_raw(&yaml(
            r#"openapi: 3.1.0
info:
  title: Test API
  version: 1.0.0
tags:
  - name: Zeta
  - name: Alpha
paths:
  /z:
    post:
      summary: Z post
    get:
      summary: Z get
  /a:
    get:
      summary: A get
"#,
        ))
        .unwrap();

        let tags: Vec<_> = doc.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, vec!["Zeta", "Alpha"]);

        let paths: Vec<_> = doc.paths.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/z", "/a"]);
        let methods: Vec<_> = doc.paths[0].operations.iter().map(|o| o.method).collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
    }

    #[test]
    fn test_parse_skips_non_method_keys() {
        let doc = SpecParser::parse_raw(&yaml(
            r#"paths:
  /projects/{id}:
    summary: Project by id
    parameters:
      - name: id
        in: path
    get:
      summary: Get project
"#,
        ))
        .unwrap();

        assert_eq!(doc.paths[0].operations.len(), 1);
        assert_eq!(doc.paths[0].operations[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_parse_optional_fields() {
        let doc = SpecParser::parse_raw(&yaml(
            r#"paths:
  /events:
    get:
      summary: ""
      tags: []
    post:
      tags: [Events, Ingest]
"#,
        ))
        .unwrap();

        let ops = &doc.paths[0].operations;
        assert_eq!(ops[0].summary, None);
        assert_eq!(ops[0].primary_tag(), None);
        assert_eq!(ops[1].summary, None);
        assert_eq!(ops[1].primary_tag(), Some("Events"));
    }

    #[test]
    fn test_parse_missing_sections_are_empty() {
        let doc = SpecParser::parse_raw(&yaml("openapi: 3.1.0\n")).unwrap();
        assert!(doc.tags.is_empty());
        assert!(doc.servers.is_empty());
        assert!(doc.paths.is_empty());
        assert_eq!(doc.first_server_url(), None);
    }

    #[test]
    fn test_parse_json_document() {
        let raw = RawSpec::new(
            "openapi.json",
            r#"{"openapi":"3.1.0","servers":[{"url":"https://api.example.com"}],"paths":{}}"#,
            SpecFormat::Json,
        );
        let doc = SpecParser::parse_raw(&raw).unwrap();
        assert_eq!(doc.first_server_url(), Some("https://api.example.com"));
    }

    #[test]
    fn test_unknown_format_falls_back_to_yaml() {
        let raw = RawSpec::new(
            "spec",
            "servers:\n  - url: https://api.example.com\n",
            SpecFormat::Unknown,
        );
        let doc = SpecParser::parse_raw(&raw).unwrap();
        assert_eq!(doc.first_server_url(), Some("https://api.example.com"));
    }

    #[test]
    fn test_yaml_integer_keys_become_strings() {
        let raw = yaml(
            r#"paths:
  /health:
    get:
      responses:
        200:
          description: OK
"#,
        );
        let json = parse_document(&raw).unwrap();
        assert_eq!(
            json.pointer("/paths/~1health/get/responses/200/description"),
            Some(&JsonValue::from("OK"))
        );
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result = SpecParser::parse_raw(&yaml("paths: [unclosed\n"));
        assert!(matches!(result, Err(GenerationError::ParseError(_))));
    }

    #[test]
    fn test_scalar_root_is_an_error() {
        let result = SpecParser::parse_raw(&yaml("just a string\n"));
        assert!(matches!(result, Err(GenerationError::ParseError(_))));
    }
}
