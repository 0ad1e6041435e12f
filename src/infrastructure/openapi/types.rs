//! Typed view of the parts of an OpenAPI document the generator reads

use std::fmt;
use std::str::FromStr;

use crate::generation::GenerationError;

/// HTTP methods an OpenAPI path item can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Lowercase key as it appears under a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Uppercase form used in rendered docs
    pub fn as_upper(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

impl FromStr for HttpMethod {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "put" => Ok(HttpMethod::Put),
            "post" => Ok(HttpMethod::Post),
            "delete" => Ok(HttpMethod::Delete),
            "options" => Ok(HttpMethod::Options),
            "head" => Ok(HttpMethod::Head),
            "patch" => Ok(HttpMethod::Patch),
            "trace" => Ok(HttpMethod::Trace),
            _ => Err(GenerationError::ParseError(format!(
                "Unknown HTTP method: {s}"
            ))),
        }
    }
}

/// Top-level tag declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDefinition {
    pub name: String,
}

/// Server definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub url: String,
}

/// A single method on a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub method: HttpMethod,
    /// Absent when the document has no summary or an empty one
    pub summary: Option<String>,
    /// Tags in the order the operation lists them
    pub tags: Vec<String>,
}

impl Operation {
    /// The tag that owns this operation in the endpoint index
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// All operations declared under one path, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathItem {
    pub path: String,
    pub operations: Vec<Operation>,
}

/// The parsed specification document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecDocument {
    pub tags: Vec<TagDefinition>,
    pub servers: Vec<Server>,
    pub paths: Vec<PathItem>,
}

impl SpecDocument {
    /// URL of the first declared server, if it is non-empty
    pub fn first_server_url(&self) -> Option<&str> {
        self.servers
            .first()
            .map(|server| server.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Iterate every operation with the path it lives under
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.paths.iter().flat_map(|item| {
            item.operations
                .iter()
                .map(move |operation| (item.path.as_str(), operation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_from_str_is_case_insensitive() {
        assert_eq!(HttpMethod::from_str("post").unwrap(), HttpMethod::Post);
        assert_eq!(HttpMethod::from_str("PATCH").unwrap(), HttpMethod::Patch);
        assert!(HttpMethod::from_str("parameters").is_err());
    }

    #[test]
    fn test_http_method_display_is_uppercase() {
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
        assert_eq!(HttpMethod::Get.as_str(), "get");
    }

    #[test]
    fn test_first_server_url_skips_empty() {
        let mut doc = SpecDocument::default();
        assert_eq!(doc.first_server_url(), None);

        doc.servers.push(Server { url: String::new() });
        assert_eq!(doc.first_server_url(), None);

        doc.servers[0].url = "https://api.example.com".to_string();
        assert_eq!(doc.first_server_url(), Some("https://api.example.com"));
    }
}
