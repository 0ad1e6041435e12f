//! Full API reference rendered as a single markdown document

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::fmt::{self, Write};
use std::str::FromStr;

use super::schema::{RefResolver, SchemaWriter, inline_value, one_line, type_label};
use crate::generation::{GenerationError, HttpMethod, MarkdownConverter, RawSpec};
use crate::infrastructure::openapi::parse_document;

/// Nesting limit for property lists
pub const DEFAULT_MAX_DEPTH: usize = 4;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static ANCHOR_STRIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s_-]").expect("valid regex"));

/// Converts an OpenAPI document into a markdown reference
pub struct ReferenceMarkdownConverter {
    max_depth: usize,
}

impl ReferenceMarkdownConverter {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Render synchronously from an already parsed document
    pub fn render(&self, document: &JsonValue) -> Result<String, GenerationError> {
        let mut out = String::new();
        ReferenceWriter::new(document, self.max_depth)
            .write(&mut out)
            .map_err(|_| {
                GenerationError::ConversionError("Failed to write markdown reference".to_string())
            })?;

        let collapsed = BLANK_RUNS.replace_all(&out, "\n\n");
        let mut markdown = collapsed.trim().to_string();
        markdown.push('\n');
        Ok(markdown)
    }
}

impl Default for ReferenceMarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkdownConverter for ReferenceMarkdownConverter {
    async fn convert(&self, spec: &RawSpec) -> Result<String, GenerationError> {
        let document = parse_document(spec)?;
        self.render(&document)
    }
}

/// GitHub-style heading anchor
pub fn anchor_slug(heading: &str) -> String {
    ANCHOR_STRIP
        .replace_all(&heading.to_lowercase(), "")
        .replace(' ', "-")
}

struct OperationRef<'a> {
    method: HttpMethod,
    path: &'a str,
    path_item: &'a JsonValue,
    operation: &'a JsonValue,
    heading: String,
}

struct ReferenceWriter<'a> {
    resolver: RefResolver<'a>,
    schemas: SchemaWriter<'a>,
}

impl<'a> ReferenceWriter<'a> {
    fn new(document: &'a JsonValue, max_depth: usize) -> Self {
        let resolver = RefResolver::new(document);
        Self {
            resolver,
            schemas: SchemaWriter::new(resolver, max_depth),
        }
    }

    fn root(&self) -> &'a JsonValue {
        self.resolver.root()
    }

    fn write(&self, out: &mut String) -> fmt::Result {
        self.write_header(out)?;
        self.write_servers(out)?;
        self.write_security_schemes(out)?;
        self.write_operations(out)?;
        self.write_component_schemas(out)
    }

    fn write_header(&self, out: &mut String) -> fmt::Result {
        let info = self.root().get("info");
        let title = info
            .and_then(|i| i.get("title"))
            .and_then(JsonValue::as_str)
            .unwrap_or("API Reference");
        writeln!(out, "# {title}\n")?;

        let openapi = self
            .root()
            .get("openapi")
            .or_else(|| self.root().get("swagger"))
            .and_then(JsonValue::as_str);
        if let Some(openapi) = openapi {
            writeln!(out, "- **OpenAPI Version:** `{openapi}`")?;
        }
        if let Some(version) = info.and_then(|i| i.get("version")).map(inline_value) {
            writeln!(out, "- **API Version:** `{version}`")?;
        }
        writeln!(out)?;

        if let Some(description) = info
            .and_then(|i| i.get("description"))
            .and_then(JsonValue::as_str)
        {
            writeln!(out, "{}\n", description.trim())?;
        }
        Ok(())
    }

    fn write_servers(&self, out: &mut String) -> fmt::Result {
        let Some(servers) = self.root().get("servers").and_then(JsonValue::as_array) else {
            return Ok(());
        };
        if servers.is_empty() {
            return Ok(());
        }

        writeln!(out, "## Servers\n")?;
        for server in servers {
            let Some(url) = server.get("url").and_then(JsonValue::as_str) else {
                continue;
            };
            writeln!(out, "- **URL:** `{url}`")?;
            if let Some(description) = server.get("description").and_then(JsonValue::as_str) {
                writeln!(out, "  - **Description:** {}", one_line(description))?;
            }
        }
        writeln!(out)
    }

    fn write_security_schemes(&self, out: &mut String) -> fmt::Result {
        let Some(schemes) = self
            .root()
            .pointer("/components/securitySchemes")
            .and_then(JsonValue::as_object)
        else {
            return Ok(());
        };
        if schemes.is_empty() {
            return Ok(());
        }

        writeln!(out, "## Authentication\n")?;
        for (name, scheme) in schemes {
            let scheme = self.resolver.resolve(scheme);
            writeln!(out, "### {name}\n")?;
            for (key, label) in [
                ("type", "Type"),
                ("scheme", "Scheme"),
                ("bearerFormat", "Bearer Format"),
                ("in", "In"),
                ("name", "Name"),
                ("openIdConnectUrl", "OpenID Connect URL"),
            ] {
                if let Some(value) = scheme.get(key).and_then(JsonValue::as_str) {
                    writeln!(out, "- **{label}:** `{value}`")?;
                }
            }
            writeln!(out)?;
            if let Some(description) = scheme.get("description").and_then(JsonValue::as_str) {
                writeln!(out, "{}\n", description.trim())?;
            }
        }
        Ok(())
    }

    fn collect_operations(&self) -> Vec<OperationRef<'a>> {
        let Some(paths) = self.root().get("paths").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, item) in paths {
            let item = self.resolver.resolve(item);
            let Some(entries) = item.as_object() else {
                continue;
            };
            for (key, operation) in entries {
                let Ok(method) = HttpMethod::from_str(key) else {
                    continue;
                };
                let heading = operation
                    .get("summary")
                    .and_then(JsonValue::as_str)
                    .filter(|s| !s.is_empty())
                    .map(one_line)
                    .unwrap_or_else(|| format!("{} {path}", method.as_upper()));
                operations.push(OperationRef {
                    method,
                    path,
                    path_item: item,
                    operation,
                    heading,
                });
            }
        }
        operations
    }

    fn write_operations(&self, out: &mut String) -> fmt::Result {
        let operations = self.collect_operations();
        if operations.is_empty() {
            return Ok(());
        }

        // duplicate headings get numbered anchors the way GitHub does it
        let mut seen: HashMap<String, usize> = HashMap::new();
        writeln!(out, "## Operations\n")?;
        for op in &operations {
            let base = anchor_slug(&op.heading);
            let count = seen.entry(base.clone()).or_insert(0);
            let anchor = if *count == 0 {
                base
            } else {
                format!("{base}-{count}")
            };
            *count += 1;
            writeln!(out, "- [{}](#{anchor})", op.heading)?;
        }
        writeln!(out)?;

        for op in &operations {
            self.write_operation(out, op)?;
        }
        Ok(())
    }

    fn write_operation(&self, out: &mut String, op: &OperationRef<'a>) -> fmt::Result {
        let operation = op.operation;
        writeln!(out, "### {}\n", op.heading)?;
        writeln!(out, "- **Method:** `{}`", op.method.as_upper())?;
        writeln!(out, "- **Path:** `{}`", op.path)?;

        if let Some(tags) = operation.get("tags").and_then(JsonValue::as_array) {
            let tags: Vec<_> = tags.iter().filter_map(JsonValue::as_str).collect();
            if !tags.is_empty() {
                writeln!(out, "- **Tags:** {}", tags.join(", "))?;
            }
        }
        if let Some(id) = operation.get("operationId").and_then(JsonValue::as_str) {
            writeln!(out, "- **Operation ID:** `{id}`")?;
        }
        if let Some(security) = self.security_label(operation) {
            writeln!(out, "- **Security:** {security}")?;
        }
        if operation.get("deprecated").and_then(JsonValue::as_bool) == Some(true) {
            writeln!(out, "- **Deprecated:** yes")?;
        }
        writeln!(out)?;

        if let Some(description) = operation.get("description").and_then(JsonValue::as_str) {
            writeln!(out, "{}\n", description.trim())?;
        }

        self.write_parameters(out, op)?;
        self.write_request_body(out, operation)?;
        self.write_responses(out, operation)
    }

    fn security_label(&self, operation: &JsonValue) -> Option<String> {
        let requirements = operation
            .get("security")
            .or_else(|| self.root().get("security"))?
            .as_array()?;
        if requirements.is_empty() {
            return Some("none".to_string());
        }
        let names: Vec<String> = requirements
            .iter()
            .filter_map(JsonValue::as_object)
            .map(|requirement| {
                if requirement.is_empty() {
                    "none".to_string()
                } else {
                    requirement
                        .keys()
                        .map(|k| format!("`{k}`"))
                        .collect::<Vec<_>>()
                        .join(" + ")
                }
            })
            .collect();
        Some(names.join(" or "))
    }

    fn parameters(&self, op: &OperationRef<'a>) -> Vec<&'a JsonValue> {
        let mut parameters: Vec<&'a JsonValue> = Vec::new();
        let sources = [op.path_item.get("parameters"), op.operation.get("parameters")];
        for list in sources.into_iter().flatten().filter_map(JsonValue::as_array) {
            for parameter in list {
                let parameter = self.resolver.resolve(parameter);
                let key = (parameter.get("name"), parameter.get("in"));
                // operation-level parameters override path-level ones
                match parameters
                    .iter_mut()
                    .find(|existing| (existing.get("name"), existing.get("in")) == key)
                {
                    Some(slot) => *slot = parameter,
                    None => parameters.push(parameter),
                }
            }
        }
        parameters
    }

    fn write_parameters(&self, out: &mut String, op: &OperationRef<'a>) -> fmt::Result {
        let parameters = self.parameters(op);
        if parameters.is_empty() {
            return Ok(());
        }

        writeln!(out, "#### Parameters\n")?;
        writeln!(out, "| Name | In | Type | Required | Description |")?;
        writeln!(out, "| --- | --- | --- | --- | --- |")?;
        for parameter in parameters {
            let name = parameter
                .get("name")
                .and_then(JsonValue::as_str)
                .unwrap_or_default();
            let location = parameter
                .get("in")
                .and_then(JsonValue::as_str)
                .unwrap_or_default();
            let kind = parameter
                .get("schema")
                .map(|schema| type_label(self.resolver.resolve(schema)))
                .unwrap_or_else(|| "any".to_string());
            let required = parameter.get("required").and_then(JsonValue::as_bool) == Some(true)
                || location == "path";
            let mut description = parameter
                .get("description")
                .and_then(JsonValue::as_str)
                .map(one_line)
                .unwrap_or_default();
            if let Some(values) = parameter
                .get("schema")
                .map(|schema| self.resolver.resolve(schema))
                .and_then(|schema| schema.get("enum"))
                .and_then(JsonValue::as_array)
            {
                let values: Vec<_> = values
                    .iter()
                    .map(|v| format!("`{}`", inline_value(v)))
                    .collect();
                if !description.is_empty() {
                    description.push(' ');
                }
                description.push_str(&format!("One of {}.", values.join(", ")));
            }
            writeln!(
                out,
                "| `{name}` | {location} | `{}` | {} | {description} |",
                one_line(&kind),
                if required { "yes" } else { "no" }
            )?;
        }
        writeln!(out)
    }

    fn write_request_body(&self, out: &mut String, operation: &'a JsonValue) -> fmt::Result {
        let Some(body) = operation.get("requestBody") else {
            return Ok(());
        };
        let body = self.resolver.resolve(body);

        writeln!(out, "#### Request Body\n")?;
        if body.get("required").and_then(JsonValue::as_bool) == Some(true) {
            writeln!(out, "Required.\n")?;
        }
        if let Some(description) = body.get("description").and_then(JsonValue::as_str) {
            writeln!(out, "{}\n", description.trim())?;
        }
        self.write_content(out, body, "#####")
    }

    fn write_responses(&self, out: &mut String, operation: &'a JsonValue) -> fmt::Result {
        let Some(responses) = operation.get("responses").and_then(JsonValue::as_object) else {
            return Ok(());
        };
        if responses.is_empty() {
            return Ok(());
        }

        writeln!(out, "#### Responses\n")?;
        for (status, response) in responses {
            let response = self.resolver.resolve(response);
            let reason = status
                .parse::<u16>()
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .and_then(|code| code.canonical_reason());
            match reason {
                Some(reason) => writeln!(out, "##### Status: {status} {reason}\n")?,
                None => writeln!(out, "##### Status: {status}\n")?,
            }
            if let Some(description) = response.get("description").and_then(JsonValue::as_str) {
                writeln!(out, "{}\n", description.trim())?;
            }
            self.write_content(out, response, "######")?;
        }
        Ok(())
    }

    fn write_content(&self, out: &mut String, holder: &'a JsonValue, level: &str) -> fmt::Result {
        let Some(content) = holder.get("content").and_then(JsonValue::as_object) else {
            return Ok(());
        };

        for (media_type, media) in content {
            writeln!(out, "{level} Content-Type: `{media_type}`\n")?;
            if let Some(schema) = media.get("schema") {
                self.schemas.write_schema(out, schema)?;
                writeln!(out)?;
            }
            if let Some(example) = self.example(media) {
                let pretty = serde_json::to_string_pretty(example).map_err(|_| fmt::Error)?;
                writeln!(out, "**Example:**\n\n```json\n{pretty}\n```\n")?;
            }
        }
        Ok(())
    }

    /// First example found on the media object, its examples map, or its schema
    fn example(&self, media: &'a JsonValue) -> Option<&'a JsonValue> {
        if let Some(example) = media.get("example") {
            return Some(example);
        }
        if let Some(examples) = media.get("examples").and_then(JsonValue::as_object) {
            if let Some(first) = examples.values().next() {
                return self.resolver.resolve(first).get("value");
            }
        }
        let schema = self.resolver.resolve(media.get("schema")?);
        schema.get("example").or_else(|| {
            schema
                .get("examples")
                .and_then(JsonValue::as_array)
                .and_then(|examples| examples.first())
        })
    }

    fn write_component_schemas(&self, out: &mut String) -> fmt::Result {
        let Some(schemas) = self
            .root()
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
        else {
            return Ok(());
        };
        if schemas.is_empty() {
            return Ok(());
        }

        writeln!(out, "## Schemas\n")?;
        for (name, schema) in schemas {
            writeln!(out, "### {name}\n")?;
            let resolved = self.resolver.resolve(schema);
            if let Some(description) = resolved.get("description").and_then(JsonValue::as_str) {
                writeln!(out, "{}\n", description.trim())?;
            }
            self.schemas.write_schema(out, schema)?;
            writeln!(out)?;
        }
        Ok(())
    }
}
