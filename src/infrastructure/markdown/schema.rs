//! Schema helpers for the markdown reference: `$ref` resolution, type labels
//! and nested property lists.

use serde_json::Value as JsonValue;
use std::fmt::{self, Write};

/// Longest `$ref` chain followed before giving up
const MAX_REF_HOPS: usize = 16;

/// Resolves local references against the whole document
#[derive(Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a JsonValue,
}

impl<'a> RefResolver<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a JsonValue {
        self.root
    }

    /// Follow `$ref` until a concrete value is reached
    ///
    /// Unresolvable or remote references return the reference object itself.
    pub fn resolve(&self, value: &'a JsonValue) -> &'a JsonValue {
        let mut current = value;
        for _ in 0..MAX_REF_HOPS {
            let Some(target) = ref_target(current) else {
                return current;
            };
            match target
                .strip_prefix('#')
                .and_then(|pointer| self.root.pointer(pointer))
            {
                Some(next) => current = next,
                None => return current,
            }
        }
        current
    }
}

/// The `$ref` string of a reference object
pub fn ref_target(value: &JsonValue) -> Option<&str> {
    value.get("$ref").and_then(JsonValue::as_str)
}

/// Last path segment of a `$ref`, e.g. `Project` for `#/components/schemas/Project`
pub fn ref_name(value: &JsonValue) -> Option<&str> {
    ref_target(value).and_then(|target| target.rsplit('/').next())
}

/// Short type label such as `string (date-time)`, `array<Project>` or `string | null`
pub fn type_label(schema: &JsonValue) -> String {
    if let Some(name) = ref_name(schema) {
        return name.to_string();
    }

    let mut label = match schema.get("type") {
        Some(JsonValue::String(kind)) => single_type_label(kind, schema),
        Some(JsonValue::Array(kinds)) => kinds
            .iter()
            .filter_map(JsonValue::as_str)
            .map(|kind| single_type_label(kind, schema))
            .collect::<Vec<_>>()
            .join(" | "),
        _ => composite_label(schema),
    };

    if schema.get("nullable").and_then(JsonValue::as_bool) == Some(true) {
        label.push_str(" | null");
    }
    label
}

fn single_type_label(kind: &str, schema: &JsonValue) -> String {
    match kind {
        "array" => {
            let items = schema
                .get("items")
                .map(type_label)
                .unwrap_or_else(|| "any".to_string());
            format!("array<{items}>")
        }
        _ => match schema.get("format").and_then(JsonValue::as_str) {
            Some(format) if kind != "null" => format!("{kind} ({format})"),
            _ => kind.to_string(),
        },
    }
}

fn composite_label(schema: &JsonValue) -> String {
    for (key, separator) in [("oneOf", " | "), ("anyOf", " | "), ("allOf", " & ")] {
        if let Some(variants) = schema.get(key).and_then(JsonValue::as_array) {
            return variants
                .iter()
                .map(type_label)
                .collect::<Vec<_>>()
                .join(separator);
        }
    }
    if schema.get("properties").is_some() {
        "object".to_string()
    } else {
        "any".to_string()
    }
}

/// Inline JSON for enum values and defaults
pub fn inline_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Single-line text safe for a markdown list item or table cell
pub fn one_line(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

/// Writes nested property lists for object schemas
pub struct SchemaWriter<'a> {
    resolver: RefResolver<'a>,
    max_depth: usize,
}

impl<'a> SchemaWriter<'a> {
    pub fn new(resolver: RefResolver<'a>, max_depth: usize) -> Self {
        Self {
            resolver,
            max_depth,
        }
    }

    /// Write the schema's shape: a property list for objects, a type line otherwise
    pub fn write_schema(&self, out: &mut String, schema: &'a JsonValue) -> fmt::Result {
        let mut seen = Vec::new();
        if let Some(name) = ref_name(schema) {
            seen.push(name.to_string());
        }
        let resolved = self.resolver.resolve(schema);

        if self.collect_shape(schema).properties.is_empty() {
            let label = match ref_name(schema) {
                Some(name) => format!("{name} ({})", type_label(resolved)),
                None => type_label(resolved),
            };
            writeln!(out, "- **Type:** `{label}`")?;

            if let Some(items) = array_items(resolved) {
                if let Some(name) = ref_name(items) {
                    seen.push(name.to_string());
                }
                if !self.collect_shape(items).properties.is_empty() {
                    writeln!(out, "- **Items:**")?;
                    self.write_properties(out, items, 1, &mut seen)?;
                }
            }
            return Ok(());
        }

        self.write_properties(out, schema, 0, &mut seen)
    }

    fn write_properties(
        &self,
        out: &mut String,
        schema: &'a JsonValue,
        depth: usize,
        seen: &mut Vec<String>,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let shape = self.collect_shape(schema);

        for (name, property) in shape.properties {
            let resolved = self.resolver.resolve(property);
            let mut line = format!("{indent}- `{name}` (`{}`", type_label(property));
            if shape.required.contains(&name) {
                line.push_str(", required");
            }
            line.push(')');

            let description = property
                .get("description")
                .or_else(|| resolved.get("description"))
                .and_then(JsonValue::as_str);
            if let Some(description) = description {
                line.push_str(": ");
                line.push_str(&one_line(description));
            }
            if let Some(values) = resolved.get("enum").and_then(JsonValue::as_array) {
                let values: Vec<_> = values
                    .iter()
                    .map(|v| format!("`{}`", inline_value(v)))
                    .collect();
                line.push_str(&format!(" Possible values: {}.", values.join(", ")));
            }
            if let Some(default) = resolved.get("default") {
                line.push_str(&format!(" Default: `{}`.", inline_value(default)));
            }
            writeln!(out, "{line}")?;

            // recurse into objects and arrays of objects, stopping on cycles
            let nested = array_items(resolved).unwrap_or(property);
            let nested_name = ref_name(nested).or_else(|| ref_name(property));
            if depth + 1 >= self.max_depth {
                continue;
            }
            if let Some(name) = nested_name {
                if seen.iter().any(|s| s == name) {
                    continue;
                }
                seen.push(name.to_string());
            }
            if !self.collect_shape(nested).properties.is_empty() {
                self.write_properties(out, nested, depth + 1, seen)?;
            }
            if nested_name.is_some() {
                seen.pop();
            }
        }
        Ok(())
    }

    /// Properties and required names of an object schema, merging `allOf`
    /// members in order
    fn collect_shape(&self, schema: &'a JsonValue) -> ObjectShape<'a> {
        let mut shape = ObjectShape::default();
        let mut refs = Vec::new();
        self.collect_into(schema, &mut shape, &mut refs);
        shape
    }

    fn collect_into(
        &self,
        schema: &'a JsonValue,
        shape: &mut ObjectShape<'a>,
        refs: &mut Vec<&'a str>,
    ) {
        // `refs` holds the references on the current walk path
        let target = ref_target(schema);
        if let Some(target) = target {
            if refs.len() >= MAX_REF_HOPS || refs.contains(&target) {
                return;
            }
            refs.push(target);
        }

        let schema = self.resolver.resolve(schema);
        if let Some(members) = schema.get("allOf").and_then(JsonValue::as_array) {
            for member in members {
                self.collect_into(member, shape, refs);
            }
        }
        if let Some(own) = schema.get("properties").and_then(JsonValue::as_object) {
            for (name, property) in own {
                let name = name.as_str();
                match shape.properties.iter_mut().find(|(existing, _)| *existing == name) {
                    Some(slot) => slot.1 = property,
                    None => shape.properties.push((name, property)),
                }
            }
        }
        if let Some(required) = schema.get("required").and_then(JsonValue::as_array) {
            for name in required.iter().filter_map(JsonValue::as_str) {
                if !shape.required.contains(&name) {
                    shape.required.push(name);
                }
            }
        }

        if target.is_some() {
            refs.pop();
        }
    }
}

#[derive(Default)]
struct ObjectShape<'a> {
    properties: Vec<(&'a str, &'a JsonValue)>,
    required: Vec<&'a str>,
}

fn array_items(schema: &JsonValue) -> Option<&JsonValue> {
    let is_array = match schema.get("type") {
        Some(JsonValue::String(kind)) => kind == "array",
        Some(JsonValue::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("array")),
        _ => false,
    };
    if is_array { schema.get("items") } else { None }
}
