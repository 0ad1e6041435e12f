//! Endpoint index: summarized operations grouped by their owning tag

use crate::generation::{HttpMethod, SpecDocument};

/// Group used for operations that list no tags
pub const FALLBACK_TAG: &str = "Other";

/// One indexed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointEntry {
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    pub tag: String,
}

impl EndpointEntry {
    /// Markdown list item for this entry
    pub fn to_line(&self) -> String {
        format!("- `{} {}` — {}", self.method.as_upper(), self.path, self.summary)
    }
}

/// Entries that share a tag, in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointGroup {
    pub tag: String,
    pub entries: Vec<EndpointEntry>,
}

/// Ordered tag groups built from a spec
///
/// Groups for declared tags come first in declaration order. A tag first seen
/// on an operation, including [`FALLBACK_TAG`], gets a new group appended at
/// the moment it is first used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointIndex {
    groups: Vec<EndpointGroup>,
}

impl EndpointIndex {
    pub fn build(spec: &SpecDocument) -> Self {
        let mut index = Self::default();
        for tag in &spec.tags {
            index.group_mut(&tag.name);
        }

        for (path, operation) in spec.operations() {
            let Some(summary) = operation.summary.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            let tag = operation.primary_tag().unwrap_or(FALLBACK_TAG);

            index.group_mut(tag).entries.push(EndpointEntry {
                method: operation.method,
                path: path.to_string(),
                summary: summary.to_string(),
                tag: tag.to_string(),
            });
        }

        index
    }

    fn group_mut(&mut self, tag: &str) -> &mut EndpointGroup {
        let position = match self.groups.iter().position(|group| group.tag == tag) {
            Some(position) => position,
            None => {
                self.groups.push(EndpointGroup {
                    tag: tag.to_string(),
                    entries: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[position]
    }

    /// All groups including empty ones
    pub fn groups(&self) -> &[EndpointGroup] {
        &self.groups
    }

    /// Groups that hold at least one entry
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &EndpointGroup> {
        self.groups.iter().filter(|group| !group.entries.is_empty())
    }

    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|group| group.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Render every non-empty group as a `###` heading followed by its lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        for group in self.non_empty_groups() {
            out.push_str(&format!("### {}\n", group.tag));
            for entry in &group.entries {
                out.push_str(&entry.to_line());
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}
