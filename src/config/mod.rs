//! Run configuration and the site profile that supplies summary boilerplate.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Default location of the input spec
pub const DEFAULT_SPEC_PATH: &str = "openapi.yaml";
/// Default location of the full markdown reference
pub const DEFAULT_FULL_OUTPUT: &str = "llms-full.txt";
/// Default location of the summary document
pub const DEFAULT_SUMMARY_OUTPUT: &str = "llms.txt";

const BUILTIN_PROFILE: &str = include_str!("default_profile.toml");

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read profile {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid profile: {0}")]
    Invalid(String),
}

/// A link listed in the docs section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocLink {
    pub title: String,
    pub url: Url,
    #[serde(default)]
    pub description: Option<String>,
}

/// Hosted MCP server details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServerInfo {
    pub url: Url,
    #[serde(default)]
    pub transport: Option<String>,
    pub description: String,
}

/// One row of the rate-limit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimit {
    pub plan: String,
    pub limit: String,
    #[serde(default)]
    pub events: Option<String>,
}

/// Static, hand-authored content of the summary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteProfile {
    pub title: String,
    pub description: String,
    /// Used when the spec declares no server
    pub default_base_url: String,
    #[serde(default)]
    pub links: Vec<DocLink>,
    pub mcp: McpServerInfo,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub quick_start: Vec<String>,
    pub auth: String,
    #[serde(default)]
    pub rate_limits: Vec<RateLimit>,
}

impl SiteProfile {
    /// The profile compiled into the binary
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_PROFILE)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let profile: SiteProfile = toml::from_str(content)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("title cannot be empty".to_string()));
        }
        Url::parse(&self.default_base_url).map_err(|e| {
            ConfigError::Invalid(format!(
                "default_base_url {:?} is not a URL: {e}",
                self.default_base_url
            ))
        })?;
        Ok(())
    }
}

/// Everything one generator run needs, passed explicitly
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// File path or http(s) URL of the spec
    pub spec_source: String,
    pub full_output: PathBuf,
    pub summary_output: PathBuf,
    pub profile: SiteProfile,
}

impl GeneratorConfig {
    /// Default paths with the built-in profile
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Ok(Self {
            spec_source: DEFAULT_SPEC_PATH.to_string(),
            full_output: PathBuf::from(DEFAULT_FULL_OUTPUT),
            summary_output: PathBuf::from(DEFAULT_SUMMARY_OUTPUT),
            profile: SiteProfile::builtin()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_profile_loads() {
        let profile = SiteProfile::builtin().expect("built-in profile must parse");
        assert_eq!(profile.title, "Agent Analytics");
        assert_eq!(profile.default_base_url, "https://api.agentanalytics.sh");
        assert!(!profile.tools.is_empty());
        assert!(!profile.quick_start.is_empty());
        assert!(!profile.rate_limits.is_empty());
        assert!(profile.auth.contains("X-API-Key"));
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::with_defaults().unwrap();
        assert_eq!(config.spec_source, "openapi.yaml");
        assert_eq!(config.full_output, PathBuf::from("llms-full.txt"));
        assert_eq!(config.summary_output, PathBuf::from("llms.txt"));
    }

    #[test]
    fn test_minimal_profile_from_toml() {
        let profile = SiteProfile::from_toml(
            r#"
title = "Example"
description = "Example API"
default_base_url = "https://api.example.com"
auth = "None"

[mcp]
url = "https://mcp.example.com/mcp"
description = "Example MCP"
"#,
        )
        .unwrap();

        assert!(profile.links.is_empty());
        assert!(profile.rate_limits.is_empty());
        assert_eq!(profile.mcp.transport, None);
    }

    #[test]
    fn test_profile_rejects_bad_base_url() {
        let result = SiteProfile::from_toml(
            r#"
title = "Example"
description = "Example API"
default_base_url = "not a url"
auth = "None"

[mcp]
url = "https://mcp.example.com/mcp"
description = "Example MCP"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_profile_rejects_bad_link_url() {
        let result = SiteProfile::from_toml(
            r#"
title = "Example"
description = "Example API"
default_base_url = "https://api.example.com"
auth = "None"

[[links]]
title = "Docs"
url = "::nope::"

[mcp]
url = "https://mcp.example.com/mcp"
description = "Example MCP"
"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_profile_from_missing_file() {
        let result = SiteProfile::from_file(Path::new("/nonexistent/profile.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_profile_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
title = "From File"
description = "d"
default_base_url = "https://api.example.com"
auth = "a"
tools = ["one"]

[mcp]
url = "https://mcp.example.com/mcp"
description = "m"
"#,
        )
        .unwrap();

        let profile = SiteProfile::from_file(file.path()).unwrap();
        assert_eq!(profile.title, "From File");
        assert_eq!(profile.tools, vec!["one".to_string()]);
    }
}
