//! Tera-based summary renderer

use tera::{Context, Tera};

use crate::generation::{GenerationError, SummaryContext, SummaryRenderer};

const TEMPLATE_NAME: &str = "llms.txt";
const TEMPLATE: &str = include_str!("llms.txt.tera");

/// Renders `llms.txt` from the embedded template
pub struct TeraSummaryRenderer {
    tera: Tera,
}

impl TeraSummaryRenderer {
    pub fn new() -> Result<Self, GenerationError> {
        Self::with_template(TEMPLATE)
    }

    /// Use a caller-supplied template instead of the embedded one
    pub fn with_template(template: &str) -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }
}

impl SummaryRenderer for TeraSummaryRenderer {
    fn render(&self, context: &SummaryContext) -> Result<String, GenerationError> {
        let context = Context::from_serialize(context)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteProfile;

    fn context(endpoints: &str) -> SummaryContext {
        SummaryContext {
            profile: SiteProfile::builtin().unwrap(),
            base_url: "https://api.agentanalytics.sh".to_string(),
            endpoints: endpoints.to_string(),
        }
    }

    #[test]
    fn test_sections_render_in_order() {
        let renderer = TeraSummaryRenderer::new().unwrap();
        let output = renderer
            .render(&context("### Projects\n- `POST /projects` — Create project"))
            .unwrap();

        let headings = [
            "# Agent Analytics",
            "Base URL: `https://api.agentanalytics.sh`",
            "## Docs",
            "## MCP Server",
            "### Tools",
            "## Quick Start",
            "## Authentication",
            "## Endpoints",
            "## Rate Limits",
        ];
        let mut last = 0;
        for heading in headings {
            let position = output[last..]
                .find(heading)
                .unwrap_or_else(|| panic!("missing or out of order: {heading}"));
            last += position + heading.len();
        }

        assert!(output.contains(
            "## Endpoints\n\n### Projects\n- `POST /projects` — Create project\n\n## Rate Limits"
        ));
        assert!(output.ends_with("|\n"));
        assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_empty_endpoints_keep_boilerplate() {
        let renderer = TeraSummaryRenderer::new().unwrap();
        let output = renderer.render(&context("")).unwrap();

        assert!(output.contains("## Endpoints\n\n## Rate Limits"));
        assert!(output.contains("1. Create an account"));
        assert!(output.contains("- `list_projects`"));
        assert!(output.contains("| Free | 100 requests/minute | 100,000 events/month |"));
        assert!(output.contains("X-API-Key: aak_your_api_key"));
    }

    #[test]
    fn test_links_and_mcp_block() {
        let renderer = TeraSummaryRenderer::new().unwrap();
        let output = renderer.render(&context("")).unwrap();

        assert!(output.contains(
            "- [Full API reference](https://agentanalytics.sh/llms-full.txt): Every endpoint"
        ));
        assert!(output.contains("- [Documentation](https://docs.agentanalytics.sh/)\n"));
        assert!(output.contains(
            "URL: `https://mcp.agentanalytics.sh/mcp`\nTransport: Streamable HTTP\n\nHosted MCP"
        ));
    }

    #[test]
    fn test_optional_sections_collapse() {
        let mut ctx = context("");
        ctx.profile.links.clear();
        ctx.profile.tools.clear();
        ctx.profile.mcp.transport = None;

        let renderer = TeraSummaryRenderer::new().unwrap();
        let output = renderer.render(&ctx).unwrap();

        assert!(!output.contains("## Docs"));
        assert!(!output.contains("### Tools"));
        assert!(output.contains("Base URL: `https://api.agentanalytics.sh`\n\n## MCP Server"));
        assert!(output.contains("URL: `https://mcp.agentanalytics.sh/mcp`\n\nHosted MCP"));
    }

    #[test]
    fn test_custom_template() {
        let renderer = TeraSummaryRenderer::with_template("{{ title }} @ {{ base_url }}").unwrap();
        assert_eq!(
            renderer.render(&context("")).unwrap(),
            "Agent Analytics @ https://api.agentanalytics.sh"
        );
    }

    #[test]
    fn test_invalid_template_is_a_render_error() {
        let result = TeraSummaryRenderer::with_template("{% for x in %}");
        assert!(matches!(result, Err(GenerationError::RenderError(_))));
    }
}
