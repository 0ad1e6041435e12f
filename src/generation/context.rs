//! Generation context - everything one run of the generator works from

use std::path::PathBuf;

use crate::config::SiteProfile;
use crate::generation::{EndpointIndex, RawSpec, SpecDocument, SummaryContext};

/// Inputs of a single generator run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub spec: RawSpec,
    pub profile: SiteProfile,
    pub full_output: PathBuf,
    pub summary_output: PathBuf,
}

impl GenerationContext {
    pub fn new(
        spec: RawSpec,
        profile: SiteProfile,
        full_output: impl Into<PathBuf>,
        summary_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            spec,
            profile,
            full_output: full_output.into(),
            summary_output: summary_output.into(),
        }
    }

    /// Assemble what the summary template needs from a parsed spec
    pub fn summary_context(
        &self,
        document: &SpecDocument,
        index: &EndpointIndex,
    ) -> SummaryContext {
        let base_url = document
            .first_server_url()
            .unwrap_or(&self.profile.default_base_url)
            .to_string();

        SummaryContext {
            profile: self.profile.clone(),
            base_url,
            endpoints: index.render().trim_end().to_string(),
        }
    }
}
