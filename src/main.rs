//! llmstxt-gen CLI entrypoint
//! Parses command-line arguments and runs the documentation generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use llmstxt_gen::{
    application::{ApplicationError, GenerateDocsRequest, GenerateDocsUseCase, RunMode},
    config::{
        DEFAULT_FULL_OUTPUT, DEFAULT_SPEC_PATH, DEFAULT_SUMMARY_OUTPUT, GeneratorConfig,
        SiteProfile,
    },
    generation::GenerationOrchestrator,
    infrastructure::{
        markdown::ReferenceMarkdownConverter, openapi::CompositeSpecLoader,
        output::FileSystemOutputService, summary::TeraSummaryRenderer,
    },
};
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "llmstxt-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Defaults to `generate` with default paths
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write llms-full.txt and llms.txt from the OpenAPI spec
    Generate(GenerateArgs),
    /// Fail if the files on disk differ from what generate would write
    Check(GenerateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path or URL to the OpenAPI spec (YAML or JSON)
    #[arg(long, default_value = DEFAULT_SPEC_PATH)]
    spec: String,
    /// Where to write the full markdown reference
    #[arg(long, default_value = DEFAULT_FULL_OUTPUT)]
    full_output: PathBuf,
    /// Where to write the summary document
    #[arg(long, default_value = DEFAULT_SUMMARY_OUTPUT)]
    summary_output: PathBuf,
    /// TOML site profile replacing the built-in boilerplate
    #[arg(long)]
    profile: Option<PathBuf>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            spec: DEFAULT_SPEC_PATH.to_string(),
            full_output: PathBuf::from(DEFAULT_FULL_OUTPUT),
            summary_output: PathBuf::from(DEFAULT_SUMMARY_OUTPUT),
            profile: None,
        }
    }
}

impl GenerateArgs {
    fn into_config(self) -> Result<GeneratorConfig, ApplicationError> {
        let profile = match &self.profile {
            Some(path) => SiteProfile::from_file(path)?,
            None => SiteProfile::builtin()?,
        };

        Ok(GeneratorConfig {
            spec_source: self.spec,
            full_output: self.full_output,
            summary_output: self.summary_output,
            profile,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (args, mode) = match cli.command {
        Some(Commands::Generate(args)) => (args, RunMode::Write),
        Some(Commands::Check(args)) => (args, RunMode::Check),
        None => (GenerateArgs::default(), RunMode::Write),
    };

    let config = args.into_config().context("Failed to load site profile")?;
    run(config, mode).await
}

async fn run(config: GeneratorConfig, mode: RunMode) -> anyhow::Result<()> {
    info!("Generating docs from {}", config.spec_source);

    let use_case = GenerateDocsUseCase::new(
        Arc::new(CompositeSpecLoader::new().context("Failed to set up spec loader")?),
        Arc::new(GenerationOrchestrator::new(
            Arc::new(ReferenceMarkdownConverter::new()),
            Arc::new(TeraSummaryRenderer::new().context("Failed to load summary template")?),
        )),
        Arc::new(FileSystemOutputService::new()),
    );

    let response = use_case
        .execute(GenerateDocsRequest::from_config(config, mode))
        .await
        .context("Documentation generation failed")?;

    for file in &response.files {
        match response.mode {
            RunMode::Write => println!("Generated {} ({} bytes)", file.path.display(), file.bytes),
            RunMode::Check => println!("Up to date {} ({} bytes)", file.path.display(), file.bytes),
        }
    }
    info!("Indexed {} endpoints", response.endpoint_count);

    Ok(())
}
