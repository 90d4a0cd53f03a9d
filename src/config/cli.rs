use crate::config::{ApiSettings, TomlConfig};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "deal-finder")]
#[command(about = "Find discounted game deals and render them as a page")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Deals API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Base of the outbound deal links")]
    pub redirect_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[arg(long, help = "Write output to this file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Low-price deals from the default store
    All,
    /// Deals whose title contains NAME
    Search { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full page document
    Html,
    /// Plain text listing of the visible panel
    Text,
}

impl CliConfig {
    /// Defaults, then the settings file, then flags.
    pub fn resolve_settings(&self) -> Result<ApiSettings> {
        let mut settings = ApiSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(redirect_url) = &self.redirect_url {
            settings.redirect_url = redirect_url.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(output) = &self.output {
            validate_path("output", &output.to_string_lossy())?;
        }
        Ok(())
    }
}
