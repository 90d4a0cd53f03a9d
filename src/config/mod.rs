#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OutputFormat};
pub use toml_config::TomlConfig;

use crate::core::dispatcher::DEFAULT_BASE_URL;
use crate::core::renderer::DEFAULT_REDIRECT_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};

/// Fully resolved settings after defaults, file and flags are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub redirect_url: String,
    pub store_id: u32,
    pub all_deals_upper_price: u32,
    pub search_upper_price: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            store_id: 1,
            all_deals_upper_price: 15,
            search_upper_price: 50,
        }
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.base_url)?;
        validate_url("api.redirect_url", &self.redirect_url)?;
        validate_positive_number("queries.store_id", self.store_id, 1)?;
        validate_positive_number(
            "queries.all_deals_upper_price",
            self.all_deals_upper_price,
            1,
        )?;
        validate_positive_number("queries.search_upper_price", self.search_upper_price, 1)?;
        Ok(())
    }
}

impl ConfigProvider for ApiSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    fn store_id(&self) -> u32 {
        self.store_id
    }

    fn all_deals_upper_price(&self) -> u32 {
        self.all_deals_upper_price
    }

    fn search_upper_price(&self) -> u32 {
        self.search_upper_price
    }
}
