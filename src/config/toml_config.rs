use crate::config::ApiSettings;
use crate::utils::error::{DealError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional settings file. Every key may be omitted.
///
/// ```toml
/// [api]
/// base_url = "${DEALS_API}/api/1.0/"
///
/// [queries]
/// search_upper_price = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub queries: QueriesSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueriesSection {
    pub store_id: Option<u32>,
    pub all_deals_upper_price: Option<u32>,
    pub search_upper_price: Option<u32>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| DealError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Overlays the values present in this file onto `settings`.
    pub fn apply_to(&self, settings: &mut ApiSettings) {
        if let Some(base_url) = &self.api.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(redirect_url) = &self.api.redirect_url {
            settings.redirect_url = redirect_url.clone();
        }
        if let Some(store_id) = self.queries.store_id {
            settings.store_id = store_id;
        }
        if let Some(upper) = self.queries.all_deals_upper_price {
            settings.all_deals_upper_price = upper;
        }
        if let Some(upper) = self.queries.search_upper_price {
            settings.search_upper_price = upper;
        }
    }
}
