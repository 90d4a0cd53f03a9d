use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// One discounted game offer as returned by the deals API.
///
/// Price fields are kept as the API sends them; they are only formatted, never
/// validated, so missing fields fall back to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deal {
    #[serde(default, deserialize_with = "number_like")]
    pub title: String,
    #[serde(rename = "salePrice", default, deserialize_with = "number_like")]
    pub sale_price: String,
    #[serde(rename = "normalPrice", default, deserialize_with = "number_like")]
    pub normal_price: String,
    #[serde(default, deserialize_with = "number_like")]
    pub savings: String,
    #[serde(rename = "dealID", default, deserialize_with = "number_like")]
    pub deal_id: String,
}

// The API sends prices as strings ("9.99") but nothing stops it from sending numbers.
fn number_like<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Presentation-ready description of a [`Deal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealCard {
    pub title: String,
    pub sale_price: String,
    pub normal_price: String,
    pub savings: String,
    pub deal_url: String,
}

/// Failure description shown in the error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub summary: String,
    pub detail: String,
    pub back_target: ViewId,
}

/// Mutually exclusive panels of the page. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Introduction,
    GameSearchForm,
    ResultsList,
    Error,
}

impl ViewId {
    pub const ALL: [ViewId; 4] = [
        ViewId::Introduction,
        ViewId::GameSearchForm,
        ViewId::ResultsList,
        ViewId::Error,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            ViewId::Introduction => "introduction",
            ViewId::GameSearchForm => "game-view",
            ViewId::ResultsList => "list-view",
            ViewId::Error => "error-view",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Content slots the renderer replaces wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    DealsContainer,
    ErrorPanel,
}

/// User intents the page exposes as trigger controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ShowAllDeals,
    OpenSearch,
    SubmitSearch,
    GoBack,
    BackToSearch,
}

/// The two query modes of the deals endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealQuery {
    AllDeals { store_id: u32, upper_price: u32 },
    ByTitle { title: String, upper_price: u32 },
}
