use crate::core::{Deal, DealQuery, DealSource};
use crate::utils::error::{DealError, Result};
use reqwest::Client;
use url::form_urlencoded::byte_serialize;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.cheapshark.com/api/1.0/";

/// Issues one GET against `<base>/deals` per query.
///
/// No timeout, retry or de-duplication: two overlapping calls are two
/// independent requests and resolve in whatever order the transport finishes.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    base_url: Url,
    client: Client,
}

impl RequestDispatcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn request_url(&self, query: &DealQuery) -> Result<Url> {
        let mut url = self.base_url.join("deals")?;
        let query_string = match query {
            DealQuery::AllDeals {
                store_id,
                upper_price,
            } => format!("storeID={}&upperPrice={}", store_id, upper_price),
            DealQuery::ByTitle { title, upper_price } => {
                format!("title={}&upperPrice={}", encode_component(title), upper_price)
            }
        };
        url.set_query(Some(&query_string));
        Ok(url)
    }
}

// Spaces become %20 rather than the form-encoding '+'. A literal '+' is already
// escaped to %2B by byte_serialize, so the replacement is unambiguous.
fn encode_component(value: &str) -> String {
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[async_trait::async_trait]
impl DealSource for RequestDispatcher {
    async fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        let url = self.request_url(query)?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(DealError::Response {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let deals: Vec<Deal> = serde_json::from_str(&body)?;
        tracing::debug!("Decoded {} deals", deals.len());

        Ok(deals)
    }
}
