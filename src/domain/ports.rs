use crate::domain::model::{Deal, DealCard, DealQuery, ErrorPanel, Region, ViewId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Where deals come from. One call is one outbound request.
#[async_trait]
pub trait DealSource: Send + Sync {
    async fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>>;
}

/// The page regions the renderer manipulates by identifier.
///
/// Implementations use interior mutability so several in-flight actions can
/// share one surface.
pub trait ViewSurface: Send + Sync {
    fn set_visible(&self, view: ViewId, visible: bool);
    fn replace_content(&self, region: Region, markup: String);
    fn scroll_to_top(&self, view: ViewId);
    fn game_name_input(&self) -> String;
}

/// Turns description objects into output markup.
pub trait Presenter: Send + Sync {
    fn render_cards(&self, cards: &[DealCard]) -> Result<String>;
    fn render_error(&self, panel: &ErrorPanel) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn redirect_url(&self) -> &str;
    fn store_id(&self) -> u32;
    fn all_deals_upper_price(&self) -> u32;
    fn search_upper_price(&self) -> u32;
}

impl<T: ViewSurface + ?Sized> ViewSurface for Arc<T> {
    fn set_visible(&self, view: ViewId, visible: bool) {
        (**self).set_visible(view, visible)
    }

    fn replace_content(&self, region: Region, markup: String) {
        (**self).replace_content(region, markup)
    }

    fn scroll_to_top(&self, view: ViewId) {
        (**self).scroll_to_top(view)
    }

    fn game_name_input(&self) -> String {
        (**self).game_name_input()
    }
}

#[async_trait]
impl<T: DealSource + ?Sized> DealSource for Arc<T> {
    async fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        (**self).fetch_deals(query).await
    }
}
