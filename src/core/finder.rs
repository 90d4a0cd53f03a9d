use crate::core::failure::FailureHandler;
use crate::core::renderer::ViewRenderer;
use crate::core::{ConfigProvider, DealQuery, DealSource, Presenter, UiAction, ViewId, ViewSurface};
use crate::utils::error::{DealError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    pub store_id: u32,
    pub all_deals_upper_price: u32,
    pub search_upper_price: u32,
}

impl QueryLimits {
    pub fn from_config(config: &impl ConfigProvider) -> Self {
        Self {
            store_id: config.store_id(),
            all_deals_upper_price: config.all_deals_upper_price(),
            search_upper_price: config.search_upper_price(),
        }
    }
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            store_id: 1,
            all_deals_upper_price: 15,
            search_upper_price: 50,
        }
    }
}

/// Wires user actions to fetches and fetch outcomes to the page.
///
/// Actions take `&self`, so one finder behind an `Arc` can serve several
/// concurrent actions. Their renders are not coordinated: whichever request
/// resolves last owns the page.
pub struct DealFinder<S, V, P, F>
where
    S: DealSource,
    V: ViewSurface,
    P: Presenter,
    F: FailureHandler,
{
    source: S,
    renderer: ViewRenderer<V, P>,
    failure: F,
    limits: QueryLimits,
}

impl<S, V, P, F> DealFinder<S, V, P, F>
where
    S: DealSource,
    V: ViewSurface,
    P: Presenter,
    F: FailureHandler,
{
    /// Takes every page handle up front and shows the introduction panel.
    pub fn init(
        source: S,
        surface: V,
        presenter: P,
        failure: F,
        config: &impl ConfigProvider,
    ) -> Self {
        let renderer = ViewRenderer::new(surface, presenter, config.redirect_url());
        renderer.switch_view(ViewId::Introduction);

        Self {
            source,
            renderer,
            failure,
            limits: QueryLimits::from_config(config),
        }
    }

    pub fn renderer(&self) -> &ViewRenderer<V, P> {
        &self.renderer
    }

    pub fn current_view(&self) -> ViewId {
        self.renderer.current_view()
    }

    /// Runs one user action to completion and returns the panel left visible.
    pub async fn handle(&self, action: UiAction) -> ViewId {
        tracing::debug!("Handling {:?} from {}", action, self.current_view());

        match action {
            UiAction::ShowAllDeals => self.fetch_all_deals().await,
            UiAction::OpenSearch | UiAction::BackToSearch => {
                self.renderer.switch_view(ViewId::GameSearchForm)
            }
            UiAction::GoBack => self.renderer.switch_view(ViewId::Introduction),
            UiAction::SubmitSearch => {
                let input = self.renderer.surface().game_name_input();
                let game_name = input.trim();
                if game_name.is_empty() {
                    self.failure.handle_failure(&self.renderer, &DealError::EmptyInput);
                } else {
                    self.fetch_deals_by_game_name(game_name).await;
                }
            }
        }

        self.current_view()
    }

    pub async fn fetch_all_deals(&self) {
        let query = DealQuery::AllDeals {
            store_id: self.limits.store_id,
            upper_price: self.limits.all_deals_upper_price,
        };
        self.run_query(&query).await;
    }

    /// `game_name` must already be trimmed and non-empty.
    pub async fn fetch_deals_by_game_name(&self, game_name: &str) {
        let query = DealQuery::ByTitle {
            title: game_name.to_string(),
            upper_price: self.limits.search_upper_price,
        };
        self.run_query(&query).await;
    }

    async fn run_query(&self, query: &DealQuery) {
        let outcome: Result<()> = match self.source.fetch_deals(query).await {
            Ok(deals) => {
                tracing::info!("Fetched {} deals", deals.len());
                self.renderer.display_deals(&deals)
            }
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            self.failure.handle_failure(&self.renderer, &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::html::HtmlPresenter;
    use crate::adapters::page::InMemoryPage;
    use crate::config::ApiSettings;
    use crate::core::failure::InPageFailure;
    use crate::core::{Deal, Region};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeSource {
        queries: Mutex<Vec<DealQuery>>,
        fail_with_status: Option<u16>,
    }

    impl FakeSource {
        fn queries(&self) -> Vec<DealQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl DealSource for FakeSource {
        async fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
            self.queries.lock().unwrap().push(query.clone());
            if let Some(status) = self.fail_with_status {
                return Err(DealError::Response { status });
            }
            Ok(vec![Deal {
                title: "Portal".to_string(),
                sale_price: "0.99".to_string(),
                normal_price: "9.99".to_string(),
                savings: "90.090090".to_string(),
                deal_id: "abc".to_string(),
            }])
        }
    }

    #[derive(Default)]
    struct RecordingFailure {
        seen: Mutex<Vec<String>>,
    }

    impl FailureHandler for RecordingFailure {
        fn handle_failure<V: ViewSurface, P: Presenter>(
            &self,
            renderer: &ViewRenderer<V, P>,
            error: &DealError,
        ) {
            self.seen.lock().unwrap().push(error.to_string());
            renderer.switch_view(ViewId::GameSearchForm);
        }
    }

    fn finder(
        source: Arc<FakeSource>,
    ) -> (
        Arc<InMemoryPage>,
        DealFinder<Arc<FakeSource>, Arc<InMemoryPage>, HtmlPresenter, InPageFailure>,
    ) {
        let page = Arc::new(InMemoryPage::new());
        let finder = DealFinder::init(
            source,
            page.clone(),
            HtmlPresenter,
            InPageFailure::default(),
            &ApiSettings::default(),
        );
        (page, finder)
    }

    #[tokio::test]
    async fn test_init_shows_introduction() {
        let (page, finder) = finder(Arc::new(FakeSource::default()));
        assert_eq!(finder.current_view(), ViewId::Introduction);
        assert_eq!(page.visible_views(), vec![ViewId::Introduction]);
    }

    #[tokio::test]
    async fn test_show_all_uses_fixed_query() {
        let source = Arc::new(FakeSource::default());
        let (_, finder) = finder(source.clone());

        finder.handle(UiAction::OpenSearch).await;
        let view = finder.handle(UiAction::ShowAllDeals).await;

        assert_eq!(view, ViewId::ResultsList);
        assert_eq!(
            source.queries(),
            vec![DealQuery::AllDeals {
                store_id: 1,
                upper_price: 15
            }]
        );
    }

    #[tokio::test]
    async fn test_submit_search_trims_input() {
        let source = Arc::new(FakeSource::default());
        let (page, finder) = finder(source.clone());

        finder.handle(UiAction::OpenSearch).await;
        page.set_game_name("  Half-Life 3 ");
        let view = finder.handle(UiAction::SubmitSearch).await;

        assert_eq!(view, ViewId::ResultsList);
        assert_eq!(
            source.queries(),
            vec![DealQuery::ByTitle {
                title: "Half-Life 3".to_string(),
                upper_price: 50
            }]
        );
        assert!(page
            .content(Region::DealsContainer)
            .unwrap()
            .contains("Savings: 90.09%"));
    }

    #[tokio::test]
    async fn test_blank_input_never_fetches() {
        let source = Arc::new(FakeSource::default());
        let (page, finder) = finder(source.clone());

        finder.handle(UiAction::OpenSearch).await;
        page.set_game_name("   \t");
        let view = finder.handle(UiAction::SubmitSearch).await;

        assert_eq!(view, ViewId::Error);
        assert!(source.queries().is_empty());
        assert!(page
            .content(Region::ErrorPanel)
            .unwrap()
            .contains("Please enter a game name to search for deals."));
    }

    #[tokio::test]
    async fn test_failed_fetch_goes_through_failure_handler() {
        let source = Arc::new(FakeSource {
            fail_with_status: Some(500),
            ..Default::default()
        });
        let page = Arc::new(InMemoryPage::new());
        let finder = DealFinder::init(
            source,
            page.clone(),
            HtmlPresenter,
            RecordingFailure::default(),
            &ApiSettings::default(),
        );

        let view = finder.handle(UiAction::ShowAllDeals).await;

        assert_eq!(view, ViewId::GameSearchForm);
        assert_eq!(
            *finder.failure.seen.lock().unwrap(),
            vec!["HTTP error, status = 500".to_string()]
        );
        assert_eq!(page.content(Region::DealsContainer), None);
    }

    #[tokio::test]
    async fn test_back_controls() {
        let (page, finder) = finder(Arc::new(FakeSource::default()));

        finder.handle(UiAction::ShowAllDeals).await;
        assert_eq!(finder.handle(UiAction::GoBack).await, ViewId::Introduction);
        assert_eq!(
            finder.handle(UiAction::BackToSearch).await,
            ViewId::GameSearchForm
        );
        assert_eq!(page.visible_views(), vec![ViewId::GameSearchForm]);
    }

    #[test]
    fn test_default_limits() {
        let limits = QueryLimits::from_config(&ApiSettings::default());
        assert_eq!(limits, QueryLimits::default());
    }
}
