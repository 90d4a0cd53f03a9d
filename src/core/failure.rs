use crate::core::renderer::ViewRenderer;
use crate::core::{ErrorPanel, Presenter, ViewId, ViewSurface};
use crate::utils::error::DealError;

/// What happens to the page when an action fails.
pub trait FailureHandler: Send + Sync {
    fn handle_failure<V: ViewSurface, P: Presenter>(
        &self,
        renderer: &ViewRenderer<V, P>,
        error: &DealError,
    );
}

/// Replaces the active panel with an error summary, the raw error message and
/// a back control to the search form.
#[derive(Debug, Clone)]
pub struct InPageFailure {
    summary: String,
}

impl InPageFailure {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
        }
    }

    pub fn panel_for(&self, error: &DealError) -> ErrorPanel {
        ErrorPanel {
            summary: self.summary.clone(),
            detail: error.to_string(),
            back_target: ViewId::GameSearchForm,
        }
    }
}

impl Default for InPageFailure {
    fn default() -> Self {
        Self::new("An error occurred while fetching deals.")
    }
}

impl FailureHandler for InPageFailure {
    fn handle_failure<V: ViewSurface, P: Presenter>(
        &self,
        renderer: &ViewRenderer<V, P>,
        error: &DealError,
    ) {
        tracing::warn!("Action failed: {} (Category: {:?})", error, error.category());

        let panel = self.panel_for(error);
        if let Err(render_err) = renderer.display_error(&panel) {
            tracing::error!("Could not render error panel: {}", render_err);
            renderer.switch_view(panel.back_target);
        }
    }
}
