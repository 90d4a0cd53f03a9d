use crate::core::{DealCard, ErrorPanel, Presenter, ViewId};
use crate::utils::error::Result;
use askama::Template;

#[derive(Template)]
#[template(path = "deal_cards.html")]
struct DealCardsTemplate<'a> {
    cards: &'a [DealCard],
}

#[derive(Template)]
#[template(path = "error_panel.html")]
struct ErrorPanelTemplate<'a> {
    summary: &'a str,
    detail: &'a str,
    back_target: ViewId,
}

/// Escaping HTML output; deal fields never reach the page unescaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    fn render_cards(&self, cards: &[DealCard]) -> Result<String> {
        Ok(DealCardsTemplate { cards }.render()?)
    }

    fn render_error(&self, panel: &ErrorPanel) -> Result<String> {
        let template = ErrorPanelTemplate {
            summary: &panel.summary,
            detail: &panel.detail,
            back_target: panel.back_target,
        };
        Ok(template.render()?)
    }
}
