use crate::core::{DealCard, ErrorPanel, Presenter};
use crate::utils::error::Result;
use std::fmt::Write;

/// Plain text listing for terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPresenter;

impl Presenter for TextPresenter {
    fn render_cards(&self, cards: &[DealCard]) -> Result<String> {
        let mut out = String::new();
        for card in cards {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{}", card.title);
            let _ = writeln!(
                out,
                "  Sale Price: ${} (Normal Price: ${})",
                card.sale_price, card.normal_price
            );
            let _ = writeln!(out, "  Savings: {}%", card.savings);
            let _ = writeln!(out, "  {}", card.deal_url);
        }
        Ok(out)
    }

    fn render_error(&self, panel: &ErrorPanel) -> Result<String> {
        Ok(format!("{}\n{}\n", panel.summary, panel.detail))
    }
}
