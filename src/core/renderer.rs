use crate::core::{Deal, DealCard, ErrorPanel, Presenter, Region, ViewId, ViewSurface};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::{Mutex, OnceLock};

pub const DEFAULT_REDIRECT_URL: &str = "https://www.cheapshark.com/redirect";

/// Reflects fetch outcomes into the page surface.
pub struct ViewRenderer<V: ViewSurface, P: Presenter> {
    surface: V,
    presenter: P,
    redirect_url: String,
    current: Mutex<ViewId>,
}

impl<V: ViewSurface, P: Presenter> ViewRenderer<V, P> {
    pub fn new(surface: V, presenter: P, redirect_url: impl Into<String>) -> Self {
        Self {
            surface,
            presenter,
            redirect_url: redirect_url.into(),
            current: Mutex::new(ViewId::Introduction),
        }
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn current_view(&self) -> ViewId {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn to_card(&self, deal: &Deal) -> DealCard {
        DealCard {
            title: deal.title.clone(),
            sale_price: deal.sale_price.clone(),
            normal_price: deal.normal_price.clone(),
            savings: two_decimals(&deal.savings),
            // Deal ids arrive already URL-encoded.
            deal_url: format!("{}?dealID={}", self.redirect_url, deal.deal_id),
        }
    }

    /// Replaces the results container with one card per deal and shows the
    /// results panel. Nothing is written if presentation fails.
    pub fn display_deals(&self, deals: &[Deal]) -> Result<()> {
        let cards: Vec<DealCard> = deals.iter().map(|deal| self.to_card(deal)).collect();
        let markup = self.presenter.render_cards(&cards)?;

        tracing::debug!("Rendering {} deal cards", cards.len());
        self.surface.replace_content(Region::DealsContainer, markup);
        self.switch_view(ViewId::ResultsList);
        Ok(())
    }

    pub fn display_error(&self, panel: &ErrorPanel) -> Result<()> {
        let markup = self.presenter.render_error(panel)?;
        self.surface.replace_content(Region::ErrorPanel, markup);
        self.switch_view(ViewId::Error);
        Ok(())
    }

    /// Hides every panel, then shows `target`.
    pub fn switch_view(&self, target: ViewId) {
        for view in ViewId::ALL {
            self.surface.set_visible(view, view == target);
        }
        self.surface.scroll_to_top(target);

        match self.current.lock() {
            Ok(mut current) => *current = target,
            Err(poisoned) => *poisoned.into_inner() = target,
        }
    }
}

fn leading_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
            .expect("static pattern is valid")
    })
}

/// Formats the longest leading number in `raw` with two decimals, rounding
/// exact ties up. Values with no leading number are shown as received.
fn two_decimals(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let value = leading_number_pattern()
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match value {
        Some(value) if value.is_infinite() => {
            let text = if value < 0.0 { "-Infinity" } else { "Infinity" };
            text.to_string()
        }
        Some(value) => fixed_two(value),
        None => raw.to_string(),
    }
}

// Works on the exact decimal expansion of the f64 so that only true ties
// (0.125, 12.625) round up and near-ties (1.005 is 1.00499...) round down.
fn fixed_two(value: f64) -> String {
    // 1100 places covers every fractional digit an f64 can carry.
    let exact = format!("{:.1100}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut digits: Vec<u8> = int_part.bytes().collect();
    digits.extend((0..2).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(2).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - 2;
    let whole: String = digits[..split].iter().map(|&d| d as char).collect();
    let cents: String = digits[split..].iter().map(|&d| d as char).collect();
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, whole, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::html::HtmlPresenter;
    use crate::adapters::page::InMemoryPage;
    use std::sync::Arc;

    fn deal(title: &str, savings: &str) -> Deal {
        Deal {
            title: title.to_string(),
            sale_price: "4.99".to_string(),
            normal_price: "19.99".to_string(),
            savings: savings.to_string(),
            deal_id: "X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8%3D".to_string(),
        }
    }

    fn renderer() -> (Arc<InMemoryPage>, ViewRenderer<Arc<InMemoryPage>, HtmlPresenter>) {
        let page = Arc::new(InMemoryPage::new());
        let renderer = ViewRenderer::new(page.clone(), HtmlPresenter, DEFAULT_REDIRECT_URL);
        (page, renderer)
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(two_decimals("75.037500"), "75.04");
        assert_eq!(two_decimals("80"), "80.00");
        assert_eq!(two_decimals("0"), "0.00");
        assert_eq!(two_decimals("n/a"), "n/a");
        assert_eq!(two_decimals(""), "");
    }

    #[test]
    fn test_two_decimals_rounds_exact_ties_up() {
        assert_eq!(two_decimals("12.625000"), "12.63");
        assert_eq!(two_decimals("0.125"), "0.13");
        assert_eq!(two_decimals("-0.125"), "-0.13");
        assert_eq!(two_decimals("99.999"), "100.00");
        // Stored as 1.00499999..., so it is not a tie.
        assert_eq!(two_decimals("1.005"), "1.00");
    }

    #[test]
    fn test_two_decimals_uses_leading_number() {
        assert_eq!(two_decimals("75abc"), "75.00");
        assert_eq!(two_decimals("  3.14159 %"), "3.14");
        assert_eq!(two_decimals(".5"), "0.50");
        assert_eq!(two_decimals("1e2x"), "100.00");
        assert_eq!(two_decimals("12.5.6"), "12.50");
        assert_eq!(two_decimals("Infinity"), "Infinity");
        assert_eq!(two_decimals("abc75"), "abc75");
    }

    #[test]
    fn test_card_links_to_redirect() {
        let (_, renderer) = renderer();
        let card = renderer.to_card(&deal("Celeste", "75.0375"));

        assert_eq!(card.savings, "75.04");
        assert_eq!(
            card.deal_url,
            "https://www.cheapshark.com/redirect?dealID=X8sebHhbc1Ga0dTkgg59WgyM506af9oNZZJLU9uSrX8%3D"
        );
    }

    #[test]
    fn test_display_deals_one_card_per_record() {
        let (page, renderer) = renderer();
        renderer
            .display_deals(&[deal("Celeste", "75.0375"), deal("Hades", "50")])
            .unwrap();

        let markup = page.content(Region::DealsContainer).unwrap();
        assert_eq!(markup.matches("<h4>").count(), 2);
        assert!(markup.contains("<h4>Celeste</h4>"));
        assert!(markup.contains("<h4>Hades</h4>"));
        assert!(markup.contains("Sale Price: $4.99 (Normal Price: $19.99)"));
        assert!(markup.contains("Savings: 75.04%"));
        assert!(markup.contains("Savings: 50.00%"));
        assert!(markup.contains("View Deal"));
        assert_eq!(page.visible_views(), vec![ViewId::ResultsList]);
        assert_eq!(renderer.current_view(), ViewId::ResultsList);
    }

    #[test]
    fn test_display_empty_deals_still_switches() {
        let (page, renderer) = renderer();
        renderer.switch_view(ViewId::GameSearchForm);
        renderer.display_deals(&[]).unwrap();

        assert_eq!(page.content(Region::DealsContainer).unwrap().trim(), "");
        assert_eq!(page.visible_views(), vec![ViewId::ResultsList]);
    }

    #[test]
    fn test_display_deals_is_idempotent() {
        let (page, renderer) = renderer();
        let deals = vec![deal("Celeste", "75.0375"), deal("Hades", "50")];

        renderer.display_deals(&deals).unwrap();
        let first = page.content(Region::DealsContainer);
        renderer.display_deals(&deals).unwrap();
        let second = page.content(Region::DealsContainer);

        assert_eq!(first, second);
    }

    #[test]
    fn test_switch_view_leaves_exactly_one_visible() {
        let (page, renderer) = renderer();
        for view in ViewId::ALL {
            page.set_visible(view, true);
        }

        for target in ViewId::ALL {
            renderer.switch_view(target);
            assert_eq!(page.visible_views(), vec![target]);
            assert_eq!(page.scroll_resets(target), 1);
        }
    }

    #[test]
    fn test_display_error_shows_error_panel() {
        let (page, renderer) = renderer();
        renderer
            .display_error(&ErrorPanel {
                summary: "Something went wrong".to_string(),
                detail: "HTTP error, status = 500".to_string(),
                back_target: ViewId::GameSearchForm,
            })
            .unwrap();

        let markup = page.content(Region::ErrorPanel).unwrap();
        assert!(markup.contains("HTTP error, status = 500"));
        assert_eq!(page.visible_views(), vec![ViewId::Error]);
    }
}
