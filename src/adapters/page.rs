use crate::core::{Region, ViewId, ViewSurface};
use crate::utils::error::Result;
use askama::Template;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    introduction_display: &'static str,
    search_display: &'static str,
    results_display: &'static str,
    error_display: &'static str,
    game_name: &'a str,
    deals_markup: &'a str,
    error_markup: &'a str,
}

#[derive(Debug, Default)]
struct PageState {
    visible: BTreeSet<ViewId>,
    content: BTreeMap<Region, String>,
    game_name: String,
    scroll_resets: BTreeMap<ViewId, usize>,
}

/// Page surface kept in memory. The CLI renders it to a document; tests
/// inspect it directly.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    state: Mutex<PageState>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write leaves the state consistent, so a poisoned lock is still usable.
    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_game_name(&self, name: &str) {
        self.state().game_name = name.to_string();
    }

    pub fn is_visible(&self, view: ViewId) -> bool {
        self.state().visible.contains(&view)
    }

    pub fn visible_views(&self) -> Vec<ViewId> {
        self.state().visible.iter().copied().collect()
    }

    pub fn content(&self, region: Region) -> Option<String> {
        self.state().content.get(&region).cloned()
    }

    pub fn scroll_resets(&self, view: ViewId) -> usize {
        self.state().scroll_resets.get(&view).copied().unwrap_or(0)
    }

    pub fn render_document(&self) -> Result<String> {
        let state = self.state();
        let display = |view: ViewId| {
            if state.visible.contains(&view) {
                "block"
            } else {
                "none"
            }
        };

        let template = PageTemplate {
            introduction_display: display(ViewId::Introduction),
            search_display: display(ViewId::GameSearchForm),
            results_display: display(ViewId::ResultsList),
            error_display: display(ViewId::Error),
            game_name: &state.game_name,
            deals_markup: state
                .content
                .get(&Region::DealsContainer)
                .map(String::as_str)
                .unwrap_or(""),
            error_markup: state
                .content
                .get(&Region::ErrorPanel)
                .map(String::as_str)
                .unwrap_or(""),
        };
        Ok(template.render()?)
    }
}

impl ViewSurface for InMemoryPage {
    fn set_visible(&self, view: ViewId, visible: bool) {
        let mut state = self.state();
        if visible {
            state.visible.insert(view);
        } else {
            state.visible.remove(&view);
        }
    }

    fn replace_content(&self, region: Region, markup: String) {
        self.state().content.insert(region, markup);
    }

    fn scroll_to_top(&self, view: ViewId) {
        *self.state().scroll_resets.entry(view).or_insert(0) += 1;
    }

    fn game_name_input(&self) -> String {
        self.state().game_name.clone()
    }
}
