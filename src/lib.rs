pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{ApiSettings, TomlConfig};

pub use crate::adapters::{html::HtmlPresenter, page::InMemoryPage, text::TextPresenter};
pub use crate::core::{
    dispatcher::RequestDispatcher,
    failure::{FailureHandler, InPageFailure},
    finder::DealFinder,
    renderer::ViewRenderer,
};
pub use crate::domain::model::{Deal, DealCard, DealQuery, ErrorPanel, Region, UiAction, ViewId};
pub use crate::utils::error::{DealError, Result};
