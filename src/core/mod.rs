pub mod dispatcher;
pub mod failure;
pub mod finder;
pub mod renderer;

pub use crate::domain::model::{Deal, DealCard, DealQuery, ErrorPanel, Region, UiAction, ViewId};
pub use crate::domain::ports::{ConfigProvider, DealSource, Presenter, ViewSurface};
pub use crate::utils::error::Result;
