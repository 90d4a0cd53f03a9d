// Adapters layer: concrete presenters and page surfaces.

pub mod html;
pub mod page;
pub mod text;
