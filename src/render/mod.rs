pub mod annotate;
pub mod canvas;
pub mod features;
pub mod green;
pub mod text;

pub use canvas::{Canvas, PAGE_ASPECT, PageWindow};
pub use text::Labeler;
