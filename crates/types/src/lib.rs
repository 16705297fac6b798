pub mod color;
pub mod geometry;
pub mod record;

pub use color::Color;
pub use geometry::{Margins, Rect, Size};
pub use record::CardRecord;
