//! Auto-fit card layout engine.
//!
//! Takes a [`CardRecord`](cardstock_types::CardRecord) and produces a frozen
//! [`ComposedCard`]: every region's font size is chosen by descending from a
//! configured maximum until the wrapped text fits its box, then the cards are
//! tiled onto fixed sheet slots with page breaks between groups.
//!
//! Nothing in this crate does I/O; font measurement goes through the
//! [`FontMetrics`] trait and rendering is left to a downstream consumer of
//! [`PositionedElement`]s.

pub mod card;
pub mod config;
pub mod fit;
pub mod fonts;
pub mod paint;
pub mod sheet;

pub use card::{BodyBlock, ComposedCard, FooterBlock, TitleBlock, compose_card};
pub use config::{CardConfig, FitConfig, SheetConfig};
pub use fit::{FitResult, fit_footer, fit_text, fit_title};
pub use fonts::{Base14Metrics, Font, FontMetrics};
pub use paint::{CardElement, PositionedElement, paint_units};
pub use sheet::{LayoutUnit, paginate, slot_rects};
