//! PDF output for composed card sheets.
//!
//! The renderer is a pure consumer: it takes the ordered layout-unit
//! sequence, projects it into positioned elements via the layout crate, and
//! writes one buffered PDF. The whole document is assembled in memory and
//! written once, so a failing run never leaves a partial file behind.

use thiserror::Error;

mod renderer;

pub use renderer::PdfRenderer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
