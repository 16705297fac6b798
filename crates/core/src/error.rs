//! The unified error type for all high-level pipeline operations.
//!
//! Per-record parse failures never surface here; the pipeline recovers them
//! locally and only counts them. What does surface is unrecoverable:
//! configuration mistakes, source-directory I/O, and output-stage failures.

use cardstock_render_lopdf::RenderError;
use cardstock_source::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("rendering error: {0}")]
    Render(#[from] RenderError),
}
