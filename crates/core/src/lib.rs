//! Integration layer: wires the record source, the auto-fit layout engine,
//! and the PDF renderer into one pipeline.

pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineBuilder, RunSummary};
