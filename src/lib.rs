//! cardstock: renders Markdown note exports onto index-card label sheets,
//! auto-scaling each card's title, body, and footer to fit.

pub use cardstock_core::{Pipeline, PipelineBuilder, PipelineError, RunSummary};
pub use cardstock_layout as layout;
pub use cardstock_render_lopdf as render;
pub use cardstock_source as source;
pub use cardstock_types as types;
