use serde::{Deserialize, Serialize};

/// One card's worth of extracted note content.
///
/// Produced by a record source, consumed exactly once by the card composer.
/// A missing source is represented by the explicit `"Unknown"` sentinel
/// rather than an empty string; quote and analysis may legitimately be
/// empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub title: String,
    pub quote: String,
    pub analysis: String,
    pub source: String,
    pub page_label: String,
}

impl CardRecord {
    /// Sentinel used when a note carries no `[[source]]` link.
    pub const UNKNOWN_SOURCE: &'static str = "Unknown";
}
