//! The record-to-document pipeline.
//!
//! One pass: drain the record source, compose a card per good record,
//! paginate, render once. A record that fails to parse is logged and
//! skipped; only output-stage failures abort the run.

use std::path::Path;

use cardstock_layout::{Base14Metrics, FitConfig, SheetConfig, compose_card, paginate};
use cardstock_render_lopdf::PdfRenderer;
use cardstock_source::{MarkdownDirSource, RecordSource};

use crate::error::PipelineError;

/// What a run produced and what it passed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub skipped: usize,
}

pub struct Pipeline {
    fit: FitConfig,
    sheet: SheetConfig,
    metrics: Base14Metrics,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Drains `source` and renders one document from whatever parsed.
    pub fn generate(
        &self,
        mut source: impl RecordSource,
    ) -> Result<(Vec<u8>, RunSummary), PipelineError> {
        let mut cards = Vec::with_capacity(source.size_hint().unwrap_or(0));
        let mut skipped = 0usize;

        while let Some(item) = source.next_record() {
            match item.record {
                Ok(record) => cards.push(compose_card(
                    &record,
                    &self.sheet.card,
                    &self.fit,
                    &self.metrics,
                )),
                Err(err) => {
                    log::warn!("skipping {}: {err}", item.path.display());
                    skipped += 1;
                }
            }
        }

        let rendered = cards.len();
        let units = paginate(cards, self.sheet.slots);
        let bytes = PdfRenderer::new(self.sheet).render(&units, &self.metrics)?;
        log::info!("composed {rendered} cards, skipped {skipped} records");
        Ok((bytes, RunSummary { rendered, skipped }))
    }

    /// Reads a directory of Markdown notes and writes one PDF. The output
    /// file is only written after the whole document has been assembled.
    pub fn generate_to_file(
        &self,
        input_dir: &Path,
        output: &Path,
    ) -> Result<RunSummary, PipelineError> {
        let source = MarkdownDirSource::open(input_dir)?;
        let (bytes, summary) = self.generate(source)?;
        std::fs::write(output, bytes)?;
        Ok(summary)
    }
}

/// Builds a [`Pipeline`], validating the configuration once up front so the
/// fitting loops can assume sane bounds.
pub struct PipelineBuilder {
    fit: FitConfig,
    sheet: SheetConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            fit: FitConfig::default(),
            sheet: SheetConfig::default(),
        }
    }

    pub fn with_fit_config(mut self, fit: FitConfig) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_sheet_config(mut self, sheet: SheetConfig) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let fit = &self.fit;
        let sheet = &self.sheet;

        if sheet.slots == 0 {
            return Err(PipelineError::Config(
                "sheet must have at least one card slot".into(),
            ));
        }
        if fit.min_size <= 0.0 {
            return Err(PipelineError::Config(
                "minimum font size must be positive".into(),
            ));
        }
        if fit.body_step <= 0.0 || fit.title_step <= 0.0 || fit.footer_step <= 0.0 {
            return Err(PipelineError::Config(
                "font size steps must be positive".into(),
            ));
        }
        if fit.max_body_size < fit.min_size
            || fit.max_title_size < fit.min_size
            || fit.max_footer_size < fit.min_footer_size
        {
            return Err(PipelineError::Config(
                "maximum font sizes must not be below their minimums".into(),
            ));
        }
        let available = sheet.page.height - sheet.margins.vertical();
        if sheet.slots as f32 * sheet.card.size.height > available {
            return Err(PipelineError::Config(
                "card slots exceed the printable page height".into(),
            ));
        }

        Ok(Pipeline {
            fit: self.fit,
            sheet: self.sheet,
            metrics: Base14Metrics,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstock_source::{SourceError, SourceItem, VecRecordSource};
    use cardstock_types::CardRecord;
    use std::path::PathBuf;

    fn record(title: &str) -> CardRecord {
        CardRecord {
            title: title.to_string(),
            quote: "Quote text.".to_string(),
            analysis: "Analysis text.".to_string(),
            source: "Book".to_string(),
            page_label: "1".to_string(),
        }
    }

    /// A source with one bad record wedged between good ones.
    struct MixedSource {
        items: Vec<SourceItem>,
    }

    impl MixedSource {
        fn new() -> Self {
            let items = vec![
                SourceItem {
                    path: PathBuf::from("good-1.md"),
                    record: Ok(record("First")),
                },
                SourceItem {
                    path: PathBuf::from("bad.md"),
                    record: Err(SourceError::MissingHeading),
                },
                SourceItem {
                    path: PathBuf::from("good-2.md"),
                    record: Ok(record("Second")),
                },
            ];
            Self { items }
        }
    }

    impl RecordSource for MixedSource {
        fn next_record(&mut self) -> Option<SourceItem> {
            if self.items.is_empty() {
                None
            } else {
                Some(self.items.remove(0))
            }
        }
    }

    #[test]
    fn bad_records_are_skipped_and_counted() {
        let pipeline = Pipeline::builder().build().unwrap();
        let (bytes, summary) = pipeline.generate(MixedSource::new()).unwrap();
        assert_eq!(summary, RunSummary {
            rendered: 2,
            skipped: 1
        });
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn vec_source_renders_all_records() {
        let pipeline = Pipeline::builder().build().unwrap();
        let source = VecRecordSource::new((0..7).map(|i| record(&format!("Card {i}"))).collect());
        let (_, summary) = pipeline.generate(source).unwrap();
        assert_eq!(summary.rendered, 7);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn zero_slots_is_a_configuration_error() {
        let mut sheet = SheetConfig::default();
        sheet.slots = 0;
        let err = Pipeline::builder()
            .with_sheet_config(sheet)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn zero_step_is_a_configuration_error() {
        let mut fit = FitConfig::default();
        fit.body_step = 0.0;
        let err = Pipeline::builder().with_fit_config(fit).build().unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn oversized_cards_are_a_configuration_error() {
        let mut sheet = SheetConfig::default();
        sheet.card.size.height = 400.0;
        let err = Pipeline::builder()
            .with_sheet_config(sheet)
            .build()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
