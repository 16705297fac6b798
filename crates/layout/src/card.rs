//! Card composition: one record becomes one frozen layout unit.
//!
//! The composer allocates the fixed card height among the title region, a
//! spacer, the body region (split evenly between the quote and analysis
//! blocks), and the footer, then drives the three fitters with the resulting
//! per-region budgets. A `ComposedCard` is never mutated after construction.

use cardstock_types::CardRecord;

use crate::config::{CardConfig, FitConfig};
use crate::fit::{self, FitResult};
use crate::fonts::FontMetrics;

pub const QUOTE_LABEL: &str = "Quote:";
pub const ANALYSIS_LABEL: &str = "Analysis:";
pub const SOURCE_LABEL: &str = "Source:";
pub const PAGE_LABEL: &str = "Page:";

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBlock {
    pub text: String,
    pub size: f32,
    pub line_height: f32,
    /// Region height: the title line plus the rule allowance.
    pub height: f32,
}

/// One labeled body block, positioned relative to the card's content origin.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyBlock {
    pub label: &'static str,
    pub lines: Vec<String>,
    pub size: f32,
    pub line_height: f32,
    /// Offset of the region top below the content origin.
    pub y: f32,
    pub height: f32,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterBlock {
    pub source: String,
    pub page: String,
    pub size: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedCard {
    pub title: TitleBlock,
    pub quote: BodyBlock,
    pub analysis: BodyBlock,
    pub footer: FooterBlock,
    pub geometry: CardConfig,
}

pub fn compose_card(
    record: &CardRecord,
    card: &CardConfig,
    fit_cfg: &FitConfig,
    metrics: &dyn FontMetrics,
) -> ComposedCard {
    let content_width = card.content_width();
    let content_height = card.content_height();

    let title_size = fit::fit_title(&record.title, card.bold_font, content_width, fit_cfg, metrics);
    let title_line_height = title_size * fit_cfg.line_spacing;
    let title_height = title_line_height + card.rule_allowance;

    // Vertical budget left for the two body blocks.
    let body_height = content_height - title_height - card.spacer - card.footer_height;
    let half = body_height / 2.0;
    let body_y = title_height + card.spacer;

    let quote_fit = fit::fit_text(
        &record.quote,
        card.body_font,
        content_width,
        half,
        fit_cfg,
        metrics,
    );
    let analysis_fit = fit::fit_text(
        &record.analysis,
        card.body_font,
        content_width,
        half,
        fit_cfg,
        metrics,
    );
    // Both blocks render at one shared size for visual consistency, even
    // though each was fitted against its own half-height budget.
    let body_size = quote_fit.chosen_size.min(analysis_fit.chosen_size);
    let line_height = body_size * fit_cfg.line_spacing;

    let source_text = format!("{SOURCE_LABEL} {}", record.source);
    let page_text = format!("{PAGE_LABEL} {}", record.page_label);
    let footer_size = fit::fit_footer(
        &source_text,
        &page_text,
        card.body_font,
        content_width,
        card.page_col_width,
        card.footer_padding,
        fit_cfg,
        metrics,
    );

    ComposedCard {
        title: TitleBlock {
            text: record.title.clone(),
            size: title_size,
            line_height: title_line_height,
            height: title_height,
        },
        quote: body_block(QUOTE_LABEL, quote_fit, body_size, line_height, body_y, half),
        analysis: body_block(
            ANALYSIS_LABEL,
            analysis_fit,
            body_size,
            line_height,
            body_y + half,
            half,
        ),
        footer: FooterBlock {
            source: record.source.clone(),
            page: record.page_label.clone(),
            size: footer_size,
            line_height: footer_size * fit_cfg.line_spacing,
        },
        geometry: *card,
    }
}

fn body_block(
    label: &'static str,
    fitted: FitResult,
    size: f32,
    line_height: f32,
    y: f32,
    height: f32,
) -> BodyBlock {
    BodyBlock {
        label,
        lines: fitted.lines,
        size,
        line_height,
        y,
        height,
        truncated: fitted.truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Base14Metrics;

    fn record() -> CardRecord {
        CardRecord {
            title: "Test Card".to_string(),
            quote: "Short quote.".to_string(),
            analysis: "Short analysis.".to_string(),
            source: "Meditations".to_string(),
            page_label: "12".to_string(),
        }
    }

    fn compose(record: &CardRecord) -> ComposedCard {
        compose_card(
            record,
            &CardConfig::default(),
            &FitConfig::default(),
            &Base14Metrics,
        )
    }

    #[test]
    fn easy_record_keeps_every_region_at_maximum() {
        let fit_cfg = FitConfig::default();
        let card = compose(&record());
        assert_eq!(card.title.size, fit_cfg.max_title_size);
        assert_eq!(card.quote.size, fit_cfg.max_body_size);
        assert_eq!(card.footer.size, fit_cfg.max_footer_size);
        assert!(!card.quote.truncated);
        assert!(!card.analysis.truncated);
    }

    #[test]
    fn body_blocks_share_the_smaller_fitted_size() {
        let mut long = record();
        long.analysis = "A much longer analysis paragraph that needs several wrapped lines \
            before it settles into the lower half of the body region of the card, forcing \
            the fitter to walk down from the maximum size. "
            .repeat(4);
        let card = compose(&long);
        assert_eq!(card.quote.size, card.analysis.size);
        assert!(card.analysis.size < FitConfig::default().max_body_size);
    }

    #[test]
    fn regions_partition_the_content_height() {
        let cfg = CardConfig::default();
        let card = compose(&record());
        let body_height = card.quote.height + card.analysis.height;
        let total = card.title.height + cfg.spacer + body_height + cfg.footer_height;
        assert!((total - cfg.content_height()).abs() < 1e-3);
        assert!((card.analysis.y - (card.quote.y + card.quote.height)).abs() < 1e-3);
    }

    #[test]
    fn composition_is_deterministic() {
        let a = compose(&record());
        let b = compose(&record());
        assert_eq!(a, b);
    }

    #[test]
    fn empty_quote_composes_with_no_lines() {
        let mut sparse = record();
        sparse.quote = String::new();
        let card = compose(&sparse);
        assert!(card.quote.lines.is_empty());
        assert!(!card.quote.truncated);
    }
}
