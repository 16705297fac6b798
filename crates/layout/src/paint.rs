//! Flattens the layout-unit sequence into absolutely positioned page
//! elements.
//!
//! Coordinates are top-down page points (origin at the top-left); the
//! renderer is responsible for any axis flip its output format needs. Every
//! text element carries its resolved font and size, so painting is a pure
//! projection with no further fitting decisions.

use cardstock_types::{Color, Rect};

use crate::card::{BodyBlock, ComposedCard, PAGE_LABEL, SOURCE_LABEL};
use crate::config::{CardConfig, SheetConfig};
use crate::fonts::{Font, FontMetrics};
use crate::sheet::{LayoutUnit, slot_rects};

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: CardElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardElement {
    Text {
        content: String,
        font: Font,
        size: f32,
    },
    Rule {
        thickness: f32,
        color: Color,
    },
}

/// Groups the unit sequence into pages at each break marker and paints every
/// card into its slot.
pub fn paint_units(
    units: &[LayoutUnit],
    sheet: &SheetConfig,
    metrics: &dyn FontMetrics,
) -> Vec<Vec<PositionedElement>> {
    let slots = slot_rects(sheet);
    units
        .split(|unit| matches!(unit, LayoutUnit::PageBreak))
        .map(|group| {
            let mut elements = Vec::new();
            for (slot, unit) in slots.iter().zip(group) {
                if let LayoutUnit::Card(card) = unit {
                    paint_card(card, *slot, metrics, &mut elements);
                }
            }
            elements
        })
        .collect()
}

fn paint_card(
    card: &ComposedCard,
    slot: Rect,
    metrics: &dyn FontMetrics,
    out: &mut Vec<PositionedElement>,
) {
    let geo = card.geometry;
    let content = Rect::new(
        slot.x + geo.margin,
        slot.y + geo.margin,
        geo.content_width(),
        geo.content_height(),
    );

    // Centered title with the rule below it.
    let title_width = metrics.text_width(&card.title.text, geo.bold_font, card.title.size);
    out.push(text_element(
        content.x + ((content.width - title_width) / 2.0).max(0.0),
        content.y,
        title_width,
        card.title.line_height,
        card.title.text.clone(),
        geo.bold_font,
        card.title.size,
    ));
    out.push(PositionedElement {
        x: content.x,
        y: content.y + card.title.height - geo.rule_allowance / 2.0,
        width: content.width,
        height: geo.rule_thickness,
        element: CardElement::Rule {
            thickness: geo.rule_thickness,
            color: Color::RED,
        },
    });

    paint_body(&card.quote, content, &geo, metrics, out);
    paint_body(&card.analysis, content, &geo, metrics, out);

    // Footer sits flush against the content bottom.
    let footer = &card.footer;
    let footer_y = content.y + content.height - footer.line_height;
    let space = metrics.text_width(" ", geo.body_font, footer.size);

    let source_label_width = metrics.text_width(SOURCE_LABEL, geo.bold_font, footer.size);
    out.push(text_element(
        content.x,
        footer_y,
        source_label_width,
        footer.line_height,
        SOURCE_LABEL.to_string(),
        geo.bold_font,
        footer.size,
    ));
    out.push(text_element(
        content.x + source_label_width + space,
        footer_y,
        metrics.text_width(&footer.source, geo.body_font, footer.size),
        footer.line_height,
        footer.source.clone(),
        geo.body_font,
        footer.size,
    ));

    let page_x = content.x + content.width - geo.page_col_width;
    let page_label_width = metrics.text_width(PAGE_LABEL, geo.bold_font, footer.size);
    out.push(text_element(
        page_x,
        footer_y,
        page_label_width,
        footer.line_height,
        PAGE_LABEL.to_string(),
        geo.bold_font,
        footer.size,
    ));
    out.push(text_element(
        page_x + page_label_width + space,
        footer_y,
        metrics.text_width(&footer.page, geo.body_font, footer.size),
        footer.line_height,
        footer.page.clone(),
        geo.body_font,
        footer.size,
    ));
}

/// Paints one labeled body block: the bold label leads the first wrapped
/// line, continuation lines start at the content edge.
fn paint_body(
    block: &BodyBlock,
    content: Rect,
    geo: &CardConfig,
    metrics: &dyn FontMetrics,
    out: &mut Vec<PositionedElement>,
) {
    let top = content.y + block.y;
    let label_width = metrics.text_width(block.label, geo.bold_font, block.size);
    out.push(text_element(
        content.x,
        top,
        label_width,
        block.line_height,
        block.label.to_string(),
        geo.bold_font,
        block.size,
    ));

    let space = metrics.text_width(" ", geo.body_font, block.size);
    for (i, line) in block.lines.iter().enumerate() {
        let x = if i == 0 {
            content.x + label_width + space
        } else {
            content.x
        };
        out.push(text_element(
            x,
            top + i as f32 * block.line_height,
            metrics.text_width(line, geo.body_font, block.size),
            block.line_height,
            line.clone(),
            geo.body_font,
            block.size,
        ));
    }
}

fn text_element(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    content: String,
    font: Font,
    size: f32,
) -> PositionedElement {
    PositionedElement {
        x,
        y,
        width,
        height,
        element: CardElement::Text {
            content,
            font,
            size,
        },
    }
}
