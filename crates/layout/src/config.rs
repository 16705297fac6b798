//! Immutable engine configuration.
//!
//! The sheet, card, and fit parameters travel as explicit structs so that a
//! different label format is a different `SheetConfig` value, not a rebuild.
//! Defaults describe the Avery 5388 index-card sheet: three 5"×3" cards per
//! US letter page.

use crate::fonts::Font;
use cardstock_types::{Margins, Size};
use serde::{Deserialize, Serialize};

/// Bounds and step sizes for the font-size descent searches.
///
/// All sizes are in points. Each search starts at its region's maximum and
/// decrements by the region's step until the text fits or `min_size` is
/// reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Floor for every region's descent.
    pub min_size: f32,
    pub max_body_size: f32,
    pub body_step: f32,
    pub max_title_size: f32,
    pub title_step: f32,
    pub max_footer_size: f32,
    pub min_footer_size: f32,
    pub footer_step: f32,
    /// Line height multiplier applied to the chosen size.
    pub line_spacing: f32,
    /// Hard cap on the number of characters considered per block, bounding
    /// the wrap cost for pathological inputs.
    pub char_cap: usize,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min_size: 6.0,
            max_body_size: 10.0,
            body_step: 0.5,
            max_title_size: 12.0,
            title_step: 1.0,
            max_footer_size: 8.0,
            min_footer_size: 6.0,
            footer_step: 0.5,
            line_spacing: 1.2,
            char_cap: 2000,
        }
    }
}

/// Fixed geometry of one card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    pub size: Size,
    /// Uniform inner margin around the content area.
    pub margin: f32,
    pub body_font: Font,
    /// Face used for the title and the inline field labels.
    pub bold_font: Font,
    /// Gap between the title region and the body region.
    pub spacer: f32,
    pub footer_height: f32,
    /// Fixed width of the right-hand "Page" footer column.
    pub page_col_width: f32,
    /// Padding between the two footer columns.
    pub footer_padding: f32,
    /// Extra title-region height reserved for the rule under the title.
    pub rule_allowance: f32,
    pub rule_thickness: f32,
}

impl CardConfig {
    pub fn content_width(&self) -> f32 {
        self.size.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.size.height - 2.0 * self.margin
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            size: Size::new(360.0, 216.0),
            margin: 12.0,
            body_font: Font::Helvetica,
            bold_font: Font::HelveticaBold,
            spacer: 12.0,
            footer_height: 36.0,
            page_col_width: 48.0,
            footer_padding: 6.0,
            rule_allowance: 6.0,
            rule_thickness: 1.5,
        }
    }
}

/// Page geometry and slot count for one sheet format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    pub page: Size,
    pub margins: Margins,
    /// Number of card slots per page, stacked top to bottom.
    pub slots: usize,
    pub card: CardConfig,
}

impl SheetConfig {
    /// Three 5"×3" cards on US letter, the layout this tool was built for.
    pub fn avery_5388() -> Self {
        Self {
            page: Size::new(612.0, 792.0),
            margins: Margins::new(72.0, 126.0, 72.0, 126.0),
            slots: 3,
            card: CardConfig::default(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::avery_5388()
    }
}
