//! Fixed slot geometry and pagination.

use cardstock_types::Rect;

use crate::card::ComposedCard;
use crate::config::SheetConfig;

/// One entry in the ordered sequence handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutUnit {
    Card(ComposedCard),
    PageBreak,
}

/// The fixed slot rectangles of one page, top to bottom, in page coordinates
/// with the origin at the top-left.
///
/// Slots sit flush against the top and bottom margins with the remaining
/// height divided into equal internal gaps.
pub fn slot_rects(sheet: &SheetConfig) -> Vec<Rect> {
    let card = sheet.card.size;
    let available = sheet.page.height - sheet.margins.vertical();
    let n = sheet.slots;
    let gap = if n > 1 {
        (available - n as f32 * card.height) / (n - 1) as f32
    } else {
        0.0
    };
    (0..n)
        .map(|i| {
            Rect::new(
                sheet.margins.left,
                sheet.margins.top + i as f32 * (card.height + gap),
                card.width,
                card.height,
            )
        })
        .collect()
}

/// Assigns cards to slots in input order, inserting a page break after every
/// `slots`-th card. No trailing break follows the last card, even when the
/// card count is an exact multiple of the slot count.
pub fn paginate(cards: Vec<ComposedCard>, slots: usize) -> Vec<LayoutUnit> {
    let total = cards.len();
    let mut units = Vec::with_capacity(total + total / slots.max(1));
    for (i, card) in cards.into_iter().enumerate() {
        units.push(LayoutUnit::Card(card));
        if (i + 1) % slots == 0 && i + 1 < total {
            units.push(LayoutUnit::PageBreak);
        }
    }
    units
}
