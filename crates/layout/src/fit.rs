//! Font-size search: the largest size at which text fits its box.
//!
//! All three searches are linear descents from a configured maximum. The
//! domain has at most a dozen candidate sizes per region, and descending from
//! the top makes the tie-break (prefer the largest fitting size) fall out of
//! the loop order.

use itertools::Itertools;

use crate::config::FitConfig;
use crate::fonts::{Font, FontMetrics};

/// Outcome of fitting one text block.
///
/// `chosen_size` is always within `[min_size, max_body_size]`. When no
/// candidate size fits, `chosen_size` is the minimum, `lines` holds only the
/// lines that fit the box at that size, and `truncated` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub chosen_size: f32,
    pub lines: Vec<String>,
    pub truncated: bool,
}

/// Finds the largest body size at which `text`, word-wrapped to the size's
/// per-line character budget, fits a `max_width` × `max_height` box.
pub fn fit_text(
    text: &str,
    font: Font,
    max_width: f32,
    max_height: f32,
    cfg: &FitConfig,
    metrics: &dyn FontMetrics,
) -> FitResult {
    let text = clip_chars(text, cfg.char_cap);

    let mut size = cfg.max_body_size;
    while size >= cfg.min_size {
        let budget = chars_per_line(max_width, font, size, metrics);
        let lines = wrap(text, budget);
        let needed = lines.len() as f32 * size * cfg.line_spacing;
        if needed <= max_height {
            return FitResult {
                chosen_size: size,
                lines,
                truncated: false,
            };
        }
        size -= cfg.body_step;
    }

    // Nothing fit. Re-wrap at the minimum size's own budget and drop the
    // tail lines that exceed the box.
    let budget = chars_per_line(max_width, font, cfg.min_size, metrics);
    let mut lines = wrap(text, budget);
    let line_height = cfg.min_size * cfg.line_spacing;
    let keep = (max_height / line_height).max(0.0).floor() as usize;
    log::debug!(
        "text block does not fit at minimum size; keeping {keep} of {} lines",
        lines.len()
    );
    lines.truncate(keep);
    FitResult {
        chosen_size: cfg.min_size,
        lines,
        truncated: true,
    }
}

/// Finds the largest title size at which the whole single-line `title` fits
/// `max_width`. Titles are never wrapped or truncated; if even the minimum
/// size overflows, the minimum is returned and the overflow is accepted.
pub fn fit_title(
    title: &str,
    font: Font,
    max_width: f32,
    cfg: &FitConfig,
    metrics: &dyn FontMetrics,
) -> f32 {
    let mut size = cfg.max_title_size;
    while size >= cfg.min_size {
        if metrics.text_width(title, font, size) <= max_width {
            return size;
        }
        size -= cfg.title_step;
    }
    cfg.min_size
}

/// Finds the largest footer size at which both columns fit simultaneously:
/// the source string within `total_width` minus the fixed page column and
/// padding, and the page string within the page column. The two fields
/// always render at one common size.
pub fn fit_footer(
    source_text: &str,
    page_text: &str,
    font: Font,
    total_width: f32,
    page_col_width: f32,
    padding: f32,
    cfg: &FitConfig,
    metrics: &dyn FontMetrics,
) -> f32 {
    let source_width = total_width - page_col_width - padding;
    let mut size = cfg.max_footer_size;
    while size >= cfg.min_footer_size {
        let source_fits = metrics.text_width(source_text, font, size) <= source_width;
        let page_fits = metrics.text_width(page_text, font, size) <= page_col_width;
        if source_fits && page_fits {
            return size;
        }
        size -= cfg.footer_step;
    }
    cfg.min_footer_size
}

/// Integer per-line character budget derived from the width of a
/// representative character at the candidate size.
fn chars_per_line(max_width: f32, font: Font, size: f32, metrics: &dyn FontMetrics) -> usize {
    let char_width = metrics.text_width("n", font, size);
    if char_width <= 0.0 {
        return 1;
    }
    ((max_width / char_width) as usize).max(1)
}

/// Greedy whitespace wrap to a character budget. Runs longer than the budget
/// are hard-broken into budget-sized chunks.
fn wrap(text: &str, budget: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
        }
        if word_len <= budget {
            current.push_str(word);
            current_len = word_len;
        } else {
            current = break_long_word(word, budget, &mut lines);
            current_len = current.chars().count();
        }
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Splits an over-long run into budget-sized chunks, pushing all full chunks
/// and returning the final chunk as the new open line.
fn break_long_word(word: &str, budget: usize, lines: &mut Vec<String>) -> String {
    let chunked = word.chars().chunks(budget);
    let mut pieces: Vec<String> = (&chunked).into_iter().map(|c| c.collect()).collect();
    let last = pieces.pop().unwrap_or_default();
    lines.extend(pieces);
    last
}

fn clip_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Base14Metrics;

    const BODY: Font = Font::Helvetica;
    const BOLD: Font = Font::HelveticaBold;

    fn cfg() -> FitConfig {
        FitConfig::default()
    }

    fn fit(text: &str, width: f32, height: f32) -> FitResult {
        fit_text(text, BODY, width, height, &cfg(), &Base14Metrics)
    }

    #[test]
    fn short_text_fits_at_maximum_size() {
        let result = fit("Short quote.", 300.0, 150.0);
        assert_eq!(result.chosen_size, cfg().max_body_size);
        assert_eq!(result.lines, vec!["Short quote.".to_string()]);
        assert!(!result.truncated);
    }

    #[test]
    fn empty_text_yields_no_lines_at_maximum_size() {
        let result = fit("", 300.0, 150.0);
        assert_eq!(result.chosen_size, cfg().max_body_size);
        assert!(result.lines.is_empty());
        assert!(!result.truncated);

        let blank = fit("   \n  ", 300.0, 150.0);
        assert!(blank.lines.is_empty());
        assert!(!blank.truncated);
    }

    #[test]
    fn chosen_size_stays_within_configured_bounds() {
        let cases = [
            ("one line".to_string(), 300.0, 150.0),
            ("word ".repeat(80), 300.0, 60.0),
            ("word ".repeat(400), 200.0, 40.0),
        ];
        for (text, w, h) in &cases {
            let result = fit(text, *w, *h);
            assert!(result.chosen_size >= cfg().min_size);
            assert!(result.chosen_size <= cfg().max_body_size);
        }
    }

    #[test]
    fn fitted_block_respects_height_and_width_budgets() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(12);
        let (w, h) = (300.0, 80.0);
        let result = fit(&text, w, h);
        assert!(!result.truncated);

        let needed = result.lines.len() as f32 * result.chosen_size * cfg().line_spacing;
        assert!(needed <= h, "needed {needed} exceeds height budget {h}");

        // Width accounting is character-budget based: every line must stay
        // within the budget derived from the representative char width.
        let char_width = Base14Metrics.text_width("n", BODY, result.chosen_size);
        for line in &result.lines {
            let accounted = line.chars().count() as f32 * char_width;
            assert!(accounted <= w, "line {line:?} overflows width budget");
        }
    }

    #[test]
    fn chosen_size_is_monotone_in_width() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(10);
        let mut previous = f32::INFINITY;
        for width in [500.0, 400.0, 300.0, 200.0, 100.0] {
            let size = fit(&text, width, 70.0).chosen_size;
            assert!(
                size <= previous,
                "size grew from {previous} to {size} as width shrank to {width}"
            );
            previous = size;
        }
    }

    #[test]
    fn fitting_is_idempotent() {
        let text = "Repeatable layout input with several words in it.".repeat(5);
        let first = fit(&text, 250.0, 90.0);
        let second = fit(&text, 250.0, 90.0);
        assert_eq!(first, second);
    }

    #[test]
    fn unbroken_run_falls_back_to_minimum_with_bounded_lines() {
        let text = "x".repeat(5000);
        let result = fit(&text, 300.0, 50.0);
        assert_eq!(result.chosen_size, cfg().min_size);
        assert!(result.truncated);

        // Only the lines that fit the box at minimum size survive.
        let line_height = cfg().min_size * cfg().line_spacing;
        let max_lines = (50.0 / line_height).floor() as usize;
        assert!(!result.lines.is_empty());
        assert!(result.lines.len() <= max_lines);
    }

    #[test]
    fn fallback_keeps_leading_lines_only() {
        let text = (0..200)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        let result = fit(&text, 120.0, 30.0);
        assert!(result.truncated);
        assert!(result.lines[0].starts_with("word0"));
    }

    #[test]
    fn title_fits_at_maximum_when_narrow_enough() {
        let size = fit_title("Test Card", BOLD, 300.0, &cfg(), &Base14Metrics);
        assert_eq!(size, cfg().max_title_size);
    }

    #[test]
    fn title_shrinks_but_never_wraps() {
        let title = "A considerably longer card title than usual";
        let size = fit_title(title, BOLD, 150.0, &cfg(), &Base14Metrics);
        assert!(size < cfg().max_title_size);
        assert!(size >= cfg().min_size);
    }

    #[test]
    fn overlong_title_returns_minimum_size() {
        let title = "An impossibly long title that cannot fit any candidate size at all";
        let size = fit_title(title, BOLD, 30.0, &cfg(), &Base14Metrics);
        assert_eq!(size, cfg().min_size);
    }

    #[test]
    fn footer_keeps_maximum_size_when_both_columns_fit() {
        let size = fit_footer(
            "Source: Meditations",
            "Page: 12",
            BODY,
            336.0,
            48.0,
            6.0,
            &cfg(),
            &Base14Metrics,
        );
        assert_eq!(size, cfg().max_footer_size);
    }

    #[test]
    fn footer_shrinks_to_satisfy_both_columns_at_one_size() {
        let long_source = format!("Source: {}", "Critique of Pure Reason, ".repeat(4));
        let size = fit_footer(
            &long_source,
            "Page: 3",
            BODY,
            336.0,
            48.0,
            6.0,
            &cfg(),
            &Base14Metrics,
        );
        assert!(size < cfg().max_footer_size);
        assert!(size >= cfg().min_footer_size);
    }

    #[test]
    fn footer_exhaustion_returns_minimum() {
        let size = fit_footer(
            &format!("Source: {}", "x".repeat(400)),
            "Page: 999999",
            BODY,
            336.0,
            48.0,
            6.0,
            &cfg(),
            &Base14Metrics,
        );
        assert_eq!(size, cfg().min_footer_size);
    }

    #[test]
    fn wrap_breaks_at_word_boundaries() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn wrap_hard_breaks_oversized_runs() {
        let lines = wrap("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn clip_chars_respects_char_boundaries() {
        assert_eq!(clip_chars("héllo", 2), "hé");
        assert_eq!(clip_chars("hi", 10), "hi");
    }
}
