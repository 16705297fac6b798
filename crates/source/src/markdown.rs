//! Field extraction from one Markdown note.
//!
//! A note contributes one card. The structural contract is small:
//!
//! - the first heading must read `Page <digits> - <title>` (anything else is
//!   a structural error and the note is skipped upstream);
//! - the first paragraph may carry a `[[source]]` wiki-link, otherwise the
//!   source falls back to `"Unknown"`;
//! - the first blockquote becomes the quote, absent means empty;
//! - the first paragraph starting with an `**Analysis:**` label contributes
//!   the analysis text, absent means empty.

use cardstock_types::CardRecord;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::SourceError;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Page\s*(\d+)\s*-\s*(.*)$").expect("valid heading regex"));
static WIKI_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("valid wiki-link regex"));

const ANALYSIS_MARKER: &str = "**Analysis:**";

/// Parses one note body into a card record.
pub fn parse_record(text: &str) -> Result<CardRecord, SourceError> {
    let heading = first_heading(text).ok_or(SourceError::MissingHeading)?;
    let captures = HEADING_RE
        .captures(heading)
        .ok_or_else(|| SourceError::HeadingFormat(heading.to_string()))?;
    let page_label = captures[1].to_string();
    let title = captures[2].trim().to_string();

    let paragraphs = paragraphs(text);

    let source = paragraphs
        .first()
        .and_then(|p| WIKI_LINK_RE.captures(p))
        .map(|c| c[1].to_string())
        .unwrap_or_else(|| CardRecord::UNKNOWN_SOURCE.to_string());

    let quote = first_blockquote(text).unwrap_or_default();

    let analysis = paragraphs
        .iter()
        .find_map(|p| p.strip_prefix(ANALYSIS_MARKER))
        .map(|rest| rest.trim().to_string())
        .unwrap_or_default();

    Ok(CardRecord {
        title,
        quote,
        analysis,
        source,
        page_label,
    })
}

fn first_heading(text: &str) -> Option<&str> {
    text.lines().find_map(|line| {
        let trimmed = line.trim_start();
        let stripped = trimmed.trim_start_matches('#');
        if stripped.len() < trimmed.len() {
            Some(stripped.trim())
        } else {
            None
        }
    })
}

/// Blank-line-separated paragraphs, excluding headings and blockquotes.
/// Continuation lines are joined with single spaces.
fn paragraphs(text: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        let is_body = !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with('>');
        if is_body {
            current.push(trimmed);
        } else if !current.is_empty() {
            result.push(current.join(" "));
            current.clear();
        }
    }
    if !current.is_empty() {
        result.push(current.join(" "));
    }
    result
}

/// The first run of `>`-prefixed lines, joined with single spaces.
fn first_blockquote(text: &str) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('>') {
            lines.push(rest.trim());
        } else if !lines.is_empty() {
            break;
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}
