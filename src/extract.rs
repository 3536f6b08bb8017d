//! Parameter extraction from pattern captures
//!
//! One function per capture shape. Each takes the regex captures and the
//! document context and produces the intent's parameter map, or an error
//! when the command cannot be turned into a sane operation.

use regex::Captures;
use serde_json::{json, Value};
use thiserror::Error;

use crate::pages::{full_range, parse_page_list, parse_page_range};
use crate::types::{DocumentContext, Params};

/// Rotation applied when a command names neither degrees nor a direction
pub(crate) const DEFAULT_ROTATION: u32 = 90;
/// Watermark opacity applied when the command does not give one
pub(crate) const DEFAULT_OPACITY: f64 = 0.3;

/// Why an otherwise-matching command could not produce parameters
#[derive(Debug, Error)]
pub(crate) enum ExtractError {
    #[error("pattern did not capture group {index}")]
    MissingCapture { index: usize },
    #[error("'{text}' is not a usable number")]
    BadNumber { text: String },
    #[error("page {page} is out of range for a {num_pages}-page document")]
    PageOutOfRange { page: u32, num_pages: u32 },
    #[error("page expression matched no pages")]
    EmptyPages,
}

/// Trimmed text of a capture group, `None` when absent or blank
fn group<'h>(caps: &Captures<'h>, index: usize) -> Option<&'h str> {
    caps.get(index)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

fn required<'h>(caps: &Captures<'h>, index: usize) -> Result<&'h str, ExtractError> {
    group(caps, index).ok_or(ExtractError::MissingCapture { index })
}

fn required_u32(caps: &Captures<'_>, index: usize) -> Result<u32, ExtractError> {
    let text = required(caps, index)?;
    text.parse::<u32>().map_err(|_| ExtractError::BadNumber {
        text: text.to_string(),
    })
}

/// Whole matched text, lowercased, for sniffing keywords like "last"
fn whole_match(caps: &Captures<'_>) -> String {
    caps.get(0)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_default()
}

/// Page scope that distinguishes "whole document" (null) from a given set
fn optional_pages(caps: &Captures<'_>, index: usize, context: &DocumentContext) -> Value {
    match group(caps, index) {
        Some(expr) => json!(parse_page_range(Some(expr), context.num_pages)),
        None => Value::Null,
    }
}

/// Unwrap a json! object literal into a parameter map
fn obj(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Page set for removal commands ("remove pages 1-5")
pub(crate) fn page_set(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let pages = parse_page_range(group(caps, 1), context.num_pages);
    Ok(obj(json!({ "pages": pages })))
}

/// "remove the last/first N pages" relative form, clamped to the document
pub(crate) fn relative_pages(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let count: u32 = required(caps, 1)?.parse().unwrap_or(0);
    let num_pages = context.num_pages;
    let pages: Vec<u32> = if whole_match(caps).contains("last") {
        (num_pages.saturating_sub(count) + 1..=num_pages).collect()
    } else {
        (1..=count.min(num_pages)).collect()
    };
    Ok(obj(json!({ "pages": pages })))
}

/// Pages plus optional degrees ("rotate pages 1-3 by 90 degrees")
pub(crate) fn rotation(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let pages = parse_page_range(group(caps, 1), context.num_pages);
    let rotation = group(caps, 2)
        .and_then(|deg| deg.parse::<u32>().ok())
        .unwrap_or(DEFAULT_ROTATION);
    Ok(obj(json!({ "pages": pages, "rotation": rotation })))
}

/// Degrees with no page expression at all: the whole document turns
pub(crate) fn rotation_degrees(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let rotation = required(caps, 1)?.parse::<u32>().unwrap_or(DEFAULT_ROTATION);
    Ok(obj(json!({
        "pages": full_range(context.num_pages),
        "rotation": rotation,
    })))
}

/// Direction word instead of degrees ("turn page 2 upside down")
pub(crate) fn rotation_direction(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let pages = parse_page_range(group(caps, 1), context.num_pages);
    let rotation = degrees_for(required(caps, 2)?);
    Ok(obj(json!({ "pages": pages, "rotation": rotation })))
}

/// Flips are half turns
pub(crate) fn flip(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let pages = parse_page_range(group(caps, 1), context.num_pages);
    Ok(obj(json!({ "pages": pages, "rotation": 180 })))
}

fn degrees_for(direction: &str) -> u32 {
    match direction.to_lowercase().as_str() {
        "counterclockwise" | "left" => 270,
        "upside down" => 180,
        _ => DEFAULT_ROTATION,
    }
}

/// Watermark text with optional percent opacity; quotes are stripped by
/// the pattern itself
pub(crate) fn watermark(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let text = required(caps, 1)?;
    let opacity = group(caps, 2)
        .and_then(|pct| pct.parse::<f64>().ok())
        .map(|pct| pct / 100.0)
        .unwrap_or(DEFAULT_OPACITY);
    Ok(obj(json!({ "text": text, "opacity": opacity })))
}

/// Password for encryption; empty when the phrasing allows omitting it
pub(crate) fn password(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let password = group(caps, 1).unwrap_or("");
    Ok(obj(json!({ "user_password": password })))
}

/// Lock/secure phrasing: also flags when no password was given
pub(crate) fn password_optional(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let password = group(caps, 1).unwrap_or("");
    Ok(obj(json!({
        "user_password": password,
        "needs_password": password.is_empty(),
    })))
}

pub(crate) fn split_individual(
    _caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "mode": "individual" })))
}

pub(crate) fn split_count(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let per_file: u32 = required(caps, 1)?.parse().unwrap_or(1);
    Ok(obj(json!({ "mode": "count", "pages_per_file": per_file })))
}

/// Explicit cut points ("split at pages 3, 6")
pub(crate) fn split_at(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let split_at = parse_page_range(Some(required(caps, 1)?), context.num_pages);
    Ok(obj(json!({ "mode": "ranges", "split_at": split_at })))
}

/// Page run pulled out as one piece ("extract pages 2-4 as a new pdf")
pub(crate) fn split_ranges(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let pages = parse_page_range(Some(required(caps, 1)?), context.num_pages);
    let first = pages.first().copied().ok_or(ExtractError::EmptyPages)?;
    let last = pages.last().copied().ok_or(ExtractError::EmptyPages)?;
    Ok(obj(json!({ "mode": "ranges", "ranges": [[first, last]] })))
}

pub(crate) fn position(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let position: u32 = required(caps, 1)?.parse().unwrap_or(1);
    Ok(obj(json!({ "position": position })))
}

/// "after page N" inserts past it, "before page N" at it
pub(crate) fn position_relative(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let page: u32 = required(caps, 1)?.parse().unwrap_or(1);
    let position = if whole_match(caps).contains("after") {
        page.saturating_add(1)
    } else {
        page
    };
    Ok(obj(json!({ "position": position })))
}

/// "at the end" / "at the beginning" phrasing; default is the end
pub(crate) fn position_keyword(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let text = whole_match(caps);
    let position = if text.contains("beginning") || text.contains("start") {
        1
    } else {
        context.num_pages.saturating_add(1)
    };
    Ok(obj(json!({ "position": position })))
}

/// Optional page scope forwarded as-is; null means the whole document
pub(crate) fn passthrough_pages(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "pages": optional_pages(caps, 1, context) })))
}

pub(crate) fn ocr_pages(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({
        "pages": optional_pages(caps, 1, context),
        "mode": "extract",
    })))
}

pub(crate) fn ocr_searchable(
    _caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "mode": "searchable" })))
}

pub(crate) fn ocr_simple(
    _caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "mode": "extract" })))
}

pub(crate) fn metadata_title(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "title": required(caps, 1)? })))
}

pub(crate) fn metadata_author(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "author": required(caps, 1)? })))
}

pub(crate) fn metadata_subject(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    Ok(obj(json!({ "subject": required(caps, 1)? })))
}

/// Explicit full ordering ("reorder pages as 3, 1, 2")
pub(crate) fn new_order(
    caps: &Captures<'_>,
    _context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let order = parse_page_list(required(caps, 1)?);
    Ok(obj(json!({ "new_order": order })))
}

/// Single page move, expressed as the resulting full ordering
pub(crate) fn move_page(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let from = required_u32(caps, 1)?;
    let to = required_u32(caps, 2)?;
    let num_pages = context.num_pages;
    if !(1..=num_pages).contains(&from) {
        return Err(ExtractError::PageOutOfRange {
            page: from,
            num_pages,
        });
    }

    let mut order = full_range(num_pages);
    order.remove(from as usize - 1);
    let target = (to.saturating_sub(1) as usize).min(order.len());
    order.insert(target, from);
    Ok(obj(json!({ "new_order": order })))
}

/// Two pages trade places
pub(crate) fn swap_pages(
    caps: &Captures<'_>,
    context: &DocumentContext,
) -> Result<Params, ExtractError> {
    let first = required_u32(caps, 1)?;
    let second = required_u32(caps, 2)?;
    let num_pages = context.num_pages;
    for page in [first, second] {
        if !(1..=num_pages).contains(&page) {
            return Err(ExtractError::PageOutOfRange { page, num_pages });
        }
    }

    let mut order = full_range(num_pages);
    order.swap(first as usize - 1, second as usize - 1);
    Ok(obj(json!({ "new_order": order })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn captures<'h>(pattern: &str, haystack: &'h str) -> Captures<'h> {
        Regex::new(pattern)
            .unwrap()
            .captures(haystack)
            .unwrap()
    }

    fn context(num_pages: u32) -> DocumentContext {
        DocumentContext::new("doc", num_pages)
    }

    #[test]
    fn test_relative_pages_last_clamps_to_document() {
        let caps = captures(r"last (\d+) pages", "last 99 pages");
        let params = relative_pages(&caps, &context(5)).unwrap();
        assert_eq!(params["pages"], json!([1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_relative_pages_first() {
        let caps = captures(r"first (\d+) pages", "first 2 pages");
        let params = relative_pages(&caps, &context(5)).unwrap();
        assert_eq!(params["pages"], json!([1, 2]));
    }

    #[test]
    fn test_move_page_out_of_range_errors() {
        let caps = captures(r"(\d+) to (\d+)", "9 to 1");
        let err = move_page(&caps, &context(5)).unwrap_err();
        assert!(matches!(err, ExtractError::PageOutOfRange { page: 9, .. }));
    }

    #[test]
    fn test_move_page_target_clamps() {
        let caps = captures(r"(\d+) to (\d+)", "2 to 99");
        let params = move_page(&caps, &context(4)).unwrap();
        assert_eq!(params["new_order"], json!([1, 3, 4, 2]));

        let caps = captures(r"(\d+) to (\d+)", "3 to 0");
        let params = move_page(&caps, &context(4)).unwrap();
        assert_eq!(params["new_order"], json!([3, 1, 2, 4]));
    }

    #[test]
    fn test_swap_pages_out_of_range_errors() {
        let caps = captures(r"(\d+) and (\d+)", "2 and 44");
        let err = swap_pages(&caps, &context(5)).unwrap_err();
        assert!(matches!(err, ExtractError::PageOutOfRange { page: 44, .. }));
    }

    #[test]
    fn test_split_ranges_rejects_empty_page_set() {
        let caps = captures(r"pages (.+)", "pages nonsense");
        let err = split_ranges(&caps, &context(5)).unwrap_err();
        assert!(matches!(err, ExtractError::EmptyPages));
    }

    #[test]
    fn test_passthrough_null_vs_set() {
        let caps = captures(r"text(?: from (.+))?", "text from 2-3");
        let params = passthrough_pages(&caps, &context(5)).unwrap();
        assert_eq!(params["pages"], json!([2, 3]));

        let caps = captures(r"text(?: from (.+))?", "text");
        let params = passthrough_pages(&caps, &context(5)).unwrap();
        assert_eq!(params["pages"], Value::Null);
    }

    #[test]
    fn test_watermark_defaults_opacity() {
        let caps = captures(r"watermark (\S+)(?: at (\d+))?", "watermark DRAFT");
        let params = watermark(&caps, &context(5)).unwrap();
        assert_eq!(params["text"], json!("DRAFT"));
        assert_eq!(params["opacity"], json!(DEFAULT_OPACITY));
    }

    #[test]
    fn test_rotation_defaults() {
        let caps = captures(r"rotate (\S+)(?: by (\d+))?", "rotate 2");
        let params = rotation(&caps, &context(5)).unwrap();
        assert_eq!(params["rotation"], json!(DEFAULT_ROTATION));
        assert_eq!(params["pages"], json!([2]));
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(degrees_for("clockwise"), 90);
        assert_eq!(degrees_for("right"), 90);
        assert_eq!(degrees_for("counterclockwise"), 270);
        assert_eq!(degrees_for("left"), 270);
        assert_eq!(degrees_for("upside down"), 180);
        assert_eq!(degrees_for("Clockwise"), 90);
    }
}
