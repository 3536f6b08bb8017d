//! Page-expression parsing and display
//!
//! Handles the free-form page references that show up in commands:
//! "1-5", "1, 3, 7", "2 4", "all", or any mix of those.

use ahash::AHashSet;

/// Parse a page expression into a sorted, deduplicated page set
///
/// Tokens are numbers or inclusive ranges ("3-6") separated by commas or
/// whitespace. Pages outside 1..=num_pages are discarded, as are tokens
/// that do not parse at all. A missing or empty expression, or an "all"
/// token anywhere, means the whole document.
pub fn parse_page_range(expr: Option<&str>, num_pages: u32) -> Vec<u32> {
    let raw = match expr {
        Some(raw) => raw.trim(),
        None => return full_range(num_pages),
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return full_range(num_pages);
    }

    let mut seen: AHashSet<u32> = AHashSet::new();
    for token in raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if token.eq_ignore_ascii_case("all") {
            return full_range(num_pages);
        }
        if let Some((lo, hi)) = token.split_once('-') {
            match (lo.trim().parse::<u32>(), hi.trim().parse::<u32>()) {
                (Ok(lo), Ok(hi)) => {
                    // Clamp before iterating so absurd ranges stay cheap
                    for page in lo.max(1)..=hi.min(num_pages) {
                        seen.insert(page);
                    }
                }
                _ => continue,
            }
        } else if let Ok(page) = token.parse::<u32>() {
            if (1..=num_pages).contains(&page) {
                seen.insert(page);
            }
        }
    }

    let mut pages: Vec<u32> = seen.into_iter().collect();
    pages.sort_unstable();
    pages
}

/// Parse a page expression as an ordered list, keeping duplicates
///
/// Used where position matters (reordering). Non-numeric tokens are
/// skipped; no range syntax, no bounds filtering.
pub fn parse_page_list(expr: &str) -> Vec<u32> {
    expr.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter_map(|t| t.parse::<u32>().ok())
        .collect()
}

/// Every page of an n-page document, in order
pub fn full_range(num_pages: u32) -> Vec<u32> {
    (1..=num_pages).collect()
}

/// Compact human-readable rendering of a page set
///
/// Short lists print verbatim, longer contiguous runs as "first-last",
/// anything else elides the middle.
pub fn format_page_list(pages: &[u32]) -> String {
    if pages.is_empty() {
        return "none".to_string();
    }
    if pages.len() <= 5 {
        return join(pages);
    }

    let first = pages[0];
    let last = pages[pages.len() - 1];
    let contiguous = pages.windows(2).all(|w| w[1] == w[0] + 1);
    if contiguous {
        format!("{}-{}", first, last)
    } else {
        format!("{}, {}, ... {}", pages[0], pages[1], last)
    }
}

fn join(pages: &[u32]) -> String {
    pages
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
