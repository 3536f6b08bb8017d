//! Human-readable previews of what a parsed command will do

use serde_json::Value;

use crate::pages::format_page_list;
use crate::types::{DocumentContext, Intent, Params};

/// One-line description of the operation, shown before execution
pub fn action(intent: Intent, params: &Params, context: &DocumentContext) -> String {
    match intent {
        Intent::RemovePages => {
            let pages = page_numbers(params, "pages");
            format!(
                "Remove {} page(s): {}",
                pages.len(),
                format_page_list(&pages)
            )
        }
        Intent::RotatePages => {
            let pages = page_numbers(params, "pages");
            let rotation = params
                .get("rotation")
                .and_then(Value::as_u64)
                .unwrap_or(90);
            format!("Rotate {} page(s) by {}°", pages.len(), rotation)
        }
        Intent::AddWatermark => {
            let text = params.get("text").and_then(Value::as_str).unwrap_or("");
            let opacity = params
                .get("opacity")
                .and_then(Value::as_f64)
                .unwrap_or(0.3);
            format!(
                "Add watermark \"{}\" with {}% opacity",
                text,
                (opacity * 100.0) as u32
            )
        }
        Intent::Encrypt => "Encrypt document with password".to_string(),
        Intent::Split => split_action(params, context),
        Intent::AddBlankPage => {
            let position = params
                .get("position")
                .and_then(Value::as_u64)
                .unwrap_or(1);
            format!("Add blank page at position {}", position)
        }
        Intent::ExtractText => format!("Extract text from {}", scope_phrase(params)),
        Intent::Ocr => {
            if params.get("mode").and_then(Value::as_str) == Some("searchable") {
                "Make PDF searchable".to_string()
            } else {
                "Extract text using OCR".to_string()
            }
        }
        Intent::UpdateMetadata => metadata_action(params),
        Intent::ReorderPages => {
            let order = page_numbers(params, "new_order");
            let rendered = order
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Reorder pages to: {}", rendered)
        }
        Intent::ExtractImages => format!("Extract images from {}", scope_phrase(params)),
        Intent::ExtractTables => format!("Extract tables from {}", scope_phrase(params)),
        Intent::Merge | Intent::Unknown => "Unknown action".to_string(),
    }
}

fn split_action(params: &Params, context: &DocumentContext) -> String {
    // Missing mode reads as individual (keyword-only matches carry none)
    match params.get("mode").and_then(Value::as_str).unwrap_or("individual") {
        "individual" => format!("Split into {} individual pages", context.num_pages),
        "count" => {
            let per_file = params
                .get("pages_per_file")
                .and_then(Value::as_u64)
                .unwrap_or(1);
            format!("Split every {} pages", per_file)
        }
        "ranges" => "Split at specified pages".to_string(),
        _ => "Split document".to_string(),
    }
}

fn metadata_action(params: &Params) -> String {
    let mut parts: Vec<String> = Vec::new();
    for field in ["title", "author", "subject"] {
        if let Some(value) = params.get(field).and_then(Value::as_str) {
            parts.push(format!("{} to \"{}\"", field, value));
        }
    }
    if parts.is_empty() {
        "Update metadata".to_string()
    } else {
        format!("Set {}", parts.join(", "))
    }
}

/// "all pages" unless the parameters name a non-empty page set
fn scope_phrase(params: &Params) -> String {
    match params.get("pages").and_then(Value::as_array) {
        Some(pages) if !pages.is_empty() => format_page_list(&page_numbers(params, "pages")),
        _ => "all pages".to_string(),
    }
}

fn page_numbers(params: &Params, key: &str) -> Vec<u32> {
    params
        .get(key)
        .and_then(Value::as_array)
        .map(|pages| {
            pages
                .iter()
                .filter_map(Value::as_u64)
                .map(|p| p as u32)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params_of(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => Params::new(),
        }
    }

    fn ctx(num_pages: u32) -> DocumentContext {
        DocumentContext::new("doc", num_pages)
    }

    #[test]
    fn test_remove_preview() {
        let params = params_of(json!({ "pages": [1, 2, 3] }));
        assert_eq!(
            action(Intent::RemovePages, &params, &ctx(10)),
            "Remove 3 page(s): 1, 2, 3"
        );
    }

    #[test]
    fn test_remove_preview_elides_long_runs() {
        let params = params_of(json!({ "pages": [1, 2, 3, 4, 5, 6, 7] }));
        assert_eq!(
            action(Intent::RemovePages, &params, &ctx(10)),
            "Remove 7 page(s): 1-7"
        );
    }

    #[test]
    fn test_rotate_preview_defaults() {
        let params = Params::new();
        assert_eq!(
            action(Intent::RotatePages, &params, &ctx(10)),
            "Rotate 0 page(s) by 90°"
        );
    }

    #[test]
    fn test_watermark_preview_truncates_opacity() {
        let params = params_of(json!({ "text": "DRAFT", "opacity": 0.45 }));
        assert_eq!(
            action(Intent::AddWatermark, &params, &ctx(10)),
            "Add watermark \"DRAFT\" with 45% opacity"
        );
    }

    #[test]
    fn test_split_preview_modes() {
        let individual = params_of(json!({ "mode": "individual" }));
        assert_eq!(
            action(Intent::Split, &individual, &ctx(12)),
            "Split into 12 individual pages"
        );

        let count = params_of(json!({ "mode": "count", "pages_per_file": 4 }));
        assert_eq!(action(Intent::Split, &count, &ctx(12)), "Split every 4 pages");

        let ranges = params_of(json!({ "mode": "ranges", "split_at": [3] }));
        assert_eq!(
            action(Intent::Split, &ranges, &ctx(12)),
            "Split at specified pages"
        );

        // Keyword-only split carries no mode and reads as individual
        assert_eq!(
            action(Intent::Split, &Params::new(), &ctx(12)),
            "Split into 12 individual pages"
        );
    }

    #[test]
    fn test_extract_scope_phrases() {
        let all = params_of(json!({ "pages": null }));
        assert_eq!(
            action(Intent::ExtractText, &all, &ctx(5)),
            "Extract text from all pages"
        );

        let some = params_of(json!({ "pages": [2, 3] }));
        assert_eq!(
            action(Intent::ExtractImages, &some, &ctx(5)),
            "Extract images from 2, 3"
        );
    }

    #[test]
    fn test_metadata_preview_joins_fields() {
        let params = params_of(json!({ "title": "Report", "author": "Jo" }));
        assert_eq!(
            action(Intent::UpdateMetadata, &params, &ctx(5)),
            "Set title to \"Report\", author to \"Jo\""
        );
        assert_eq!(
            action(Intent::UpdateMetadata, &Params::new(), &ctx(5)),
            "Update metadata"
        );
    }

    #[test]
    fn test_unknown_preview() {
        assert_eq!(action(Intent::Unknown, &Params::new(), &ctx(5)), "Unknown action");
        assert_eq!(action(Intent::Merge, &Params::new(), &ctx(5)), "Unknown action");
    }
}
