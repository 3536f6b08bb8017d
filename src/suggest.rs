//! Example commands: per-intent suggestions, the generic fallback list,
//! and the capability catalog served to autocomplete surfaces

use crate::types::{CommandSuggestion, Intent};

/// Autocomplete responses are capped at this many entries
pub const SUGGESTION_LIMIT: usize = 10;

/// Example phrasings offered alongside a low-confidence fuzzy match
pub fn for_intent(intent: Intent) -> Vec<String> {
    let examples: &[&str] = match intent {
        Intent::RotatePages => &[
            "rotate all pages 90 degrees",
            "rotate page 1 clockwise",
            "rotate pages 1-5 counterclockwise",
        ],
        Intent::RemovePages => &[
            "remove pages 1-5",
            "delete the last 3 pages",
            "remove page 1",
        ],
        Intent::AddWatermark => &[
            "add watermark \"CONFIDENTIAL\"",
            "watermark DRAFT at 50% opacity",
        ],
        _ => &[],
    };
    examples.iter().map(|s| s.to_string()).collect()
}

/// Starting points shown when nothing matched at all
pub fn generic() -> Vec<String> {
    [
        "remove pages 1-5",
        "rotate page 1 clockwise",
        "add watermark \"DRAFT\"",
        "encrypt with password secret",
        "split into individual pages",
        "extract text",
        "make searchable",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Everything the parser understands: (command, description, intent, category)
const CATALOG: &[(&str, &str, Intent, &str)] = &[
    (
        "remove pages 1-5",
        "Remove specified pages from the document",
        Intent::RemovePages,
        "Page Operations",
    ),
    (
        "delete the last 3 pages",
        "Remove the last N pages",
        Intent::RemovePages,
        "Page Operations",
    ),
    (
        "rotate page 1 clockwise",
        "Rotate pages by 90°",
        Intent::RotatePages,
        "Page Operations",
    ),
    (
        "rotate all pages 180 degrees",
        "Rotate all pages",
        Intent::RotatePages,
        "Page Operations",
    ),
    (
        "add blank page after 5",
        "Insert a blank page",
        Intent::AddBlankPage,
        "Page Operations",
    ),
    (
        "reorder pages as 3, 1, 2",
        "Change page order",
        Intent::ReorderPages,
        "Page Operations",
    ),
    (
        "add watermark \"DRAFT\"",
        "Add text watermark",
        Intent::AddWatermark,
        "Document Operations",
    ),
    (
        "encrypt with password secret",
        "Password protect the PDF",
        Intent::Encrypt,
        "Document Operations",
    ),
    (
        "split into individual pages",
        "Split into separate files",
        Intent::Split,
        "Document Operations",
    ),
    (
        "split every 5 pages",
        "Split by page count",
        Intent::Split,
        "Document Operations",
    ),
    (
        "extract text",
        "Extract text content",
        Intent::ExtractText,
        "Content Extraction",
    ),
    (
        "extract tables",
        "Extract table data",
        Intent::ExtractTables,
        "Content Extraction",
    ),
    (
        "extract images",
        "Extract embedded images",
        Intent::ExtractImages,
        "Content Extraction",
    ),
    (
        "make searchable",
        "OCR scanned documents",
        Intent::Ocr,
        "Content Extraction",
    ),
    (
        "set title to \"Report\"",
        "Update document title",
        Intent::UpdateMetadata,
        "Metadata",
    ),
    (
        "set author to \"John\"",
        "Update document author",
        Intent::UpdateMetadata,
        "Metadata",
    ),
];

/// The full capability catalog, in display order
pub fn capabilities() -> Vec<CommandSuggestion> {
    CATALOG
        .iter()
        .map(|(command, description, intent, category)| {
            CommandSuggestion::new(*command, *description, *intent, *category)
        })
        .collect()
}

/// Catalog entries whose command or description contains the prefix,
/// case-insensitively, capped at SUGGESTION_LIMIT
pub fn filter_capabilities(prefix: &str) -> Vec<CommandSuggestion> {
    let needle = prefix.to_lowercase();
    capabilities()
        .into_iter()
        .filter(|cap| {
            needle.is_empty()
                || cap.command.to_lowercase().contains(&needle)
                || cap.description.to_lowercase().contains(&needle)
        })
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete() {
        let caps = capabilities();
        assert_eq!(caps.len(), 16);
        // Every catalog example names a real operation
        for cap in &caps {
            assert_ne!(cap.intent, Intent::Unknown);
            assert!(!cap.command.is_empty());
            assert!(!cap.category.is_empty());
        }
    }

    #[test]
    fn test_catalog_categories() {
        let caps = capabilities();
        let categories: Vec<&str> = caps.iter().map(|c| c.category.as_str()).collect();
        assert!(categories.contains(&"Page Operations"));
        assert!(categories.contains(&"Document Operations"));
        assert!(categories.contains(&"Content Extraction"));
        assert!(categories.contains(&"Metadata"));
    }

    #[test]
    fn test_filter_matches_command_and_description() {
        let rotate = filter_capabilities("rotate");
        assert_eq!(rotate.len(), 2);
        assert!(rotate.iter().all(|c| c.intent == Intent::RotatePages));

        // "OCR scanned documents" matches on the description
        let ocr = filter_capabilities("ocr");
        assert_eq!(ocr.len(), 1);
        assert_eq!(ocr[0].command, "make searchable");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(filter_capabilities("ROTATE").len(), 2);
    }

    #[test]
    fn test_empty_prefix_caps_at_limit() {
        assert_eq!(filter_capabilities("").len(), SUGGESTION_LIMIT);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_capabilities("zzzz").is_empty());
    }

    #[test]
    fn test_generic_suggestions() {
        assert_eq!(generic().len(), 7);
    }

    #[test]
    fn test_intent_suggestions() {
        assert_eq!(for_intent(Intent::RotatePages).len(), 3);
        assert_eq!(for_intent(Intent::AddWatermark).len(), 2);
        assert!(for_intent(Intent::Split).is_empty());
    }
}
