//! Core data types for parsed commands

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Intent-specific parameters ("pages", "rotation", "text", ...) keyed by name
pub type Params = Map<String, Value>;

/// Operation requested by a natural-language command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    RemovePages,
    RotatePages,
    AddWatermark,
    Encrypt,
    Split,
    Merge,
    ExtractText,
    AddBlankPage,
    ReorderPages,
    Ocr,
    UpdateMetadata,
    ExtractImages,
    ExtractTables,
    Unknown,
}

impl Intent {
    /// Wire name of the intent (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::RemovePages => "remove_pages",
            Intent::RotatePages => "rotate_pages",
            Intent::AddWatermark => "add_watermark",
            Intent::Encrypt => "encrypt",
            Intent::Split => "split",
            Intent::Merge => "merge",
            Intent::ExtractText => "extract_text",
            Intent::AddBlankPage => "add_blank_page",
            Intent::ReorderPages => "reorder_pages",
            Intent::Ocr => "ocr",
            Intent::UpdateMetadata => "update_metadata",
            Intent::ExtractImages => "extract_images",
            Intent::ExtractTables => "extract_tables",
            Intent::Unknown => "unknown",
        }
    }

    /// Backend endpoint that executes this intent; empty when there is none
    pub fn api_endpoint(&self) -> &'static str {
        match self {
            Intent::RemovePages => "/api/remove-pages",
            Intent::RotatePages => "/api/rotate",
            Intent::AddWatermark => "/api/watermark",
            Intent::Encrypt => "/api/encrypt",
            Intent::Split => "/api/split",
            Intent::ExtractText => "/api/extract-text",
            Intent::AddBlankPage => "/api/add-blank-page",
            Intent::ReorderPages => "/api/reorder-pages",
            Intent::Ocr => "/api/ocr/extract",
            Intent::UpdateMetadata => "/api/metadata",
            Intent::ExtractImages => "/api/extract-images",
            Intent::ExtractTables => "/api/extract-tables",
            Intent::Merge | Intent::Unknown => "",
        }
    }

    /// True for operations that rewrite the document itself
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Intent::RemovePages
                | Intent::RotatePages
                | Intent::AddWatermark
                | Intent::Encrypt
                | Intent::Split
                | Intent::AddBlankPage
                | Intent::ReorderPages
        )
    }
}

/// Document the command applies to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    pub file_id: String,
    pub num_pages: u32,
    #[serde(default = "default_true")]
    pub has_text: bool,
    #[serde(default = "default_true")]
    pub has_images: bool,
}

fn default_true() -> bool {
    true
}

impl DocumentContext {
    pub fn new(file_id: impl Into<String>, num_pages: u32) -> Self {
        Self {
            file_id: file_id.into(),
            num_pages,
            has_text: true,
            has_images: true,
        }
    }
}

/// Fully resolved command, ready to execute or to show for confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub intent: Intent,
    pub parameters: Params,
    pub confidence: f64,
    pub original_text: String,
    pub api_endpoint: String,
    pub api_payload: Params,
    pub is_destructive: bool,
    pub human_readable_action: String,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ParsedCommand {
    /// Result for a command nothing could be made of
    pub fn unknown(command: &str, suggestions: Vec<String>) -> Self {
        Self {
            intent: Intent::Unknown,
            parameters: Params::new(),
            confidence: 0.0,
            original_text: command.to_string(),
            api_endpoint: String::new(),
            api_payload: Params::new(),
            is_destructive: false,
            human_readable_action: "Unknown command".to_string(),
            warnings: Vec::new(),
            suggestions,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.intent != Intent::Unknown
    }

    /// Whether the caller should ask before executing: any destructive
    /// operation, any encryption, or anything that drew a warning
    pub fn requires_confirmation(&self) -> bool {
        self.is_destructive || self.intent == Intent::Encrypt || !self.warnings.is_empty()
    }
}

/// One example command for autocomplete / capability listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandSuggestion {
    pub command: String,
    pub description: String,
    pub intent: Intent,
    pub category: String,
}

impl CommandSuggestion {
    pub fn new(
        command: impl Into<String>,
        description: impl Into<String>,
        intent: Intent,
        category: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            intent,
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_wire_names_match_serde() {
        for intent in [
            Intent::RemovePages,
            Intent::RotatePages,
            Intent::AddWatermark,
            Intent::Encrypt,
            Intent::Split,
            Intent::Merge,
            Intent::ExtractText,
            Intent::AddBlankPage,
            Intent::ReorderPages,
            Intent::Ocr,
            Intent::UpdateMetadata,
            Intent::ExtractImages,
            Intent::ExtractTables,
            Intent::Unknown,
        ] {
            let serialized = serde_json::to_string(&intent).unwrap();
            assert_eq!(serialized, format!("\"{}\"", intent.as_str()));
        }
    }

    #[test]
    fn test_destructive_set() {
        assert!(Intent::RemovePages.is_destructive());
        assert!(Intent::Encrypt.is_destructive());
        assert!(Intent::ReorderPages.is_destructive());
        assert!(!Intent::ExtractText.is_destructive());
        assert!(!Intent::Ocr.is_destructive());
        assert!(!Intent::UpdateMetadata.is_destructive());
        assert!(!Intent::Unknown.is_destructive());
    }

    #[test]
    fn test_unknown_has_no_endpoint() {
        assert_eq!(Intent::Unknown.api_endpoint(), "");
        assert_eq!(Intent::Merge.api_endpoint(), "");
        assert_eq!(Intent::RotatePages.api_endpoint(), "/api/rotate");
    }

    #[test]
    fn test_confirmation_rule() {
        let mut cmd = ParsedCommand::unknown("whatever", Vec::new());
        assert!(!cmd.requires_confirmation());

        cmd.intent = Intent::ExtractText;
        assert!(!cmd.requires_confirmation());

        cmd.warnings.push("careful".to_string());
        assert!(cmd.requires_confirmation());

        cmd.warnings.clear();
        cmd.intent = Intent::Encrypt;
        assert!(cmd.requires_confirmation());

        cmd.intent = Intent::RemovePages;
        cmd.is_destructive = true;
        assert!(cmd.requires_confirmation());
    }

    #[test]
    fn test_context_defaults() {
        let context = DocumentContext::new("abc123", 10);
        assert!(context.has_text);
        assert!(context.has_images);
        assert_eq!(context.num_pages, 10);
    }
}
