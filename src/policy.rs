//! Warnings for operations that deserve a second look before running

use serde_json::Value;

use crate::types::{DocumentContext, Intent, Params};

/// Individual-page splits of documents larger than this warn about the
/// number of files produced
pub const SPLIT_WARNING_THRESHOLD: u32 = 50;
/// Passwords shorter than this draw a weak-password warning
pub const MIN_PASSWORD_LEN: usize = 4;

/// Collect warnings for a resolved command; empty means nothing notable
pub fn warnings(intent: Intent, params: &Params, context: &DocumentContext) -> Vec<String> {
    let mut warnings = Vec::new();

    match intent {
        Intent::RemovePages => {
            let count = params
                .get("pages")
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            let num_pages = context.num_pages as usize;
            if count >= num_pages {
                warnings
                    .push("Cannot remove all pages. At least one page must remain.".to_string());
            } else if count > num_pages / 2 {
                warnings.push(format!(
                    "This will remove more than half of the document ({} of {} pages).",
                    count, num_pages
                ));
            }
        }
        Intent::Encrypt => {
            let password = params
                .get("user_password")
                .and_then(Value::as_str)
                .unwrap_or("");
            if password.is_empty() {
                warnings.push("No password provided. Please specify a password.".to_string());
            } else if password.chars().count() < MIN_PASSWORD_LEN {
                warnings.push(
                    "Password is very short. Consider using a longer password.".to_string(),
                );
            }
        }
        Intent::Split => {
            // No mode default here: a keyword-only split never warns
            if params.get("mode").and_then(Value::as_str) == Some("individual")
                && context.num_pages > SPLIT_WARNING_THRESHOLD
            {
                warnings.push(format!(
                    "This will create {} separate files.",
                    context.num_pages
                ));
            }
        }
        _ => {}
    }

    warnings
}
