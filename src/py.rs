//! Python bindings for command core using PyO3

use pyo3::prelude::*;
use pyo3::types::PyDict;
use crate::types::{CommandSuggestion, DocumentContext, ParsedCommand};
use crate::similarity::sequence_ratio;
use crate::matcher::CommandParser;
use crate::suggest;
use serde_json;

/// Calculate similarity between two strings (Python function)
#[pyfunction]
pub fn py_sequence_ratio(a: &str, b: &str) -> f64 {
    sequence_ratio(a, b)
}

/// Python wrapper for the command parser
#[pyclass]
pub struct PyCommandParser {
    parser: CommandParser,
}

#[pymethods]
impl PyCommandParser {
    #[new]
    fn new() -> Self {
        Self {
            parser: CommandParser::new(),
        }
    }

    /// Parse a natural-language command against a document
    #[pyo3(signature = (command, file_id, num_pages, has_text = true, has_images = true))]
    fn parse<'py>(
        &self,
        command: &str,
        file_id: String,
        num_pages: u32,
        has_text: bool,
        has_images: bool,
        py: Python<'py>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let context = DocumentContext {
            file_id,
            num_pages,
            has_text,
            has_images,
        };
        let result = self.parser.parse(command, &context);
        result_dict(py, &result)
    }

    /// Full catalog of supported commands with descriptions
    fn get_capabilities<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        suggest::capabilities()
            .iter()
            .map(|cap| suggestion_dict(py, cap))
            .collect()
    }

    /// Catalog entries matching a partial input, for autocomplete
    #[pyo3(signature = (prefix = ""))]
    fn get_suggestions<'py>(
        &self,
        prefix: &str,
        py: Python<'py>,
    ) -> PyResult<Vec<Bound<'py, PyDict>>> {
        suggest::filter_capabilities(prefix)
            .iter()
            .map(|cap| suggestion_dict(py, cap))
            .collect()
    }
}

fn result_dict<'py>(py: Python<'py>, result: &ParsedCommand) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("success", result.is_recognized())?;
    dict.set_item("intent", result.intent.as_str())?;
    // Nested structures cross the boundary as JSON strings
    let parameters = serde_json::to_string(&result.parameters).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
            "Failed to serialize parameters: {}",
            e
        ))
    })?;
    dict.set_item("parameters", parameters)?;
    dict.set_item("confidence", result.confidence)?;
    dict.set_item("action_preview", &result.human_readable_action)?;
    dict.set_item("api_endpoint", &result.api_endpoint)?;
    let payload = serde_json::to_string(&result.api_payload).map_err(|e| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
            "Failed to serialize payload: {}",
            e
        ))
    })?;
    dict.set_item("api_payload", payload)?;
    dict.set_item("is_destructive", result.is_destructive)?;
    dict.set_item("requires_confirmation", result.requires_confirmation())?;
    dict.set_item("warnings", result.warnings.clone())?;
    dict.set_item("suggestions", result.suggestions.clone())?;
    Ok(dict)
}

fn suggestion_dict<'py>(py: Python<'py>, cap: &CommandSuggestion) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("command", &cap.command)?;
    dict.set_item("description", &cap.description)?;
    dict.set_item("intent", cap.intent.as_str())?;
    dict.set_item("category", &cap.category)?;
    Ok(dict)
}
