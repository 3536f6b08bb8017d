//! Command core - High-performance Rust implementation of command parsing
//!
//! This module provides pattern-based intent matching, parameter extraction,
//! and fuzzy fallback matching for PDF document commands.

pub mod types;
pub mod similarity;
pub mod pages;
mod extract;
pub mod matcher;
pub mod describe;
pub mod policy;
pub mod suggest;

pub use types::*;
pub use similarity::*;
pub use pages::*;
pub use matcher::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn command_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyCommandParser>()?;
    m.add_function(wrap_pyfunction!(py_sequence_ratio, m)?)?;
    Ok(())
}
