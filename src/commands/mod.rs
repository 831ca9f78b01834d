//! Command handlers behind the CLI.

pub mod analyze;
pub mod init;
pub mod report;

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::inputs::RawParams;

/// Read a JSON object file into raw calculator params; no file means an
/// empty mapping (every field defaults).
pub fn load_raw_params(path: Option<&Path>) -> Result<RawParams> {
    let Some(path) = path else {
        return Ok(RawParams::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading input file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing input file {}", path.display()))?;
    value
        .as_object()
        .cloned()
        .with_context(|| format!("input file {} must contain a JSON object", path.display()))
}
