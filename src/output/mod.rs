//! Output writers: terminal, JSON, and tagged markup, to stdout or a file.

pub mod json;
pub mod terminal;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

pub use json::composite_to_json;
pub use terminal::{format_composite_terminal, format_report_terminal};

/// Write rendered content to the given file (creating parent directories)
/// or to stdout when no file was requested.
pub fn write_output(content: &str, output_file: Option<&PathBuf>) -> Result<()> {
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                ensure_dir(parent)?;
            }
            let mut file = fs::File::create(path)?;
            file.write_all(content.as_bytes())?;
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_output_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir").join("report.xml");

        let result = write_output("<report/>", Some(&nested_path));
        assert!(result.is_ok());
        assert_eq!(fs::read_to_string(&nested_path).unwrap(), "<report/>");
    }
}
