use serde::Serialize;
use std::path::Path;

use crate::core::errors::Result;
use crate::io;

/// Pretty JSON to `output_file`, or stdout.
pub fn output_json<T: Serialize>(value: &T, output_file: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                io::ensure_dir(parent)?;
            }
            io::write_file(path, &json)
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::AnalysisReport;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_output_json_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("report.json");

        output_json(&AnalysisReport::default(), Some(&nested_path)).unwrap();

        let content = fs::read_to_string(&nested_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed["controllers"].as_object().unwrap().is_empty());
        assert!(parsed.get("_errors").is_none());
    }
}
