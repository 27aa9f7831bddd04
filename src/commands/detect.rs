use anyhow::Result;
use std::path::Path;

use crate::core::generation::Generation;
use crate::detection::detect_generation;

/// Print the detected generation. Fails for unrecognised projects so the
/// exit status is usable in scripts.
pub fn detect_project(path: &Path) -> Result<Generation> {
    if !path.is_dir() {
        anyhow::bail!("Project directory not found: {}", path.display());
    }
    let generation = detect_generation(path);
    println!("{} ({})", generation.label(), generation.as_str());
    if !generation.is_known() {
        anyhow::bail!("Unsupported CodeIgniter version: {}", path.display());
    }
    Ok(generation)
}
