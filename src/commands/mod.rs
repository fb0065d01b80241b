pub mod config;
pub mod info;
pub mod split;

use std::path::Path;

use anyhow::{Context, Result};

/// Read an input calendar file as UTF-8 text.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
