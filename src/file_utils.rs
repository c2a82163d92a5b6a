use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities for catalog documents

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a document file to a string, failing with context
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("File not found: {}", path.display()));
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Write string content to a file, creating parent directories if needed
    pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    // @generates: Output path next to the input file, e.g. "App.translated.xcstrings"
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, tag: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();
        let extension = input_file.extension().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(tag);
        if !extension.is_empty() {
            output_filename.push('.');
            output_filename.push_str(&extension.to_string_lossy());
        }

        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }
}
