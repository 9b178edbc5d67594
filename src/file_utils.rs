use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extension of translatable documents
pub const JSON_EXTENSION: &str = "json";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @checks: `.json` extension, case-insensitive
    pub fn is_json_file<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref()
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(JSON_EXTENSION))
    }

    // @generates: Output path for a translated document
    // @params: input_file, output_dir, suffix
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
    ) -> PathBuf {
        let stem = input_file
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());

        output_dir
            .as_ref()
            .join(format!("{}{}.{}", stem, suffix, JSON_EXTENSION))
    }

    /// Direct `.json` children of `dir`, sorted by file name
    pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::is_json_file(path) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Expand a selection of files and folders into the documents to translate.
    ///
    /// Folders contribute their direct `.json` children. Duplicates keep their
    /// first position. Missing paths are an error; files without a `.json`
    /// extension are skipped with a warning.
    pub fn collect_inputs<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>> {
        let mut selected: Vec<PathBuf> = Vec::new();

        for input in inputs {
            let input = input.as_ref();
            let candidates = if Self::dir_exists(input) {
                Self::find_json_files(input)?
            } else if Self::file_exists(input) {
                if !Self::is_json_file(input) {
                    warn!("Skipping non-JSON file: {}", input.display());
                    continue;
                }
                vec![input.to_path_buf()]
            } else {
                return Err(anyhow::anyhow!("Input does not exist: {:?}", input));
            };

            for candidate in candidates {
                if !selected.contains(&candidate) {
                    selected.push(candidate);
                }
            }
        }

        Ok(selected)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file, replacing any previous content
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}
