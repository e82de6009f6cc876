//! Template usage scanner
//!
//! Finds hyperscript embedded in templates (`_="..."` attributes, `data-hs`,
//! `{% hs %}` blocks, `text/hyperscript` script tags) and reports which
//! commands, block constructs and positional expressions it uses, so a
//! bundle can include only what a project needs.

use crate::error::{HyperfixiError, Result};
use crate::utils::patterns::ScriptPatterns;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_EXTENSIONS: &[&str] = &["html", "htm", "txt", "xml", "jinja", "jinja2"];
const DEFAULT_EXCLUDES: &[&str] = &["__pycache__", ".git", "node_modules", ".venv", "venv", "site-packages"];

/// Usage found in one file or snippet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUsage {
    pub commands: BTreeSet<String>,
    pub blocks: BTreeSet<String>,
    pub positional: bool,
}

impl FileUsage {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.blocks.is_empty() && !self.positional
    }

    pub fn merge(&mut self, other: &FileUsage) {
        self.commands.extend(other.commands.iter().cloned());
        self.blocks.extend(other.blocks.iter().cloned());
        self.positional |= other.positional;
    }
}

/// Usage merged across files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedUsage {
    #[serde(flatten)]
    pub usage: FileUsage,
    pub file_count: usize,
}

impl AggregatedUsage {
    pub fn from_files(files: &BTreeMap<PathBuf, FileUsage>) -> Self {
        let mut usage = FileUsage::default();
        for file in files.values() {
            usage.merge(file);
        }
        Self {
            usage,
            file_count: files.len(),
        }
    }
}

/// Scans template files for hyperscript usage
#[derive(Debug, Clone)]
pub struct UsageScanner {
    extensions: Vec<String>,
    excludes: Vec<String>,
}

impl Default for UsageScanner {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excludes: DEFAULT_EXCLUDES.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl UsageScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scanned extensions; a leading `.` is ignored
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Replace the exclusion substrings
    pub fn with_excludes<S: AsRef<str>>(mut self, excludes: &[S]) -> Self {
        self.excludes = excludes.iter().map(|e| e.as_ref().to_string()).collect();
        self
    }

    /// Whether `path` has a scanned extension and no excluded component
    pub fn should_scan(&self, path: &Path) -> bool {
        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => return false,
        };
        if !self.extensions.contains(&extension) {
            return false;
        }
        let text = path.to_string_lossy();
        !self.excludes.iter().any(|pattern| text.contains(pattern.as_str()))
    }

    /// Every non-empty script body in `content`
    pub fn extract_scripts(&self, content: &str) -> Vec<String> {
        ScriptPatterns::embedded()
            .iter()
            .flat_map(|re| re.captures_iter(content))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|script| !script.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Commands, blocks and positional usage in one script
    pub fn analyze_script(&self, script: &str) -> FileUsage {
        let mut usage = FileUsage::default();
        for m in ScriptPatterns::command().find_iter(script) {
            usage.commands.insert(m.as_str().to_lowercase());
        }
        for (block, re) in ScriptPatterns::blocks() {
            if re.is_match(script) {
                usage.blocks.insert(block.to_string());
            }
        }
        usage.positional = ScriptPatterns::positional().is_match(script);
        usage
    }

    pub fn scan_content(&self, content: &str) -> FileUsage {
        let mut usage = FileUsage::default();
        for script in self.extract_scripts(content) {
            usage.merge(&self.analyze_script(&script));
        }
        usage
    }

    pub fn scan_file(&self, path: &Path) -> Result<FileUsage> {
        let content = fs::read_to_string(path)?;
        let usage = self.scan_content(&content);
        if !usage.is_empty() {
            debug!(
                "Scanned {:?}: commands={:?}, blocks={:?}, positional={}",
                path, usage.commands, usage.blocks, usage.positional
            );
        }
        Ok(usage)
    }

    /// Recursively scan `dir`, keeping only files with some usage
    ///
    /// A missing directory yields no results. Unreadable files are skipped
    /// with a warning.
    pub fn scan_directory(&self, dir: &Path) -> Result<BTreeMap<PathBuf, FileUsage>> {
        let mut results = BTreeMap::new();
        if dir.exists() {
            self.scan_directory_recursive(dir, &mut results)?;
        }
        Ok(results)
    }

    pub fn scan_directories<P: AsRef<Path>>(&self, dirs: &[P]) -> Result<BTreeMap<PathBuf, FileUsage>> {
        let mut results = BTreeMap::new();
        for dir in dirs {
            results.extend(self.scan_directory(dir.as_ref())?);
        }
        Ok(results)
    }

    fn scan_directory_recursive(&self, dir: &Path, results: &mut BTreeMap<PathBuf, FileUsage>) -> Result<()> {
        let entries = fs::read_dir(dir)
            .map_err(|e| HyperfixiError::Other(format!("Failed to read directory {:?}: {}", dir, e)))?;

        for entry in entries {
            let entry =
                entry.map_err(|e| HyperfixiError::Other(format!("Failed to read directory entry: {}", e)))?;
            let path = entry.path();

            if path.is_dir() {
                if !self.excludes.iter().any(|pattern| path.to_string_lossy().contains(pattern.as_str())) {
                    self.scan_directory_recursive(&path, results)?;
                }
            } else if self.should_scan(&path) {
                match self.scan_file(&path) {
                    Ok(usage) if !usage.is_empty() => {
                        results.insert(path, usage);
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping {:?}: {}", path, e),
                }
            }
        }

        Ok(())
    }
}
