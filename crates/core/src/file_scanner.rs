//! File scanning utilities
//!
//! Recursively discovers the export files below an input directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner with configurable filters
pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    exclude_patterns: Vec<glob::Pattern>,
    follow_links: bool,
}

impl FileScanner {
    /// Create a new file scanner rooted at the given path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            exclude_patterns: Vec::new(),
            follow_links: true,
        }
    }

    /// Filter by file extensions (e.g., "json"), compared case-insensitively
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|s| s.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Add glob patterns of paths to exclude
    ///
    /// Invalid patterns are logged and ignored.
    pub fn exclude<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.exclude_patterns = patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p.as_ref()) {
                Ok(pattern) => Some(pattern),
                Err(err) => {
                    tracing::warn!(pattern = p.as_ref(), error = %err, "Ignoring invalid exclude pattern");
                    None
                }
            })
            .collect();
        self
    }

    /// Whether symlinks are followed (default: true)
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Root directory of the scan
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan and return matching files in a stable, name-sorted order.
    ///
    /// Fails only when the root itself cannot be read. Entries below the root that
    /// cannot be read are logged and skipped.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        std::fs::read_dir(&self.root).map_err(|e| Error::directory_unreadable(&self.root, e))?;

        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %Error::from(err), "Skipping unreadable entry");
                    continue;
                }
            };

            // Everything that is not a directory is a candidate; unreadable special
            // files fail later when opened and are skipped there.
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();

            if !self.matches_extension(path) || self.should_exclude(path) {
                tracing::trace!(path = %path.display(), "Filtered out");
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches_path(path))
    }
}
