// Source discovery for the CLI host: walk a directory tree and collect the
// JavaScript and single-file-component sources worth analyzing.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;
use walkdir::WalkDir;

use crate::types::Result;

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    /// Files larger than this are skipped.
    pub max_file_size: u64,
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec![
                "**/*.js".to_string(),
                "**/*.mjs".to_string(),
                "**/*.vue".to_string(),
            ],
            exclude_patterns: vec![
                "**/node_modules/**".to_string(),
                "**/dist/**".to_string(),
                "**/.*/**".to_string(),
            ],
            max_file_size: 1024 * 1024,
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

pub struct SourceScanner {
    include: GlobSet,
    exclude: GlobSet,
    config: ScanConfig,
}

impl SourceScanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        let include = build_glob_set(&config.include_patterns)?;
        let exclude = build_glob_set(&config.exclude_patterns)?;
        Ok(Self {
            include,
            exclude,
            config,
        })
    }

    /// Discover matching files under `root` in sorted order. Patterns are
    /// matched against paths relative to the root, so an absolute prefix
    /// never triggers an exclusion. A file path as root returns that file
    /// when its name matches the include patterns.
    pub fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if root.is_file() {
            let name = root.file_name().map(Path::new).unwrap_or(root);
            return Ok(if self.matches(name) {
                vec![root.to_path_buf()]
            } else {
                Vec::new()
            });
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(%error, "skipping unreadable entry");
                    continue;
                }
            };
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if !entry.file_type().is_file() || !self.matches(relative) {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) if metadata.len() > self.config.max_file_size => {
                    warn!(path = %entry.path().display(), "skipping oversized file");
                    continue;
                }
                _ => {}
            }
            files.push(entry.into_path());
        }
        files.sort();
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "new Vue({});\n").unwrap();
    }

    #[test]
    fn discovers_js_and_vue_sources() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/main.js"));
        touch(&dir.path().join("src/components/Card.vue"));
        touch(&dir.path().join("README.md"));

        let scanner = SourceScanner::new(ScanConfig::default()).unwrap();
        let files = scanner.scan(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Card.vue", "main.js"]);
    }

    #[test]
    fn excludes_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("node_modules/vue/dist/vue.js"));
        touch(&dir.path().join("app.js"));

        let scanner = SourceScanner::new(ScanConfig::default()).unwrap();
        let files = scanner.scan(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.js"));
    }

    #[test]
    fn skips_oversized_files() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.js");
        fs::write(&big, "x".repeat(64)).unwrap();
        touch(&dir.path().join("small.js"));

        let config = ScanConfig {
            max_file_size: 32,
            ..ScanConfig::default()
        };
        let scanner = SourceScanner::new(config).unwrap();
        let files = scanner.scan(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.js"));
    }

    #[test]
    fn single_file_root_is_returned_when_matching() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("main.js");
        touch(&file);

        let scanner = SourceScanner::new(ScanConfig::default()).unwrap();
        assert_eq!(scanner.scan(&file).unwrap(), vec![file.clone()]);

        let other = dir.path().join("notes.txt");
        touch(&other);
        assert!(scanner.scan(&other).unwrap().is_empty());
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let config = ScanConfig {
            include_patterns: vec!["{broken".to_string()],
            ..ScanConfig::default()
        };
        assert!(SourceScanner::new(config).is_err());
    }
}
