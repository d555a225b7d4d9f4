/// Stylesheet rewriting over files on disk
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use m3d_core::{rewrite_stylesheet, ConvertOptions, Converter};
use regex::Regex;
use walkdir::WalkDir;

pub mod report;

pub use report::ReportPrinter;

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// At least one declaration now carries `matrix3d()`
    Rewritten { converted: usize, unchanged: usize },
    /// Nothing to convert; the file was not written
    Untouched { unchanged: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

/// Rewrites matching stylesheet files in place or into an output directory
pub struct RewriteApp {
    converter: Converter,
    filter: Regex,
    out_dir: Option<PathBuf>,
    dry_run: bool,
}

impl RewriteApp {
    pub fn new(
        options: ConvertOptions,
        out_dir: Option<PathBuf>,
        dry_run: bool,
    ) -> m3d_core::Result<Self> {
        let filter = options.file_filter()?;
        Ok(Self {
            converter: Converter::new(options),
            filter,
            out_dir,
            dry_run,
        })
    }

    /// Process every matching file under `paths` (files or directories).
    ///
    /// Directories are walked without following symlinks. Entries that
    /// cannot be read are reported as failures and the walk goes on.
    pub fn run(&self, paths: &[PathBuf]) -> Vec<FileReport> {
        let mut reports = Vec::new();

        for root in paths {
            if root.is_file() {
                // Explicitly named files still have to pass the filter
                if self.matches(root) {
                    reports.push(self.process_file(root, root));
                }
                continue;
            }

            for entry in WalkDir::new(root).sort_by_file_name() {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && self.matches(entry.path()) => {
                        reports.push(self.process_file(root, entry.path()));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let path = e.path().unwrap_or(root).to_path_buf();
                        tracing::warn!(path = %path.display(), "failed to scan: {}", e);
                        reports.push(FileReport {
                            path,
                            outcome: Outcome::Failed(e.to_string()),
                        });
                    }
                }
            }
        }

        reports
    }

    fn matches(&self, path: &Path) -> bool {
        self.filter.is_match(&path.to_string_lossy())
    }

    fn process_file(&self, root: &Path, path: &Path) -> FileReport {
        let outcome = match self.rewrite_file(root, path) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to rewrite: {}", e);
                Outcome::Failed(e.to_string())
            }
        };

        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    fn rewrite_file(&self, root: &Path, path: &Path) -> io::Result<Outcome> {
        let css = fs::read_to_string(path)?;
        let rewrite = rewrite_stylesheet(&css, &self.converter);
        tracing::debug!(path = %path.display(), converted = rewrite.converted, "processed");

        if !rewrite.is_modified() {
            return Ok(Outcome::Untouched {
                unchanged: rewrite.unchanged,
            });
        }

        if !self.dry_run {
            let target = self.target_path(root, path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &rewrite.css)?;
        }

        Ok(Outcome::Rewritten {
            converted: rewrite.converted,
            unchanged: rewrite.unchanged,
        })
    }

    /// Where the rewritten file goes: in place, or mirrored under `out_dir`
    fn target_path(&self, root: &Path, path: &Path) -> PathBuf {
        let Some(out_dir) = &self.out_dir else {
            return path.to_path_buf();
        };

        let relative = if root.is_file() {
            path.file_name().map(PathBuf::from)
        } else {
            path.strip_prefix(root).ok().map(Path::to_path_buf)
        };

        out_dir.join(relative.unwrap_or_else(|| path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(out_dir: Option<PathBuf>) -> RewriteApp {
        RewriteApp::new(ConvertOptions::default(), out_dir, false).unwrap()
    }

    #[test]
    fn test_target_path_in_place() {
        let app = app(None);
        let path = Path::new("dist/a.css");
        assert_eq!(app.target_path(Path::new("dist"), path), path);
    }

    #[test]
    fn test_target_path_mirrors_directory() {
        let app = app(Some(PathBuf::from("out")));
        let target = app.target_path(Path::new("dist"), Path::new("dist/css/a.css"));
        assert_eq!(target, Path::new("out/css/a.css"));
    }

    #[test]
    fn test_filter_uses_test_pattern() {
        let app = app(None);
        assert!(app.matches(Path::new("dist/app.css")));
        assert!(!app.matches(Path::new("dist/app.js")));
    }

    #[test]
    fn test_bad_pattern_is_rejected() {
        let options = ConvertOptions {
            test: "[".to_string(),
            ..ConvertOptions::default()
        };
        assert!(RewriteApp::new(options, None, false).is_err());
    }
}
