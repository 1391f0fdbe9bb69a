use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use glob::MatchOptions;
use tracing::{debug, warn};

use crate::storage::FileStore;

use super::has_document_extension;

/// Whether `pattern` should be expanded as a glob rather than used as a path.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(&['*', '?', '['][..])
}

/// Turns user-supplied paths and glob patterns into the ordered list of
/// documents to process.
///
/// Matches of each glob are sorted; pattern groups keep the order they were
/// given in. A path already produced by an earlier pattern is never repeated,
/// comparing paths case-insensitively; matches of a single pattern are all
/// kept. Bad patterns are logged and skipped.
pub struct PatternResolver {
    files: Arc<dyn FileStore>,
}

impl PatternResolver {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    pub async fn resolve(&self, patterns: &[String]) -> Vec<String> {
        let mut resolved = Vec::new();
        let mut seen = HashSet::new();

        for pattern in patterns {
            let group = if is_glob_pattern(pattern) {
                expand_glob(pattern)
            } else {
                self.check_literal(pattern).await.into_iter().collect()
            };

            let fresh: Vec<String> = group
                .into_iter()
                .filter(|path| {
                    let repeated = seen.contains(&path.to_lowercase());
                    if repeated {
                        debug!(path = %path, "Skipping duplicate path");
                    }
                    !repeated
                })
                .collect();
            seen.extend(fresh.iter().map(|path| path.to_lowercase()));
            resolved.extend(fresh);
        }

        resolved
    }

    async fn check_literal(&self, pattern: &str) -> Option<String> {
        if !self.files.exists(Path::new(pattern)).await {
            warn!("Warning: File {} not found.", pattern);
            return None;
        }
        if !has_document_extension(pattern) {
            warn!("Warning: {} is not a PDF file and will be skipped.", pattern);
            return None;
        }
        Some(pattern.to_string())
    }
}

fn expand_glob(pattern: &str) -> Vec<String> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let entries = match glob::glob_with(pattern, options) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Warning: Invalid pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    let mut matches: Vec<String> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Warning: Cannot read {}: {}", e.path().display(), e.error());
                None
            }
        })
        .filter(|path| !path.is_dir())
        .map(|path| path.to_string_lossy().into_owned())
        .filter(|path| has_document_extension(path))
        .collect();

    if matches.is_empty() {
        warn!("Warning: No PDF files match pattern {}.", pattern);
    }

    matches.sort();
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    /// Store that reports a fixed set of paths as existing.
    struct KnownPaths(HashSet<String>);

    #[async_trait]
    impl FileStore for KnownPaths {
        async fn read(&self, _path: &Path) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
        async fn write(&self, _path: &Path, _data: &[u8]) -> Result<()> {
            Ok(())
        }
        async fn exists(&self, path: &Path) -> bool {
            self.0.contains(path.to_str().unwrap())
        }
        async fn ensure_dir(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn known(paths: &[&str]) -> PatternResolver {
        PatternResolver::new(Arc::new(KnownPaths(
            paths.iter().map(|p| p.to_string()).collect(),
        )))
    }

    fn local() -> PatternResolver {
        PatternResolver::new(Arc::new(crate::storage::LocalFileStore::new()))
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"%PDF-1.4").unwrap();
        path
    }

    fn glob_in(dir: &Path, tail: &str) -> String {
        format!(
            "{}/{}",
            glob::Pattern::escape(dir.to_str().unwrap()),
            tail
        )
    }

    fn strings(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("*.pdf"));
        assert!(is_glob_pattern("doc?.pdf"));
        assert!(is_glob_pattern("[ab].pdf"));
        assert!(!is_glob_pattern("docs/report.pdf"));
    }

    #[tokio::test]
    async fn test_glob_matches_sorted_within_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let f2 = touch(dir.path(), "docs/file2.pdf");
        let f1 = touch(dir.path(), "docs/file1.pdf");
        let f3 = touch(dir.path(), "docs/file3.pdf");

        let result = local().resolve(&[glob_in(dir.path(), "docs/*.pdf")]).await;

        assert_eq!(result, strings(&[f1, f2, f3]));
    }

    #[tokio::test]
    async fn test_pattern_groups_keep_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let b3 = touch(dir.path(), "b/3.pdf");
        let b1 = touch(dir.path(), "b/1.pdf");
        let az = touch(dir.path(), "a/z.pdf");
        let ax = touch(dir.path(), "a/x.pdf");

        let result = local()
            .resolve(&[glob_in(dir.path(), "b/*.pdf"), glob_in(dir.path(), "a/*.pdf")])
            .await;

        assert_eq!(result, strings(&[b1, b3, ax, az]));
    }

    #[tokio::test]
    async fn test_glob_filters_extension_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let doc3 = touch(dir.path(), "files/doc3.pdf");
        let doc1 = touch(dir.path(), "files/doc1.PDF");
        let doc2 = touch(dir.path(), "files/doc2.pDf");
        touch(dir.path(), "files/notes.txt");

        let result = local().resolve(&[glob_in(dir.path(), "files/*")]).await;

        assert_eq!(result, strings(&[doc1, doc2, doc3]));
    }

    #[tokio::test]
    async fn test_glob_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("archive.pdf")).unwrap();
        let real = touch(dir.path(), "real.pdf");

        let result = local().resolve(&[glob_in(dir.path(), "*.pdf")]).await;

        assert_eq!(result, strings(&[real]));
    }

    #[tokio::test]
    async fn test_duplicates_across_patterns_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let f2 = touch(dir.path(), "file2.pdf");
        let f1 = touch(dir.path(), "file1.pdf");
        let d3 = touch(dir.path(), "docs/file3.pdf");
        let d1 = touch(dir.path(), "docs/file1.pdf");

        let result = local()
            .resolve(&[
                glob_in(dir.path(), "*.pdf"),
                glob_in(dir.path(), "docs/*.pdf"),
                f1.to_string_lossy().into_owned(),
            ])
            .await;

        assert_eq!(result, strings(&[f1, f2, d1, d3]));
    }

    #[tokio::test]
    async fn test_literal_paths_kept_in_given_order() {
        let resolver = known(&["b.pdf", "a.pdf"]);

        let result = resolver
            .resolve(&["b.pdf".to_string(), "a.pdf".to_string()])
            .await;

        assert_eq!(result, vec!["b.pdf", "a.pdf"]);
    }

    #[tokio::test]
    async fn test_case_differing_literal_duplicate_is_dropped() {
        let resolver = known(&["Report.pdf", "report.PDF"]);

        let result = resolver
            .resolve(&["Report.pdf".to_string(), "report.PDF".to_string()])
            .await;

        assert_eq!(result, vec!["Report.pdf"]);
    }

    #[tokio::test]
    async fn test_case_distinct_files_in_one_glob_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let upper = touch(dir.path(), "A.pdf");
        let lower = touch(dir.path(), "a.pdf");

        let result = local()
            .resolve(&[
                glob_in(dir.path(), "*.pdf"),
                lower.to_string_lossy().into_owned(),
            ])
            .await;

        assert_eq!(result, strings(&[upper, lower]));
    }

    #[tokio::test]
    async fn test_glob_skips_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".hidden.pdf");
        let visible = touch(dir.path(), "v.pdf");

        let result = local().resolve(&[glob_in(dir.path(), "*.pdf")]).await;

        assert_eq!(result, strings(&[visible]));
    }

    #[tokio::test]
    async fn test_missing_and_non_pdf_literals_are_skipped() {
        let resolver = known(&["notes.txt", "kept.pdf"]);

        let result = resolver
            .resolve(&[
                "missing.pdf".to_string(),
                "notes.txt".to_string(),
                "kept.pdf".to_string(),
            ])
            .await;

        assert_eq!(result, vec!["kept.pdf"]);
    }

    #[tokio::test]
    async fn test_invalid_glob_is_skipped() {
        let resolver = known(&["kept.pdf"]);

        let result = resolver
            .resolve(&["[unclosed*.pdf".to_string(), "kept.pdf".to_string()])
            .await;

        assert_eq!(result, vec!["kept.pdf"]);
    }

    #[tokio::test]
    async fn test_empty_patterns_resolve_to_nothing() {
        assert!(local().resolve(&[]).await.is_empty());
    }
}
