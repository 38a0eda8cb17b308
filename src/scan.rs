//! Document collection and manifest generation.
//!
//! Stage 1 of the mdtally pipeline. Walks the content root, reads every
//! markdown file into memory, and produces the scan manifest that the
//! analyze stage consumes: a mapping from normalized relative path to raw
//! text, plus the parts configuration in force.
//!
//! ## Content Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Parts configuration (optional)
//! ├── part-1-introduction/         # Top-level directory = one part
//! │   ├── index.md
//! │   └── 01-getting-started.md
//! ├── part-2-core-tools/
//! │   └── scan/
//! │       └── usage.md             # Nesting is fine; the part is the
//! ├── appendix/                    #   first path segment either way
//! │   └── glossary.md
//! └── drafts/                      # Not configured = analyzer skips it
//! ```
//!
//! ## Path Keys
//!
//! Document keys are relative to the content root, joined with forward
//! slashes on every platform, no leading separator:
//! `part-2-core-tools/scan/usage.md`. The first segment is what the
//! analyzer matches against the configured part keys.
//!
//! Hidden files and directories (leading `.`) are skipped, which also keeps
//! the tool's own temp directory out of the walk. Only `*.md` files are
//! collected; everything is read eagerly, so analysis itself never touches
//! the filesystem.

use crate::config::{self, PartsConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// All collected documents: normalized relative path → raw text.
pub type DocumentSet = BTreeMap<String, String>;

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub documents: DocumentSet,
    pub config: PartsConfig,
}

/// Scan a content root, loading its `config.toml` (or stock defaults).
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    scan_with_config(root, config)
}

/// Scan with an already-loaded configuration (lets the caller initialize
/// the worker pool from the config before the parallel reads start).
pub fn scan_with_config(root: &Path, config: PartsConfig) -> Result<Manifest, ScanError> {
    let documents = collect_documents(root)?;
    Ok(Manifest { documents, config })
}

/// Walk the root and read every markdown file.
///
/// Directory traversal is sequential; the file reads are parallel. The
/// resulting map is keyed and therefore deterministically ordered no matter
/// which reader finished first.
pub fn collect_documents(root: &Path) -> Result<DocumentSet, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(keep_entry) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        files.push((relative_key(root, entry.path()), entry.into_path()));
    }

    let documents: Vec<(String, String)> = files
        .par_iter()
        .map(|(key, path)| fs::read_to_string(path).map(|text| (key.clone(), text)))
        .collect::<Result<_, std::io::Error>>()?;

    Ok(documents.into_iter().collect())
}

/// Skip hidden entries. The walk root itself is always kept, so scanning
/// `.` or a dot-named directory directly still works.
fn keep_entry(entry: &walkdir::DirEntry) -> bool {
    entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Relative path with forward-slash separators on every platform.
fn relative_key(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_content, write_doc};
    use tempfile::TempDir;

    #[test]
    fn collects_markdown_recursively() {
        let tmp = sample_content();
        let docs = collect_documents(tmp.path()).unwrap();

        assert!(docs.contains_key("part-1-introduction/index.md"));
        assert!(docs.contains_key("part-2-core-tools/scan/usage.md"));
    }

    #[test]
    fn keys_use_forward_slashes_and_no_leading_separator() {
        let tmp = sample_content();
        let docs = collect_documents(tmp.path()).unwrap();

        for key in docs.keys() {
            assert!(!key.starts_with('/'), "leading separator in {key}");
            assert!(!key.contains('\\'), "backslash in {key}");
        }
    }

    #[test]
    fn raw_text_is_preserved_verbatim() {
        let tmp = TempDir::new().unwrap();
        let text = "# Title\n\nSome text here.\n";
        write_doc(tmp.path(), "part-1-introduction/index.md", text);

        let docs = collect_documents(tmp.path()).unwrap();
        assert_eq!(docs["part-1-introduction/index.md"], text);
    }

    #[test]
    fn non_markdown_files_are_ignored() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "part-1-introduction/index.md", "# Hi\n");
        write_doc(tmp.path(), "part-1-introduction/diagram.svg", "<svg/>");
        write_doc(tmp.path(), "part-1-introduction/notes.txt", "notes");

        let docs = collect_documents(tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn markdown_extension_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "appendix/SHOUTING.MD", "# Loud\n");

        let docs = collect_documents(tmp.path()).unwrap();
        assert!(docs.contains_key("appendix/SHOUTING.MD"));
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "part-1-introduction/index.md", "# Hi\n");
        write_doc(tmp.path(), ".mdtally-temp/documents.md", "stale\n");
        write_doc(tmp.path(), "part-1-introduction/.hidden.md", "secret\n");

        let docs = collect_documents(tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs.contains_key("part-1-introduction/index.md"));
    }

    #[test]
    fn unconfigured_directories_are_still_collected() {
        // Scan gathers everything; skipping unknown parts is analyzer policy
        let tmp = sample_content();
        let docs = collect_documents(tmp.path()).unwrap();
        assert!(docs.contains_key("drafts/wip.md"));
    }

    #[test]
    fn empty_root_yields_empty_set() {
        let tmp = TempDir::new().unwrap();
        let docs = collect_documents(tmp.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = collect_documents(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn scan_embeds_default_config_when_no_toml() {
        let tmp = sample_content();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config, PartsConfig::default());
    }

    #[test]
    fn scan_embeds_config_from_content_root() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "guide/index.md", "# Guide\n");
        std::fs::write(
            tmp.path().join("config.toml"),
            "[[parts]]\nkey = \"guide\"\ntitle = \"The Guide\"\n",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.parts.len(), 1);
        assert_eq!(manifest.config.parts[0].key, "guide");
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = sample_content();
        let manifest = scan(tmp.path()).unwrap();

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();

        assert_eq!(back.documents, manifest.documents);
        assert_eq!(back.config, manifest.config);
    }
}
