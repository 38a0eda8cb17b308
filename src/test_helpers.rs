//! Shared test utilities for the mdtally test suite.
//!
//! Provides a programmatic fixture tree matching the stock parts layout,
//! plus lookup helpers that panic with the available alternatives on a
//! miss.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::analyze::ContentGroup;

/// Write one document, creating parent directories as needed.
pub fn write_doc(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// A small content tree covering the stock parts plus an unconfigured
/// `drafts/` directory. Tests get an isolated copy they can mutate.
pub fn sample_content() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_doc(
        tmp.path(),
        "part-1-introduction/index.md",
        "# Welcome\n\nHello there.\n",
    );
    write_doc(
        tmp.path(),
        "part-1-introduction/install.md",
        "# Install\n\nRun `cargo install mdtally` to begin.\n",
    );
    write_doc(
        tmp.path(),
        "part-2-core-tools/scan/usage.md",
        "## Scanning\n\n```\nmdtally scan\n```\n",
    );
    write_doc(
        tmp.path(),
        "appendix/glossary.md",
        "# Glossary\n\nWords and more words.\n",
    );
    write_doc(tmp.path(), "drafts/wip.md", "# Draft\n");
    tmp
}

/// Find a group by part key. Panics if not found.
pub fn find_group<'a>(groups: &'a [ContentGroup], key: &str) -> &'a ContentGroup {
    groups.iter().find(|g| g.key == key).unwrap_or_else(|| {
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        panic!("group '{key}' not found. Available: {keys:?}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::config::PartsConfig;
    use crate::scan::collect_documents;

    #[test]
    fn sample_content_analyzes_under_stock_config() {
        let tmp = sample_content();
        let docs = collect_documents(tmp.path()).unwrap();
        let config = PartsConfig::default();
        let groups = analyze(&docs, &config.parts);

        let intro = find_group(&groups, "part-1-introduction");
        assert_eq!(intro.files, 2);

        let tools = find_group(&groups, "part-2-core-tools");
        assert_eq!(tools.files, 1);
        assert_eq!(tools.code_blocks, 1);

        // drafts/ has no [[parts]] entry
        assert!(!groups.iter().any(|g| g.key == "drafts"));
    }
}
