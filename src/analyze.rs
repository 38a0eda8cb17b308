//! Per-part content statistics.
//!
//! Stage 2 of the mdtally pipeline. Takes the document set from the scan
//! stage and folds it into one [`ContentGroup`] per configured part, plus a
//! [`GlobalTotals`] summed over the groups.
//!
//! ## Grouping
//!
//! A document belongs to the part named by the first segment of its relative
//! path: `part-2-core-tools/scan.md` belongs to `part-2-core-tools`. The
//! configured parts form a closed set; documents whose first segment matches
//! no configured key are skipped silently. That is policy, not an error:
//! draft directories and loose root-level files stay out of the numbers
//! without any bookkeeping.
//!
//! Groups appear in the output in configuration order (the display order),
//! never in input order, and a part with no contributing documents is absent
//! from the output rather than present with zero counts.
//!
//! ## Counting rules
//!
//! Structural counts are regular-expression heuristics over the raw text,
//! not a markdown parse:
//!
//! - **lines**: `\n`-separated segments. Text without a newline is one line;
//!   a trailing newline contributes a trailing empty segment.
//! - **headings**: lines starting with one to six `#` followed by
//!   whitespace. Seven or more `#` do not match.
//! - **code blocks**: lines starting with three backticks, divided by two.
//!   Fences are assumed to come in open/close pairs; an unmatched trailing
//!   fence is dropped by the floor division.
//! - **words**: whitespace-separated tokens after replacing inline code
//!   spans and fenced blocks with a single space.
//!
//! Known limitations, accepted by design: fence pairing is not validated, so
//! nested fences or fences inside other fences misreport, and indented
//! (four-space) code blocks are counted as prose. Heading markers survive
//! the code stripping, so `#` counts as a word.

use crate::config::PartSpec;
use crate::scan::DocumentSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// ATX heading line: one to six `#` followed by whitespace, at line start.
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s").unwrap());

/// Fence delimiter line: three backticks at line start.
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^```").unwrap());

/// Inline code span: single backticks with no backtick between them.
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`]*`").unwrap());

/// Fenced code block, line breaks included, shortest match wins.
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// Counts extracted from a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocMetrics {
    pub lines: usize,
    pub headings: usize,
    pub code_blocks: usize,
    pub words: usize,
}

impl DocMetrics {
    /// Measure one document's raw text.
    pub fn of(text: &str) -> Self {
        Self {
            lines: text.split('\n').count(),
            headings: HEADING.find_iter(text).count(),
            code_blocks: FENCE.find_iter(text).count() / 2,
            words: count_words(text),
        }
    }
}

/// Words are what remains after code is blanked out.
///
/// Inline spans are stripped first, then fenced blocks. The first pass
/// already consumes well-formed fence delimiters pairwise (`` `` `` is a
/// valid empty inline span), so the second pass catches the fences the
/// first left behind, such as those whose body contains a backtick.
fn count_words(text: &str) -> usize {
    let stripped = INLINE_CODE.replace_all(text, " ");
    let stripped = FENCED_BLOCK.replace_all(&stripped, " ");
    stripped.split_whitespace().count()
}

/// Accumulated statistics for one configured part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGroup {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub files: usize,
    pub lines: usize,
    pub headings: usize,
    pub code_blocks: usize,
    pub words: usize,
}

impl ContentGroup {
    fn empty(part: &PartSpec) -> Self {
        Self {
            key: part.key.clone(),
            title: part.title.clone(),
            subtitle: part.subtitle.clone(),
            files: 0,
            lines: 0,
            headings: 0,
            code_blocks: 0,
            words: 0,
        }
    }
}

/// Sum of all group metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalTotals {
    pub files: usize,
    pub lines: usize,
    pub headings: usize,
    pub code_blocks: usize,
    pub words: usize,
}

/// Stage 2 manifest: ordered groups plus their totals.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsManifest {
    pub groups: Vec<ContentGroup>,
    pub totals: GlobalTotals,
}

impl StatsManifest {
    pub fn build(documents: &DocumentSet, parts: &[PartSpec]) -> Self {
        let groups = analyze(documents, parts);
        let totals = global_totals(&groups);
        Self { groups, totals }
    }
}

/// Fold a document set into per-part groups, in display order.
///
/// Accumulators are created lazily the first time a part receives a
/// document, so parts without documents never appear in the result. The
/// input map's iteration order does not matter: addition is commutative and
/// the result is re-ordered by the configured part order at the end.
pub fn analyze(documents: &DocumentSet, parts: &[PartSpec]) -> Vec<ContentGroup> {
    let mut grouped: BTreeMap<&str, ContentGroup> = BTreeMap::new();

    for (path, raw) in documents {
        let normalized = path.strip_prefix('/').unwrap_or(path);
        let root = match normalized.split_once('/') {
            Some((first, _)) => first,
            None => normalized,
        };
        let Some(part) = parts.iter().find(|p| p.key == root) else {
            continue;
        };

        let group = grouped
            .entry(part.key.as_str())
            .or_insert_with(|| ContentGroup::empty(part));

        let metrics = DocMetrics::of(raw);
        group.files += 1;
        group.lines += metrics.lines;
        group.headings += metrics.headings;
        group.code_blocks += metrics.code_blocks;
        group.words += metrics.words;
    }

    parts
        .iter()
        .filter_map(|part| grouped.remove(part.key.as_str()))
        .collect()
}

/// Sum the group metrics. Pure and order-independent.
pub fn global_totals(groups: &[ContentGroup]) -> GlobalTotals {
    groups.iter().fold(GlobalTotals::default(), |mut acc, group| {
        acc.files += group.files;
        acc.lines += group.lines;
        acc.headings += group.headings;
        acc.code_blocks += group.code_blocks;
        acc.words += group.words;
        acc
    })
}
