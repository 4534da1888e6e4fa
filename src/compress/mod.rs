//! Stage 5 — Compress (§4.5 of SPEC_FULL.md). Cumulative passes c0/c1/c2
//! applied up to the configured compression level.

mod pass0;
mod pass2;

use crate::config::CompilerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Scope,
    BlockMarker,
    Attribute,
    List,
    Relation,
    Metadata,
    Text,
}

pub(crate) fn categorize(line: &str) -> LineKind {
    if line.starts_with('@') {
        LineKind::Scope
    } else if line.starts_with("::") || line == "<<<" || line == ">>>" {
        LineKind::BlockMarker
    } else if line.starts_with(':') {
        LineKind::Attribute
    } else if line.starts_with('-') {
        LineKind::List
    } else if line.starts_with('\u{2192}') || line.starts_with('\u{2190}') || line.starts_with('=') {
        LineKind::Relation
    } else if line.starts_with('~') {
        LineKind::Metadata
    } else {
        LineKind::Text
    }
}

pub fn compress(lines: Vec<String>, cfg: &CompilerConfig) -> Vec<String> {
    let level = cfg.compression.min(2);
    let mut lines = pass0::apply(&lines);
    if level >= 1 {
        // c1's structural compaction is already enforced by Emit's KV
        // batching discipline; this pass reapplies c0's cleanup per §4.5.
        lines = pass0::apply(&lines);
    }
    if level >= 2 {
        lines = pass2::apply(lines, cfg);
    }
    lines
}
