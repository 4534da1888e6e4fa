//! Stage 2 — Parse to IR (§4.3 of SPEC_FULL.md).
//!
//! A single left-to-right pass producing a flat, closed tagged variant — no
//! full AST, per §9's design note. Table and paragraph nodes are the only
//! ones that look ahead or merge multiple source lines; every other line
//! classifies independently.

use lazy_static::lazy_static;
use regex::Regex;

use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrNode {
    Heading { level: u8, text: String },
    Paragraph { text: String },
    ListItem { depth: usize, text: String, ordered: bool },
    Table { rows: Vec<Vec<String>> },
    KVLine { key: String, value: String },
    BlockRef { index: usize },
    Blank,
}

lazy_static! {
    static ref THEMATIC_BREAK_RE: Regex = Regex::new(r"^[-*_]{3,}$").unwrap();
    static ref BLOCK_REF_RE: Regex = Regex::new(r"^\u{27E6}BLOCK:(\d+)\u{27E7}$").unwrap();
    static ref HEADING_RE: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();
    static ref TABLE_DELIM_RE: Regex =
        Regex::new(r"^\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?$").unwrap();
    static ref UL_RE: Regex = Regex::new(r"^(\s*)([-*+])\s+(.+)$").unwrap();
    static ref OL_RE: Regex = Regex::new(r"^(\s*)(\d+)\.\s+(.+)$").unwrap();
    static ref KV_RE: Regex = Regex::new(r"^([A-Za-z][A-Za-z0-9 _-]{0,63})\s*:\s+(.+)$").unwrap();
}

fn is_url_like(trimmed: &str) -> bool {
    trimmed.starts_with("http://") || trimmed.starts_with("https://")
}

/// Lines (2)-(8) of §4.3's precedence list, tested against a trimmed/raw
/// pair. Used both for top-level classification and as the paragraph merge
/// stop condition, since the spec defines the latter in terms of the former.
fn matches_non_paragraph_rule(raw: &str, trimmed: &str) -> bool {
    trimmed.is_empty()
        || THEMATIC_BREAK_RE.is_match(trimmed)
        || BLOCK_REF_RE.is_match(trimmed)
        || HEADING_RE.is_match(trimmed)
        || trimmed.contains('|')
        || UL_RE.is_match(raw)
        || OL_RE.is_match(raw)
        || (!is_url_like(trimmed) && KV_RE.is_match(trimmed))
}

pub fn parse_ir(lines: &[String]) -> (Vec<IrNode>, Vec<Diagnostic>) {
    let mut out = Vec::new();
    let mut diagnostics = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let raw = &lines[i];
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            out.push(IrNode::Blank);
            i += 1;
            continue;
        }
        if THEMATIC_BREAK_RE.is_match(trimmed) {
            i += 1;
            continue;
        }
        if let Some(caps) = BLOCK_REF_RE.captures(trimmed) {
            let index: usize = caps[1].parse().unwrap_or(0);
            out.push(IrNode::BlockRef { index });
            i += 1;
            continue;
        }
        if let Some(caps) = HEADING_RE.captures(trimmed) {
            let level = caps[1].len() as u8;
            out.push(IrNode::Heading {
                level,
                text: caps[2].trim().to_string(),
            });
            i += 1;
            continue;
        }
        if trimmed.contains('|') && i + 1 < lines.len() && TABLE_DELIM_RE.is_match(lines[i + 1].trim()) {
            match try_parse_table(lines, i) {
                Some((node, consumed)) => {
                    out.push(node);
                    i += consumed;
                    continue;
                }
                None => {
                    // Column counts diverged: abort and fall through to paragraph (§7).
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::InconsistentTableColumns,
                        DiagnosticSeverity::Info,
                        "table rows had inconsistent column counts; falling back to paragraph parsing",
                        i,
                    ));
                }
            }
        }
        if let Some(caps) = UL_RE.captures(raw) {
            let depth = caps[1].len() / 2;
            out.push(IrNode::ListItem {
                depth,
                text: caps[3].trim().to_string(),
                ordered: false,
            });
            i += 1;
            continue;
        }
        if let Some(caps) = OL_RE.captures(raw) {
            let depth = caps[1].len() / 2;
            out.push(IrNode::ListItem {
                depth,
                text: caps[3].trim().to_string(),
                ordered: true,
            });
            i += 1;
            continue;
        }
        if !is_url_like(trimmed) {
            if let Some(caps) = KV_RE.captures(trimmed) {
                out.push(IrNode::KVLine {
                    key: caps[1].trim().to_string(),
                    value: caps[2].trim().to_string(),
                });
                i += 1;
                continue;
            }
        }

        let (text, consumed) = collect_paragraph(lines, i);
        out.push(IrNode::Paragraph { text });
        i += consumed;
    }
    (out, diagnostics)
}

fn collect_paragraph(lines: &[String], start: usize) -> (String, usize) {
    let mut collected = vec![lines[start].trim().to_string()];
    let mut i = start + 1;
    while i < lines.len() {
        let raw = &lines[i];
        let trimmed = raw.trim();
        if matches_non_paragraph_rule(raw, trimmed) {
            break;
        }
        collected.push(trimmed.to_string());
        i += 1;
    }
    (collected.join(" "), i - start)
}

fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let mut parts: Vec<&str> = trimmed.split('|').collect();
    if parts.first().map(|s| s.trim().is_empty()).unwrap_or(false) {
        parts.remove(0);
    }
    if parts.last().map(|s| s.trim().is_empty()).unwrap_or(false) {
        parts.pop();
    }
    parts.iter().map(|s| s.trim().to_string()).collect()
}

/// Consume a header row, skip the delimiter row, then consume consecutive
/// data rows. Returns `None` (and consumes nothing) if column counts diverge
/// anywhere, per §4.3 rule 5's "abort and fall through to paragraph".
fn try_parse_table(lines: &[String], start: usize) -> Option<(IrNode, usize)> {
    let header = split_row(&lines[start]);
    let ncols = header.len();
    if ncols == 0 {
        return None;
    }
    let mut rows = vec![header];
    let mut i = start + 2;
    while i < lines.len() {
        let trimmed = lines[i].trim();
        if trimmed.is_empty() || !trimmed.contains('|') {
            break;
        }
        let row = split_row(&lines[i]);
        if row.len() != ncols {
            return None;
        }
        rows.push(row);
        i += 1;
    }
    Some((IrNode::Table { rows }, i - start))
}
