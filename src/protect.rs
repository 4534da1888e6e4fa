//! Stage 1 — Protect (§4.2 of SPEC_FULL.md).
//!
//! Replaces fenced code regions with numbered placeholders, tolerant of an
//! unterminated trailing fence. The accumulate-until-closer loop mirrors the
//! state machine `block_parser.rs` uses to scan lines in the teacher crate,
//! though fence detection here is expressed with `regex` (already part of
//! the teacher's dependency stack) rather than manual byte scanning, since
//! the source spec gives the fence-opener as a literal regex.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FENCE_OPEN_RE: Regex = Regex::new(r"^(`{3,})(\w*)\s*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBlock {
    pub index: usize,
    pub language: String,
    pub payload: String,
}

pub fn protect(lines: &[String]) -> (Vec<String>, Vec<ProtectedBlock>) {
    let mut out_lines = Vec::with_capacity(lines.len());
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if let Some(caps) = FENCE_OPEN_RE.captures(line) {
            let marker = caps[1].to_string();
            let language = caps[2].to_string();
            let mut payload_lines = Vec::new();
            let mut j = i + 1;
            let mut closed = false;
            while j < lines.len() {
                if lines[j].trim() == marker {
                    closed = true;
                    break;
                }
                payload_lines.push(lines[j].clone());
                j += 1;
            }
            let index = blocks.len();
            out_lines.push(format!("\u{27E6}BLOCK:{index}\u{27E7}"));
            blocks.push(ProtectedBlock {
                index,
                language,
                payload: payload_lines.join("\n"),
            });
            // Unterminated fence: tolerate it, the accumulated payload up to
            // end of input is still preserved (§4.2).
            i = if closed { j + 1 } else { j };
        } else {
            out_lines.push(line.clone());
            i += 1;
        }
    }
    (out_lines, blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(s: &str) -> Vec<String> {
        s.lines().map(|l| l.to_string()).collect()
    }

    #[test]
    fn protects_a_simple_fence() {
        let (out, blocks) = protect(&lines_of("before\n```json\n{\"a\":1}\n```\nafter"));
        assert_eq!(out, vec!["before", "\u{27E6}BLOCK:0\u{27E7}", "after"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "json");
        assert_eq!(blocks[0].payload, "{\"a\":1}");
    }

    #[test]
    fn tolerates_unterminated_fence() {
        let (out, blocks) = protect(&lines_of("```\nline one\nline two"));
        assert_eq!(out, vec!["\u{27E6}BLOCK:0\u{27E7}"]);
        assert_eq!(blocks[0].payload, "line one\nline two");
    }

    #[test]
    fn assigns_dense_sequential_indices() {
        let (out, blocks) = protect(&lines_of("```\na\n```\ntext\n```rs\nb\n```"));
        assert_eq!(out, vec!["\u{27E6}BLOCK:0\u{27E7}", "text", "\u{27E6}BLOCK:1\u{27E7}"]);
        assert_eq!(blocks[1].language, "rs");
    }
}
