//! c0 — whitespace/rule cleanup (§4.5).

use lazy_static::lazy_static;
use regex::Regex;

use crate::util::collapse_whitespace;

lazy_static! {
    static ref THEMATIC_BREAK_RE: Regex = Regex::new(r"^[-*_]{3,}$").unwrap();
}

pub fn apply(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut in_payload = false;
    for line in lines {
        if line == "<<<" {
            in_payload = true;
            out.push(line.clone());
            continue;
        }
        if line == ">>>" {
            in_payload = false;
            out.push(line.clone());
            continue;
        }
        if in_payload {
            out.push(line.clone());
            continue;
        }
        let cleaned = collapse_whitespace(line);
        if cleaned.is_empty() {
            continue;
        }
        if THEMATIC_BREAK_RE.is_match(&cleaned) {
            continue;
        }
        out.push(cleaned);
    }
    out
}
