//! Inline rendering (§4.4.1): strips emphasis/code-span markup and resolves
//! link/image syntax, optionally retaining the URL. Expressed as an ordered
//! chain of `regex` substitutions rather than the teacher's token-position
//! visitor (`formatter/plain_text.rs`), since the IR here carries merged
//! plain strings instead of a syntax tree.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref IMAGE_RE: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap();
    static ref BOLD_STAR_RE: Regex = Regex::new(r"\*\*([^*]+?)\*\*").unwrap();
    static ref BOLD_UNDERSCORE_RE: Regex = Regex::new(r"__([^_]+?)__").unwrap();
    static ref STRIKE_RE: Regex = Regex::new(r"~~([^~]+?)~~").unwrap();
    static ref CODE_SPAN_RE: Regex = Regex::new(r"`([^`]*)`").unwrap();
    static ref ITALIC_STAR_RE: Regex = Regex::new(r"\*([^*]+?)\*").unwrap();
}

pub fn render_inline(text: &str, keep_urls: bool) -> String {
    let mut s = IMAGE_RE
        .replace_all(text, |caps: &Captures| link_like_replacement(caps, keep_urls))
        .to_string();
    s = LINK_RE
        .replace_all(&s, |caps: &Captures| link_like_replacement(caps, keep_urls))
        .to_string();
    s = BOLD_STAR_RE.replace_all(&s, "$1").to_string();
    s = BOLD_UNDERSCORE_RE.replace_all(&s, "$1").to_string();
    s = STRIKE_RE.replace_all(&s, "$1").to_string();
    s = CODE_SPAN_RE.replace_all(&s, "$1").to_string();
    ITALIC_STAR_RE.replace_all(&s, "$1").to_string()
}

fn link_like_replacement(caps: &Captures, keep_urls: bool) -> String {
    let text = &caps[1];
    let url = &caps[2];
    if keep_urls && !url.is_empty() {
        format!("{text}<{url}>")
    } else {
        text.to_string()
    }
}

/// Split paragraph text at sentence boundaries: a run of `.`, `!`, or `?`
/// followed by whitespace and an uppercase letter (§4.4 "Sentence
/// splitting").
pub fn split_sentences(text: &str) -> Vec<String> {
    lazy_static! {
        static ref SENTENCE_BOUNDARY_RE: Regex = Regex::new(r"([.!?]+)(\s+)([A-Z])").unwrap();
    }
    let mut result = Vec::new();
    let mut last = 0;
    for caps in SENTENCE_BOUNDARY_RE.captures_iter(text) {
        let end_of_punct = caps.get(1).unwrap().end();
        result.push(text[last..end_of_punct].trim().to_string());
        last = caps.get(3).unwrap().start();
    }
    result.push(text[last..].trim().to_string());
    result
}
