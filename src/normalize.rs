//! Stage 0 — Normalize (§4.1 of SPEC_FULL.md).
//!
//! The public API accepts an already-decoded `&str`, so the "replace invalid
//! UTF-8 with U+FFFD" half of this stage is handled by the caller's decoding
//! step before the string ever reaches this crate (§12). What remains here
//! is NFKC normalization, line-ending unification, and per-line trailing
//! whitespace trimming.

use unicode_normalization::UnicodeNormalization;

pub fn normalize(source: &str) -> Vec<String> {
    let nfkc: String = source.nfkc().collect();
    let unified = if memchr::memchr(b'\r', nfkc.as_bytes()).is_some() {
        nfkc.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        nfkc
    };
    unified
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_crlf_and_lone_cr() {
        let lines = normalize("a\r\nb\rc\n");
        assert_eq!(lines, vec!["a", "b", "c", ""]);
    }

    #[test]
    fn trims_trailing_whitespace_only() {
        let lines = normalize("  hello  \t\n\tworld");
        assert_eq!(lines, vec!["  hello", "\tworld"]);
    }

    #[test]
    fn nfkc_folds_compatibility_characters() {
        // U+FF21 FULLWIDTH LATIN CAPITAL LETTER A -> A
        let lines = normalize("\u{FF21}BC");
        assert_eq!(lines, vec!["ABC"]);
    }
}
