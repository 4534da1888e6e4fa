//! c2 — token compaction (§4.5): phrase map, unit normalization, stopword
//! removal, and terminal punctuation stripping, confined to text/list/
//! attribute lines and never touching block payloads.

use std::collections::HashSet;

use regex::{Captures, Regex};

use crate::compress::{categorize, LineKind};
use crate::config::CompilerConfig;
use crate::util::ends_with_ci;

struct UnitRule {
    digit_re: Regex,
    unit: String,
    replacement: String,
}

pub fn apply(lines: Vec<String>, cfg: &CompilerConfig) -> Vec<String> {
    let mut phrase_map = cfg.phrase_map.clone();
    phrase_map.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut units = cfg.units.clone();
    units.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    let unit_rules: Vec<UnitRule> = units
        .into_iter()
        .map(|(unit, replacement)| UnitRule {
            digit_re: Regex::new(&format!(r"(?i)(\d+)\s+{}", regex::escape(&unit))).unwrap(),
            unit,
            replacement,
        })
        .collect();

    let stopwords: HashSet<String> = cfg.stopwords.iter().map(|s| s.to_lowercase()).collect();
    let protect_words: HashSet<String> = cfg.protect_words.iter().map(|s| s.to_lowercase()).collect();

    let mut out = Vec::with_capacity(lines.len());
    let mut in_payload = false;
    for line in lines {
        if line == "<<<" {
            in_payload = true;
            out.push(line);
            continue;
        }
        if line == ">>>" {
            in_payload = false;
            out.push(line);
            continue;
        }
        if in_payload {
            out.push(line);
            continue;
        }
        let kind = categorize(&line);
        match kind {
            LineKind::Text | LineKind::List | LineKind::Attribute => {
                out.push(process_line(&line, kind, &phrase_map, &unit_rules, &stopwords, &protect_words));
            }
            _ => out.push(line),
        }
    }
    out
}

fn process_line(
    line: &str,
    kind: LineKind,
    phrase_map: &[(String, String)],
    unit_rules: &[UnitRule],
    stopwords: &HashSet<String>,
    protect_words: &HashSet<String>,
) -> String {
    let (prefix, body) = match kind {
        LineKind::List => ("-", &line[1..]),
        LineKind::Attribute => (":", &line[1..]),
        _ => ("", line),
    };

    let mut body = apply_phrase_map(body, phrase_map);
    body = apply_units(&body, unit_rules);

    if matches!(kind, LineKind::Text | LineKind::List) {
        body = apply_stopwords(&body, stopwords, protect_words);
    }
    if matches!(kind, LineKind::Text | LineKind::List | LineKind::Attribute) {
        body = strip_terminal_punctuation(&body);
    }

    format!("{prefix}{body}")
}

fn apply_phrase_map(body: &str, phrase_map: &[(String, String)]) -> String {
    let mut result = body.to_string();
    for (source, replacement) in phrase_map {
        result = replace_ci(&result, source, replacement);
    }
    result
}

fn apply_units(body: &str, unit_rules: &[UnitRule]) -> String {
    let mut result = body.to_string();
    for rule in unit_rules {
        result = rule
            .digit_re
            .replace_all(&result, |caps: &Captures| format!("{}{}", &caps[1], rule.replacement))
            .to_string();
        result = replace_ci(&result, &rule.unit, &rule.replacement);
    }
    result
}

/// Case-insensitive, substring-based (not word-bounded) literal replacement,
/// matching the spec's explicit choice (§4.5, §9 Open Questions) over the
/// word-bounded alternative.
fn replace_ci(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let haystack_lower = haystack.to_lowercase();
    let needle_lower = needle.to_lowercase();
    let mut result = String::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(rel_pos) = haystack_lower[cursor..].find(&needle_lower) {
        let abs_pos = cursor + rel_pos;
        result.push_str(&haystack[cursor..abs_pos]);
        result.push_str(replacement);
        cursor = abs_pos + needle.len();
    }
    result.push_str(&haystack[cursor..]);
    result
}

fn apply_stopwords(body: &str, stopwords: &HashSet<String>, protect_words: &HashSet<String>) -> String {
    let kept: Vec<&str> = body
        .split_whitespace()
        .filter(|token| {
            let core: String = token.chars().filter(|c| c.is_alphabetic()).collect::<String>().to_lowercase();
            core.is_empty() || protect_words.contains(&core) || !stopwords.contains(&core)
        })
        .collect();
    kept.join(" ")
}

fn strip_terminal_punctuation(body: &str) -> String {
    if body.ends_with('.')
        && !body.ends_with("...")
        && !ends_with_ci(body, "e.g.")
        && !ends_with_ci(body, "i.e.")
        && !ends_with_ci(body, "etc.")
    {
        body[..body.len() - 1].to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> CompilerConfig {
        CompilerConfig::default()
    }

    #[test]
    fn phrase_map_is_case_insensitive_and_substring_based() {
        let out = apply(vec!["We did this In Order To win".into()], &cfg());
        assert_eq!(out, vec!["We did this to win"]);
    }

    #[test]
    fn unit_normalization_handles_digit_plus_unit() {
        let out = apply(vec![":rate_limit=1000 requests per minute".into()], &cfg());
        assert_eq!(out, vec![":rate_limit=1000/m"]);
    }

    #[test]
    fn stopwords_removed_but_protected_words_kept() {
        let out = apply(vec!["this is a really important note".into()], &cfg());
        assert_eq!(out, vec!["this important note"]);
        let out2 = apply(vec!["you must not skip this".into()], &cfg());
        assert_eq!(out2, vec!["you must not skip this"]);
    }

    #[test]
    fn strips_terminal_period_but_not_abbreviations() {
        let out = apply(vec!["Use OAuth2 user-facing apps.".into()], &cfg());
        assert_eq!(out, vec!["Use OAuth2 user-facing apps"]);
        let out2 = apply(vec!["See docs, e.g.".into()], &cfg());
        assert_eq!(out2, vec!["See docs, e.g."]);
    }

    #[test]
    fn block_payload_is_never_touched() {
        let lines = vec!["<<<".to_string(), "the a an really".to_string(), ">>>".to_string()];
        assert_eq!(apply(lines.clone(), &cfg()), lines);
    }
}
