//! Small text helpers shared across pipeline stages, grounded on the style of
//! `crates/intl_markdown/src/formatter/util.rs` in the teacher workspace:
//! free functions over owned `String`s rather than a shared mutable context.

/// Normalize a key for KV lines and table first-cells (§4.4): trim, lowercase,
/// collapse whitespace runs to a single `_`, drop characters outside
/// `[a-z0-9_-]`, then trim leading/trailing hyphens.
pub fn normalize_key(text: &str) -> String {
    let trimmed = text.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut last_was_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push('_');
                last_was_space = true;
            }
            continue;
        }
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() || lower == '_' || lower == '-' {
            out.push(lower);
            last_was_space = false;
        }
    }
    out.trim_matches('-').to_string()
}

/// Normalize heading text into a scope name (§4.4): trim, collapse
/// whitespace runs to `_`, drop characters outside `[A-Za-z0-9_-]`, and
/// lowercase only when `lowercase` is set (compression >= 2).
pub fn normalize_scope_name(text: &str, lowercase: bool) -> String {
    let trimmed = text.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut last_was_space = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push('_');
                last_was_space = true;
            }
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
            last_was_space = false;
        }
    }
    if lowercase {
        out.to_lowercase()
    } else {
        out
    }
}

/// Collapse runs of spaces/tabs into a single space and trim the ends.
/// Used by the c0 whitespace/rule cleanup pass.
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for ch in s.chars() {
        if ch == ' ' || ch == '\t' {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}

/// True if `cell` "starts with a letter, `.`, or `-`" and whitespace-splits
/// into at most 4 words (§4.4.2 table classification).
pub fn is_identifier_like(cell: &str) -> bool {
    let trimmed = cell.trim();
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '.' || first == '-') {
        return false;
    }
    trimmed.split_whitespace().count() <= 4
}

/// Case-insensitive suffix check without allocating.
pub fn ends_with_ci(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len() && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
