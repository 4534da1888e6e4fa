//! Stage 6 — Post-process (§4.6 of SPEC_FULL.md): validation diagnostics over
//! the emitted/compressed line stream, plus periodic scope anchor
//! reinsertion for long documents.

use crate::compress::{categorize, LineKind};
use crate::config::CompilerConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};

/// Flag any non-metadata content line appearing before the first `@` scope.
/// The emit stage always synthesizes `@root` before emitting content, so this
/// should never fire in practice; it exists as a defense against future emit
/// changes that might bypass `ensure_scope`.
pub fn validate(lines: &[String]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen_scope = false;
    let mut in_payload = false;
    for (line_no, line) in lines.iter().enumerate() {
        if line == "<<<" {
            in_payload = true;
            continue;
        }
        if line == ">>>" {
            in_payload = false;
            continue;
        }
        if in_payload {
            continue;
        }
        let kind = categorize(line);
        if kind == LineKind::Scope {
            seen_scope = true;
            continue;
        }
        if !seen_scope && kind != LineKind::Metadata && kind != LineKind::BlockMarker {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::ContentBeforeScope,
                DiagnosticSeverity::Warning,
                "content emitted before any scope line",
                line_no,
            ));
        }
    }
    diagnostics
}

/// Reinsert the active scope's `@` line every `anchor_every` content lines, so
/// a reader skimming a long document mid-stream can recover which scope is
/// active without scrolling back. A no-op when `anchor_every == 0`.
pub fn insert_anchors(lines: Vec<String>, cfg: &CompilerConfig) -> Vec<String> {
    if cfg.anchor_every == 0 {
        return lines;
    }
    let mut out = Vec::with_capacity(lines.len());
    let mut current_scope: Option<String> = None;
    let mut since_anchor = 0usize;
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
        if let Some(scope) = line.strip_prefix('@') {
            current_scope = Some(scope.to_string());
            since_anchor = 0;
            out.push(line);
            continue;
        }
        if since_anchor >= cfg.anchor_every {
            if let Some(scope) = &current_scope {
                out.push(format!("@{scope}"));
            }
            since_anchor = 0;
        }
        since_anchor += 1;
        out.push(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_diagnostics_when_root_scope_precedes_content() {
        let lines: Vec<String> = vec!["@root".into(), "hello".into()];
        assert!(validate(&lines).is_empty());
    }

    #[test]
    fn flags_content_before_any_scope() {
        let lines: Vec<String> = vec!["hello".into(), "@root".into()];
        let diags = validate(&lines);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::ContentBeforeScope);
    }

    #[test]
    fn anchor_every_zero_is_noop() {
        let lines: Vec<String> = vec!["@a".into(), "x".into(), "y".into(), "z".into()];
        let cfg = CompilerConfig { anchor_every: 0, ..Default::default() };
        assert_eq!(insert_anchors(lines.clone(), &cfg), lines);
    }

    #[test]
    fn reinserts_scope_anchor_periodically() {
        let lines: Vec<String> = vec!["@a".into(), "x".into(), "y".into(), "z".into()];
        let cfg = CompilerConfig { anchor_every: 2, ..Default::default() };
        let out = insert_anchors(lines, &cfg);
        assert_eq!(out, vec!["@a", "x", "y", "@a", "z"]);
    }

    #[test]
    fn does_not_anchor_inside_block_payload() {
        let lines: Vec<String> = vec![
            "@a".into(),
            "::json".into(),
            "<<<".into(),
            "one".into(),
            "two".into(),
            "three".into(),
            ">>>".into(),
        ];
        let cfg = CompilerConfig { anchor_every: 1, ..Default::default() };
        let out = insert_anchors(lines.clone(), &cfg);
        assert_eq!(out, lines);
    }
}
