//! A deterministic Markdown-to-LLMD compiler: turns Markdown documents into
//! a compact, line-oriented textual form intended for LLM context windows
//! rather than for humans. See `SPEC_FULL.md` for the full six-stage
//! pipeline this crate implements: Normalize, Protect, Parse to IR, Resolve
//! Scopes & Emit, Compress, Post-process.
//!
//! The entire crate is a single pure function, [`compile`], over its input
//! and a [`CompilerConfig`]: no I/O, no global state, no randomness.

pub mod config;
pub mod diagnostic;

mod compress;
mod emit;
mod ir;
mod normalize;
mod postprocess;
mod protect;
mod util;

pub use config::CompilerConfig;
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};

/// Compile `source` Markdown into LLMD text under `config`, discarding any
/// advisory diagnostics. See [`compile_with_diagnostics`] to retain them.
pub fn compile(source: &str, config: &CompilerConfig) -> String {
    compile_with_diagnostics(source, config).0
}

/// Run the full pipeline and return both the compiled output and any
/// advisory diagnostics collected along the way (§7 of SPEC_FULL.md: these
/// never block compilation, only explain a tolerant fallback that fired).
pub fn compile_with_diagnostics(source: &str, config: &CompilerConfig) -> (String, Vec<Diagnostic>) {
    let _span = tracing::debug_span!("compile", len = source.len()).entered();

    let lines = {
        let _s = tracing::debug_span!("normalize").entered();
        normalize::normalize(source)
    };

    let (protected, blocks) = {
        let _s = tracing::debug_span!("protect").entered();
        protect::protect(&lines)
    };

    let (ir, mut diagnostics) = {
        let _s = tracing::debug_span!("parse_ir").entered();
        ir::parse_ir(&protected)
    };

    let (emitted, emit_diagnostics) = {
        let _s = tracing::debug_span!("emit").entered();
        emit::emit(&ir, &blocks, config)
    };
    diagnostics.extend(emit_diagnostics);

    let compressed = {
        let _s = tracing::debug_span!("compress", level = config.compression).entered();
        compress::compress(emitted, config)
    };

    let anchored = {
        let _s = tracing::debug_span!("postprocess").entered();
        diagnostics.extend(postprocess::validate(&compressed));
        postprocess::insert_anchors(compressed, config)
    };

    for diagnostic in &diagnostics {
        match diagnostic.severity {
            DiagnosticSeverity::Error => tracing::error!(%diagnostic),
            DiagnosticSeverity::Warning => tracing::warn!(%diagnostic),
            DiagnosticSeverity::Info => tracing::debug!(%diagnostic),
        }
    }

    if anchored.is_empty() {
        return (String::new(), diagnostics);
    }

    let mut output = anchored.join("\n");
    output.push('\n');
    (output, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_empty_output() {
        let (out, diags) = compile_with_diagnostics("", &CompilerConfig::default());
        assert_eq!(out, "");
        assert!(diags.is_empty());
    }

    #[test]
    fn whitespace_only_input_produces_empty_output() {
        let out = compile("   \n\n\t\n", &CompilerConfig::default());
        assert_eq!(out, "");
    }

    #[test]
    fn output_ends_with_exactly_one_newline() {
        let out = compile("# Title\n\nSome text here.", &CompilerConfig::default());
        assert!(out.ends_with('\n'));
        assert!(!out.ends_with("\n\n"));
    }

    #[test]
    fn compiles_heading_and_paragraph_into_scoped_text() {
        let cfg = CompilerConfig { compression: 0, ..Default::default() };
        let out = compile("## Authentication\n\nUse a bearer token.", &cfg);
        assert!(out.starts_with("@Authentication\n") || out.starts_with("@authentication\n"));
        assert!(out.contains("Use a bearer token."));
    }

    #[test]
    fn fenced_code_block_round_trips_through_protection() {
        let cfg = CompilerConfig::default();
        let out = compile("```rust\nfn main() {}\n```", &cfg);
        assert!(out.contains("::rust"));
        assert!(out.contains("<<<"));
        assert!(out.contains("fn main() {}"));
        assert!(out.contains(">>>"));
    }

    #[test]
    fn is_deterministic_across_repeated_runs() {
        let cfg = CompilerConfig::default();
        let source = "# Title\n\n- one\n- two\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        let first = compile(source, &cfg);
        let second = compile(source, &cfg);
        assert_eq!(first, second);
    }
}
