//! Stages 3+4 — Resolve Scopes & Emit (§4.4 of SPEC_FULL.md).

mod inline;
mod kv;
mod scope;
mod table;

use crate::config::CompilerConfig;
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
use crate::ir::IrNode;
use crate::protect::ProtectedBlock;
use crate::util::normalize_key;
use crate::util::normalize_scope_name;

use inline::{render_inline, split_sentences};
use kv::KvBuffer;
use scope::HeadingStack;
use table::emit_table;

struct Emitter<'a> {
    cfg: &'a CompilerConfig,
    blocks: &'a [ProtectedBlock],
    heading_stack: HeadingStack,
    current_scope: Option<String>,
    kv: KvBuffer,
    out: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Emitter<'a> {
    fn new(cfg: &'a CompilerConfig, blocks: &'a [ProtectedBlock]) -> Self {
        Self {
            cfg,
            blocks,
            heading_stack: HeadingStack::new(),
            current_scope: None,
            kv: KvBuffer::new(),
            out: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn flush_kv(&mut self) {
        if !self.kv.is_empty() {
            self.kv.flush(self.cfg, &mut self.out);
        }
    }

    /// Synthesize `@root` the first time any content is emitted with no
    /// preceding heading (§3 invariants, §7 tolerant behavior).
    fn ensure_scope(&mut self) {
        if self.current_scope.is_none() {
            self.out.push("@root".to_string());
            self.current_scope = Some("root".to_string());
        }
    }

    fn keep_urls(&self) -> bool {
        self.cfg.effective_keep_urls()
    }

    fn visit_heading(&mut self, level: u8, text: &str, line_no: usize) {
        self.flush_kv();
        let lowercase = self.cfg.lowercase_scopes();
        let name = normalize_scope_name(text, lowercase);
        if name.is_empty() {
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyNormalizedScope,
                DiagnosticSeverity::Info,
                "heading text normalized to an empty scope name",
                line_no,
            ));
        }
        self.heading_stack.push_heading(level, name);
        let resolved = self.heading_stack.resolved_name(self.cfg.scope_mode);
        if self.current_scope.as_deref() != Some(resolved.as_str()) {
            self.out.push(format!("@{resolved}"));
            self.current_scope = Some(resolved);
        }
    }

    fn visit_paragraph(&mut self, text: &str) {
        self.flush_kv();
        self.ensure_scope();
        let rendered = render_inline(text, self.keep_urls());
        if self.cfg.compression >= 2 && self.cfg.sentence_split {
            for sentence in split_sentences(&rendered) {
                if !sentence.is_empty() {
                    self.out.push(sentence);
                }
            }
        } else if !rendered.is_empty() {
            self.out.push(rendered);
        }
    }

    fn visit_list_item(&mut self, depth: usize, text: &str) {
        self.flush_kv();
        self.ensure_scope();
        let rendered = render_inline(text, self.keep_urls());
        if depth > 0 {
            self.out.push(format!("-{} {}", ".".repeat(depth), rendered));
        } else {
            self.out.push(format!("-{rendered}"));
        }
    }

    fn visit_kv_line(&mut self, key: &str, value: &str, line_no: usize) {
        self.ensure_scope();
        let normalized = normalize_key(key);
        if normalized.is_empty() {
            self.flush_kv();
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::EmptyNormalizedKey,
                DiagnosticSeverity::Info,
                format!("key {key:?} normalized to empty, downgraded to a raw line"),
                line_no,
            ));
            self.out.push(format!("{key}: {value}"));
        } else {
            let rendered = render_inline(value, self.keep_urls());
            self.kv.push(normalized, rendered);
        }
    }

    fn visit_table(&mut self, rows: &[Vec<String>]) {
        self.flush_kv();
        self.ensure_scope();
        emit_table(rows, self.cfg, &mut self.out, &mut self.kv);
    }

    fn visit_block_ref(&mut self, index: usize) {
        self.flush_kv();
        self.ensure_scope();
        let Some(block) = self.blocks.get(index) else {
            return;
        };
        let lang = if block.language.is_empty() { "code" } else { block.language.as_str() };
        self.out.push(format!("::{lang}"));
        self.out.push("<<<".to_string());
        if !block.payload.is_empty() {
            for line in block.payload.split('\n') {
                self.out.push(line.to_string());
            }
        }
        self.out.push(">>>".to_string());
    }

    fn finish(mut self) -> (Vec<String>, Vec<Diagnostic>) {
        self.flush_kv();
        (self.out, self.diagnostics)
    }
}

pub fn emit(ir: &[IrNode], blocks: &[ProtectedBlock], cfg: &CompilerConfig) -> (Vec<String>, Vec<Diagnostic>) {
    let mut emitter = Emitter::new(cfg, blocks);
    for (line_no, node) in ir.iter().enumerate() {
        match node {
            IrNode::Heading { level, text } => emitter.visit_heading(*level, text, line_no),
            IrNode::Paragraph { text } => emitter.visit_paragraph(text),
            IrNode::ListItem { depth, text, .. } => emitter.visit_list_item(*depth, text),
            IrNode::KVLine { key, value } => emitter.visit_kv_line(key, value, line_no),
            IrNode::Table { rows } => emitter.visit_table(rows),
            IrNode::BlockRef { index } => emitter.visit_block_ref(*index),
            IrNode::Blank => {}
        }
    }
    emitter.finish()
}
