//! Table classification (§4.4.2) and emission (§4.4.3).

use lazy_static::lazy_static;
use rustc_hash::FxHashSet;

use crate::config::CompilerConfig;
use crate::emit::inline::render_inline;
use crate::emit::kv::KvBuffer;
use crate::util::{is_identifier_like, normalize_key};

lazy_static! {
    static ref GENERIC_HEADERS: FxHashSet<&'static str> =
        ["value", "description", "details", "info", "notes", "default", "type"]
            .into_iter()
            .collect();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Property,
    KeyedMulti,
    Raw,
}

/// All first-column data cells unique and identifier-like, per §4.4.2. A
/// violation in any row demotes the whole table to `raw`.
fn first_column_is_keyed(data: &[Vec<String>]) -> bool {
    let mut seen: FxHashSet<String> = FxHashSet::with_capacity_and_hasher(data.len(), Default::default());
    for row in data {
        let cell = row[0].trim();
        if !is_identifier_like(cell) {
            return false;
        }
        if !seen.insert(cell.to_string()) {
            return false;
        }
    }
    true
}

pub fn classify_table(rows: &[Vec<String>]) -> TableKind {
    let header = &rows[0];
    let data = &rows[1..];
    if data.is_empty() {
        return TableKind::Raw;
    }
    match header.len() {
        2 if first_column_is_keyed(data) => TableKind::Property,
        n if n >= 3 && first_column_is_keyed(data) => TableKind::KeyedMulti,
        _ => TableKind::Raw,
    }
}

fn boolean_replacement(value: &str) -> Option<&'static str> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "true" | "enabled" => Some("Y"),
        "no" | "false" | "disabled" => Some("N"),
        _ => None,
    }
}

fn column_is_boolean(data: &[Vec<String>], col: usize) -> bool {
    data.iter().all(|row| boolean_replacement(&row[col]).is_some())
}

/// Render a data cell, applying boolean-column compression (§4.4.3) ahead of
/// general inline rendering when the whole column qualifies.
fn render_cell(raw: &str, is_bool_col: bool, cfg: &CompilerConfig) -> String {
    if is_bool_col {
        if let Some(replacement) = boolean_replacement(raw) {
            return replacement.to_string();
        }
    }
    render_inline(raw, cfg.effective_keep_urls())
}

fn bool_columns(data: &[Vec<String>], ncols: usize, cfg: &CompilerConfig) -> FxHashSet<usize> {
    let mut cols = FxHashSet::default();
    if cfg.compression >= 2 && cfg.bool_compress {
        for col in 1..ncols {
            if column_is_boolean(data, col) {
                cols.insert(col);
            }
        }
    }
    cols
}

pub fn emit_table(
    rows: &[Vec<String>],
    cfg: &CompilerConfig,
    out: &mut Vec<String>,
    kv: &mut KvBuffer,
) {
    let kind = classify_table(rows);
    let header = &rows[0];
    let data = &rows[1..];
    let ncols = header.len();
    let bool_cols = bool_columns(data, ncols, cfg);

    match kind {
        TableKind::Property => {
            let second_header = header[1].trim();
            if !GENERIC_HEADERS.contains(second_header.to_lowercase().as_str()) {
                out.push(format!(":_col={}", normalize_key(second_header)));
            }
            for row in data {
                let key = normalize_key(&row[0]);
                let value = render_cell(&row[1], bool_cols.contains(&1), cfg);
                if key.is_empty() {
                    let cell0 = render_cell(&row[0], false, cfg);
                    out.push(format!("{cell0}\u{A6}{value}"));
                } else {
                    kv.push(key, value);
                }
            }
        }
        TableKind::KeyedMulti => {
            let headers_norm: Vec<String> = header.iter().map(|h| normalize_key(h)).collect();
            out.push(format!(":_cols={}", headers_norm.join("\u{A6}")));
            for row in data {
                let key = normalize_key(&row[0]);
                let rendered: Vec<String> = (1..row.len())
                    .map(|i| render_cell(&row[i], bool_cols.contains(&i), cfg))
                    .collect();
                if key.is_empty() {
                    let mut full = vec![render_cell(&row[0], false, cfg)];
                    full.extend(rendered);
                    out.push(full.join("\u{A6}"));
                } else {
                    kv.push(key, rendered.join("\u{A6}"));
                }
            }
        }
        TableKind::Raw => {
            if ncols >= 2 {
                out.push(format!(
                    ":_cols={}",
                    header.iter().map(|h| normalize_key(h)).collect::<Vec<_>>().join("\u{A6}")
                ));
            }
            for row in data {
                let rendered: Vec<String> = (0..row.len())
                    .map(|i| render_cell(&row[i], bool_cols.contains(&i), cfg))
                    .collect();
                out.push(rendered.join("\u{A6}"));
            }
        }
    }
}
