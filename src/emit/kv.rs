//! Pending key-value buffer (§4.4.4): batches `:key=value` pairs emitted by
//! KV lines and table rows, flushing with optional common-prefix extraction.

use crate::config::CompilerConfig;

#[derive(Debug, Default)]
pub struct KvBuffer {
    pairs: Vec<(String, String)>,
}

impl KvBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: String, value: String) {
        self.pairs.push((key, value));
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Flush the batch to `out`, applying prefix extraction and chunking per
    /// the active compression level, then reset the buffer.
    pub fn flush(&mut self, cfg: &CompilerConfig, out: &mut Vec<String>) {
        if self.pairs.is_empty() {
            return;
        }
        let mut pairs = std::mem::take(&mut self.pairs);

        if cfg.compression == 0 {
            for (key, value) in pairs {
                out.push(format!(":{key}={value}"));
            }
            return;
        }

        if cfg.prefix_extraction && pairs.len() >= 3 {
            if let Some(prefix) = extract_prefix(&pairs, cfg) {
                out.push(format!(":_pfx={prefix}"));
                pairs = pairs
                    .into_iter()
                    .map(|(key, value)| match key.strip_prefix(prefix.as_str()) {
                        Some(rest) => (rest.to_string(), value),
                        None => (key, value),
                    })
                    .collect();
            }
        }

        let chunk_size = cfg.max_kv_per_line.max(1);
        for chunk in pairs.chunks(chunk_size) {
            let body = chunk
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(" ");
            out.push(format!(":{body}"));
        }
    }
}

/// Longest common prefix across all keys, trimmed back to the last
/// `-`/`_`/`.` separator, gated by `min_prefix_len` and `min_prefix_pct`.
///
/// Since the prefix is computed over the *entire* key set, the match ratio
/// is always 1.0 by construction; the ratio check still runs (and is kept
/// configurable) to stay robust to any future change in how keys are
/// batched. See DESIGN.md for this Open Question's resolution.
fn extract_prefix(pairs: &[(String, String)], cfg: &CompilerConfig) -> Option<String> {
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    let lcp = longest_common_prefix(&keys);
    if lcp.chars().count() < cfg.min_prefix_len {
        return None;
    }
    let separator_idx = lcp.rfind(['-', '_', '.'])?;
    let trimmed = &lcp[..separator_idx + 1];
    let matches = keys.iter().filter(|k| k.starts_with(trimmed)).count();
    let ratio = matches as f64 / keys.len() as f64;
    if ratio >= cfg.min_prefix_pct {
        Some(trimmed.to_string())
    } else {
        None
    }
}

fn longest_common_prefix(keys: &[&str]) -> String {
    let mut iter = keys.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut prefix: &str = first;
    for key in iter {
        let mut end = 0;
        let mut key_chars = key.chars();
        for ch in prefix.chars() {
            match key_chars.next() {
                Some(other) if other == ch => end += ch.len_utf8(),
                _ => break,
            }
        }
        prefix = &prefix[..end];
        if prefix.is_empty() {
            break;
        }
    }
    prefix.to_string()
}
