use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a resolved scope name is built from the active heading stack.
///
/// `Concat` and `Stacked` are intentionally identical today; see DESIGN.md
/// for why this implementation declines to guess at the divergence the
/// distilled spec leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    Flat,
    Concat,
    Stacked,
}

impl Default for ScopeMode {
    fn default() -> Self {
        ScopeMode::Flat
    }
}

/// An ordered phrase-to-replacement mapping. Order is insertion order as
/// configured; compression passes sort by source length descending
/// themselves rather than relying on this order directly.
pub type PhraseMap = Vec<(String, String)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub compression: u8,
    pub scope_mode: ScopeMode,
    pub keep_urls: bool,
    pub sentence_split: bool,
    pub anchor_every: usize,
    pub max_kv_per_line: usize,
    pub prefix_extraction: bool,
    pub min_prefix_len: usize,
    pub min_prefix_pct: f64,
    pub bool_compress: bool,
    pub stopwords: Vec<String>,
    pub protect_words: Vec<String>,
    pub phrase_map: PhraseMap,
    pub units: PhraseMap,
}

impl CompilerConfig {
    /// Deserialize a resolved configuration from JSON. This is the only
    /// fallible entry point this crate exposes; loading from a file or CLI
    /// flags remains the caller's responsibility (§1 of SPEC_FULL.md).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    pub(crate) fn effective_keep_urls(&self) -> bool {
        self.compression < 2 || self.keep_urls
    }

    pub(crate) fn lowercase_scopes(&self) -> bool {
        self.compression >= 2
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            compression: 2,
            scope_mode: ScopeMode::Flat,
            keep_urls: false,
            sentence_split: false,
            anchor_every: 0,
            max_kv_per_line: 4,
            prefix_extraction: true,
            min_prefix_len: 6,
            min_prefix_pct: 0.6,
            bool_compress: true,
            stopwords: default_stopwords(),
            protect_words: default_protect_words(),
            phrase_map: default_phrase_map(),
            units: default_units(),
        }
    }
}

fn default_stopwords() -> Vec<String> {
    [
        "the", "a", "an", "and", "really", "just", "that", "is", "are", "was", "were", "of", "in",
        "on", "at", "for", "with", "by", "from", "to",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_protect_words() -> Vec<String> {
    ["no", "not", "never", "must", "should", "may"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_phrase_map() -> PhraseMap {
    [
        ("in order to", "to"),
        ("as well as", "¦"),
        ("due to", "because"),
        ("is able to", "can"),
        ("is used to", ""),
        ("is responsible for", "handles"),
        ("refers to", "="),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_units() -> PhraseMap {
    [
        ("requests per minute", "/m"),
        ("milliseconds", "ms"),
        ("seconds", "s"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse compiler configuration: {0}")]
    Json(#[from] serde_json::Error),
}
