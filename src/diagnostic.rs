use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

/// Mirrors the severity scale used by `intl_validator`'s diagnostics: these
/// are all advisory in this crate (§7 of SPEC_FULL.md), never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Info,
    Warning,
    Error,
}

impl DiagnosticSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticSeverity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A key-value line's key normalized to the empty string and was
    /// downgraded to a raw paragraph-style line (§4.4, §7).
    EmptyNormalizedKey,
    /// A heading's text normalized to the empty string, producing a bare
    /// `@` scope line (§8 boundary cases).
    EmptyNormalizedScope,
    /// A table's rows had inconsistent column counts and the table was
    /// reclassified as raw, or parsing fell through to paragraphs (§7).
    InconsistentTableColumns,
    /// Scoped content appeared in the output before the first `@` line
    /// (§4.6 validation).
    ContentBeforeScope,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyNormalizedKey => "EmptyNormalizedKey",
            Self::EmptyNormalizedScope => "EmptyNormalizedScope",
            Self::InconsistentTableColumns => "InconsistentTableColumns",
            Self::ContentBeforeScope => "ContentBeforeScope",
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DiagnosticKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// 0-based index into the emitted line stream the diagnostic refers to,
    /// where applicable.
    pub line: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: DiagnosticSeverity, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            line,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} (line {})", self.severity, self.message, self.line)
    }
}
