//! Heading stack and scope-name resolution (§4.4 "Scope resolution").

use crate::config::ScopeMode;

#[derive(Debug, Default)]
pub struct HeadingStack {
    entries: Vec<(u8, String)>,
}

impl HeadingStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop stack entries whose level is >= the incoming level, then push the
    /// new entry. The heading stack's levels are strictly increasing from
    /// bottom to top as an invariant of the result (§3).
    pub fn push_heading(&mut self, level: u8, name: String) {
        while let Some((top_level, _)) = self.entries.last() {
            if *top_level >= level {
                self.entries.pop();
            } else {
                break;
            }
        }
        self.entries.push((level, name));
    }

    pub fn resolved_name(&self, mode: ScopeMode) -> String {
        match mode {
            ScopeMode::Flat => self
                .entries
                .last()
                .map(|(_, name)| name.clone())
                .unwrap_or_default(),
            ScopeMode::Concat | ScopeMode::Stacked => self
                .entries
                .iter()
                .map(|(_, name)| name.as_str())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}
