use std::collections::BTreeMap;

use nova_eventgen_model::Diagnostic;
use thiserror::Error;

pub const DEFAULT_PAIRED_PREFIX: &str = "original";

/// Naming conventions that group properties during sorting.
///
/// `paired_prefix` marks a before/after pair (`originalDamage` next to `damage`);
/// `directional` maps a "from" prefix to its "to" counterpart (`fromWorld` next to `toWorld`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortPolicy {
    pub paired_prefix: String,
    pub directional: BTreeMap<String, String>,
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            paired_prefix: DEFAULT_PAIRED_PREFIX.to_string(),
            directional: BTreeMap::from([("from".to_string(), "to".to_string())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortPolicyError {
    #[error("paired prefix must not be empty")]
    EmptyPairedPrefix,
    #[error("directional prefixes must not be empty (`{from}` -> `{to}`)")]
    EmptyDirectionalPrefix { from: String, to: String },
    #[error("directional prefix `{0}` is paired with itself")]
    SelfPaired(String),
    #[error("prefix `{0}` is used as both a `from` and a `to` prefix")]
    AmbiguousPrefix(String),
}

impl SortPolicyError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error("malformed-sort-policy", self.to_string())
    }
}

impl SortPolicy {
    pub fn new(paired_prefix: impl Into<String>) -> Self {
        Self {
            paired_prefix: paired_prefix.into(),
            directional: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_directional(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.directional.insert(from.into(), to.into());
        self
    }

    pub fn validate(&self) -> Result<(), SortPolicyError> {
        if self.paired_prefix.is_empty() {
            return Err(SortPolicyError::EmptyPairedPrefix);
        }
        for (from, to) in &self.directional {
            if from.is_empty() || to.is_empty() {
                return Err(SortPolicyError::EmptyDirectionalPrefix {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            if from == to {
                return Err(SortPolicyError::SelfPaired(from.clone()));
            }
            if self.directional.contains_key(to) {
                return Err(SortPolicyError::AmbiguousPrefix(to.clone()));
            }
        }
        Ok(())
    }
}
