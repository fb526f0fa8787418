use serde::de::DeserializeOwned;

/// Combined diagnostics produced while loading and validating an eventgen config.
///
/// Loading is best effort: callers always get an `EventGenConfig` when deserialization succeeds,
/// plus whatever was found wrong with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    /// Keys present in the input TOML that the schema does not know, as full dotted paths
    /// (`sort.paired_prefx`).
    pub unknown_keys: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
    /// The generator would reject or misbehave on this configuration.
    pub errors: Vec<ConfigValidationError>,
}

impl ConfigDiagnostics {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unknown_keys.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn extend_validation(&mut self, validation: ValidationDiagnostics) {
        self.warnings.extend(validation.warnings);
        self.errors.extend(validation.errors);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationDiagnostics {
    pub warnings: Vec<ConfigWarning>,
    pub errors: Vec<ConfigValidationError>,
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A directional prefix that is also the paired prefix; pairing claims those names first.
    DirectionalPrefixShadowed { toml_path: String, prefix: String },
    LoggingLevelInvalid { value: String, normalized: String },
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    InvalidValue { toml_path: String, message: String },
}

impl ConfigValidationError {
    pub(crate) fn invalid(toml_path: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigValidationError::InvalidValue {
            toml_path: toml_path.into(),
            message: message.into(),
        }
    }

    pub fn toml_path(&self) -> &str {
        match self {
            ConfigValidationError::InvalidValue { toml_path, .. } => toml_path,
        }
    }
}

pub(crate) fn deserialize_toml_with_unknown_keys<T: DeserializeOwned>(
    text: &str,
) -> Result<(T, Vec<String>), toml::de::Error> {
    let mut unknown = Vec::<String>::new();
    let deserializer = toml::de::Deserializer::new(text);
    let value = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(normalize_serde_ignored_path(path));
    })?;
    unknown.sort();
    unknown.dedup();
    Ok((value, unknown))
}

fn normalize_serde_ignored_path(path: serde_ignored::Path) -> String {
    // Root paths render with a leading `.`.
    let raw = path.to_string();
    raw.trim_start_matches('.').to_string()
}
