use nova_eventgen_synth::is_java_identifier;

use crate::diagnostics::{ConfigValidationError, ConfigWarning, ValidationDiagnostics};
use crate::{EventGenConfig, LoggingConfig};

impl EventGenConfig {
    /// Validate semantic invariants for a configuration.
    ///
    /// Reports every problem found rather than stopping at the first one.
    #[must_use]
    pub fn validate(&self) -> ValidationDiagnostics {
        let mut out = ValidationDiagnostics::default();

        validate_sort(self, &mut out);
        validate_synthesis(self, &mut out);
        validate_factory(self, &mut out);
        validate_logging(self, &mut out);

        out
    }
}

fn validate_sort(config: &EventGenConfig, out: &mut ValidationDiagnostics) {
    let sort = &config.sort;
    if sort.paired_prefix.is_empty() {
        out.errors.push(ConfigValidationError::invalid(
            "sort.paired_prefix",
            "must not be empty",
        ));
    }

    for (from, to) in &sort.directional {
        let toml_path = format!("sort.directional.{from}");
        if from.is_empty() || to.is_empty() {
            out.errors.push(ConfigValidationError::invalid(
                toml_path,
                "directional prefixes must not be empty",
            ));
            continue;
        }
        if from == to {
            out.errors.push(ConfigValidationError::invalid(
                toml_path,
                format!("`{from}` is paired with itself"),
            ));
            continue;
        }
        if sort.directional.contains_key(to) {
            out.errors.push(ConfigValidationError::invalid(
                toml_path.clone(),
                format!("`{to}` is used as both a `from` and a `to` prefix"),
            ));
        }
        for prefix in [from, to] {
            if *prefix == sort.paired_prefix {
                out.warnings.push(ConfigWarning::DirectionalPrefixShadowed {
                    toml_path: toml_path.clone(),
                    prefix: prefix.clone(),
                });
            }
        }
    }
}

fn validate_synthesis(config: &EventGenConfig, out: &mut ValidationDiagnostics) {
    let suffix = &config.synthesis.impl_suffix;
    // The suffix is appended to a valid simple name, so it only needs identifier characters.
    if suffix.is_empty() || !is_java_identifier(&format!("A{suffix}")) {
        out.errors.push(ConfigValidationError::invalid(
            "synthesis.impl_suffix",
            format!("`{suffix}` does not form a valid class name"),
        ));
    }
}

fn validate_factory(config: &EventGenConfig, out: &mut ValidationDiagnostics) {
    let factory = &config.factory;
    if !is_java_identifier(&factory.class_name) {
        out.errors.push(ConfigValidationError::invalid(
            "factory.class_name",
            format!("`{}` is not a valid class name", factory.class_name),
        ));
    }
    if let Some(package) = &factory.package {
        if !package.split('.').all(is_java_identifier) {
            out.errors.push(ConfigValidationError::invalid(
                "factory.package",
                format!("`{package}` is not a valid package name"),
            ));
        }
    }
}

fn validate_logging(config: &EventGenConfig, out: &mut ValidationDiagnostics) {
    let normalized = LoggingConfig::normalize_level_directives(&config.logging.level);
    if !config.logging.level.trim().is_empty()
        && tracing_subscriber::EnvFilter::try_new(normalized.clone()).is_err()
    {
        out.warnings.push(ConfigWarning::LoggingLevelInvalid {
            value: config.logging.level.clone(),
            normalized,
        });
    }
}
