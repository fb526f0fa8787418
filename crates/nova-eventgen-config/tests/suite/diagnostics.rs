use nova_eventgen_config::{ConfigValidationError, ConfigWarning, EventGenConfig};
use nova_eventgen_sort::SortPolicy;
use nova_eventgen_synth::NullPolicy;
use pretty_assertions::assert_eq;

fn invalid(toml_path: &str, message: &str) -> ConfigValidationError {
    ConfigValidationError::InvalidValue {
        toml_path: toml_path.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn empty_document_uses_defaults() {
    let (config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics("").expect("config should parse");

    assert_eq!(config, EventGenConfig::default());
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(config.sort_policy(), SortPolicy::default());
    assert_eq!(config.synthesis.null_policy, NullPolicy::NonNullByDefault);
    assert_eq!(config.synthesis.impl_suffix, "Impl");
    assert_eq!(config.factory.class_name, "EventFactory");
    assert!(!config.parallel);
}

#[test]
fn reports_unknown_keys_with_full_paths() {
    let text = r#"
paralel = true

[sort]
paired_prefx = "previous"

[synthesis]
null_polcy = "no-checks"
"#;

    let (config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.unknown_keys,
        vec!["paralel", "sort.paired_prefx", "synthesis.null_polcy"]
    );
    assert!(diagnostics.is_ok());
    assert_eq!(config.sort.paired_prefix, "original");
}

#[test]
fn reports_every_malformed_sort_prefix() {
    let text = r#"
[sort]
paired_prefix = ""

[sort.directional]
from = "to"
to = "back"
same = "same"
"#;

    let (_config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.errors,
        vec![
            invalid("sort.paired_prefix", "must not be empty"),
            invalid(
                "sort.directional.from",
                "`to` is used as both a `from` and a `to` prefix"
            ),
            invalid("sort.directional.same", "`same` is paired with itself"),
        ]
    );
    assert!(!diagnostics.is_ok());
}

#[test]
fn empty_directional_prefix_is_an_error() {
    let text = r#"
[sort.directional]
from = ""
"#;

    let (_config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.errors,
        vec![invalid(
            "sort.directional.from",
            "directional prefixes must not be empty"
        )]
    );
}

#[test]
fn directional_prefix_equal_to_paired_prefix_warns() {
    let text = r#"
[sort]
paired_prefix = "old"

[sort.directional]
old = "new"
"#;

    let (_config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert!(diagnostics.is_ok());
    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::DirectionalPrefixShadowed {
            toml_path: "sort.directional.old".to_string(),
            prefix: "old".to_string(),
        }]
    );
}

#[test]
fn rejects_names_that_are_not_java_identifiers() {
    let text = r#"
[synthesis]
impl_suffix = "-impl"

[factory]
package = "com.example.class"
class_name = "2Factory"
"#;

    let (_config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    let paths: Vec<&str> = diagnostics.errors.iter().map(|e| e.toml_path()).collect();
    assert_eq!(
        paths,
        vec!["synthesis.impl_suffix", "factory.class_name", "factory.package"]
    );
}

#[test]
fn invalid_logging_level_warns() {
    let text = r#"
[logging]
level = "nova=verbose"
"#;

    let (_config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");

    assert_eq!(
        diagnostics.warnings,
        vec![ConfigWarning::LoggingLevelInvalid {
            value: "nova=verbose".to_string(),
            normalized: "nova=verbose".to_string(),
        }]
    );
}

#[test]
fn unknown_null_policy_is_a_parse_error() {
    let text = r#"
[synthesis]
null_policy = "sometimes"
"#;

    let err = EventGenConfig::load_from_str_with_diagnostics(text).expect_err("should fail");
    let message = err.to_string();
    assert!(message.starts_with("failed to parse toml config:"), "{message}");
    assert!(message.contains("sometimes"), "{message}");
}
