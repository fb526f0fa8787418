use insta::assert_snapshot;
use nova_eventgen::config::EventGenConfig;
use nova_eventgen::synth::JavaSourceBackend;
use nova_eventgen::EventGenerator;
use nova_eventgen_test_utils::profile_event_model;
use pretty_assertions::assert_eq;

use super::{class_names, generator};

#[test]
fn generates_implementation_and_factory() {
    let (model, iface) = profile_event_model();
    let output = generator().generate(&model, &[iface]);

    assert!(!output.has_errors());
    assert_eq!(class_names(&output), vec!["test.event.ProfileEventImpl"]);
    assert!(output
        .factory
        .class
        .method("createProfileEvent")
        .is_some());

    let files = output.render(&JavaSourceBackend::default());
    let paths: Vec<&str> = files.iter().map(|file| file.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["test/event/ProfileEventImpl.java", "EventFactory.java"]
    );
}

#[test]
fn read_only_properties_are_reported_as_info() {
    let (model, iface) = profile_event_model();
    let output = generator().generate(&model, &[iface]);

    let json = serde_json::to_string_pretty(&output.diagnostics).expect("diagnostics serialize");
    assert_snapshot!(json, @r###"
[
  {
    "severity": "info",
    "code": "unpaired-accessor",
    "message": "`name` has no mutator; it is read-only",
    "interface": "test.event.ProfileEvent",
    "property": "name"
  }
]
"###);
}

#[test]
fn configuration_names_the_generated_classes() {
    let text = r#"
[synthesis]
impl_suffix = "Generated"

[factory]
package = "test.generated"
class_name = "Events"
"#;
    let (config, diagnostics) =
        EventGenConfig::load_from_str_with_diagnostics(text).expect("config should parse");
    assert!(diagnostics.is_empty());

    let (model, iface) = profile_event_model();
    let output = EventGenerator::new(config).generate(&model, &[iface]);

    assert_eq!(class_names(&output), vec!["test.event.ProfileEventGenerated"]);
    let files = output.render(&JavaSourceBackend::default());
    assert_eq!(files[1].path, "test/generated/Events.java");
    assert!(files[1]
        .text
        .contains("return new test.event.ProfileEventGenerated(name, active);"));
}

#[test]
fn no_interfaces_still_yields_an_empty_factory() {
    let (model, _iface) = profile_event_model();
    let output = generator().generate(&model, &[]);

    assert!(output.classes.is_empty());
    assert!(output.diagnostics.is_empty());
    assert!(output.factory.class.methods.is_empty());
    assert_eq!(output.render(&JavaSourceBackend::default()).len(), 1);
}
