use nova_eventgen_model::{MemoryModel, TypeRef};
use nova_eventgen_synth::ir::Stmt;
use nova_eventgen_synth::{NullPolicy, SynthesisOptions};
use nova_eventgen_test_utils::{base_model, event_interface, getter, non_null, nullable};
use pretty_assertions::assert_eq;

use super::synthesize_with;

fn model() -> (MemoryModel, TypeRef) {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.NullEvent")
            .method(getter("getLabel", TypeRef::string()).annotated(nullable()))
            .method(getter("getName", TypeRef::string()))
            .method(getter("getScore", TypeRef::int()))
            .method(getter("getId", TypeRef::string()).annotated(non_null())),
    );
    (model, iface)
}

fn guarded(policy: NullPolicy) -> Vec<String> {
    let (model, iface) = model();
    let options = SynthesisOptions {
        null_policy: policy,
        ..SynthesisOptions::default()
    };
    let imp = synthesize_with(&model, &iface, &options, &[]).expect("synthesis succeeds");
    imp.class.constructors[0]
        .body
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::RequireNonNull { property, .. } => Some(property.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn non_null_by_default_guards_everything_not_nullable() {
    assert_eq!(guarded(NullPolicy::NonNullByDefault), vec!["id", "name"]);
}

#[test]
fn null_by_default_guards_only_non_null() {
    assert_eq!(guarded(NullPolicy::NullByDefault), vec!["id"]);
}

#[test]
fn no_checks_emits_no_guards() {
    assert!(guarded(NullPolicy::NoChecks).is_empty());
}

#[test]
fn policy_names_are_kebab_case() {
    let policy: NullPolicy = serde_json::from_str("\"null-by-default\"").expect("valid policy");
    assert_eq!(policy, NullPolicy::NullByDefault);
    assert_eq!(
        serde_json::to_string(&NullPolicy::NoChecks).expect("serializable"),
        "\"no-checks\""
    );
}
