use nova_eventgen_model::TypeRef;
use nova_eventgen_synth::ir::{Expr, ParamDef, Stmt};
use nova_eventgen_synth::SynthesisOptions;
use nova_eventgen_test_utils::{diamond_model, profile_event_model, ABSTRACT_EVENT, NARROWEST, WIDE};
use pretty_assertions::assert_eq;

use super::{synthesize, synthesize_with};

#[test]
fn profile_event_constructor_follows_sorted_order() {
    let (model, iface) = profile_event_model();
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    assert_eq!(imp.class.qualified_name(), "test.event.ProfileEventImpl");
    assert_eq!(imp.class.extends, Some(TypeRef::class(ABSTRACT_EVENT)));
    assert_eq!(imp.class.implements, vec![iface.clone()]);
    assert_eq!(
        imp.constructor_params,
        vec![
            ParamDef::new("name", TypeRef::string()),
            ParamDef::new("active", TypeRef::boolean()),
        ]
    );

    let fields: Vec<(&str, bool)> = imp
        .class
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.is_final))
        .collect();
    assert_eq!(fields, vec![("name", true), ("active", false)]);

    let methods: Vec<&str> = imp.class.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["getName", "isActive", "setActive", "toString"]);
}

#[test]
fn string_form_reads_through_accessors() {
    let (model, iface) = profile_event_model();
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    let to_string = imp.class.method("toString").expect("toString");
    assert_eq!(
        to_string.body,
        vec![Stmt::Return {
            value: Expr::Concat {
                parts: vec![
                    Expr::string("ProfileEventImpl{name="),
                    Expr::This.invoke("getName", Vec::new()),
                    Expr::string(", active="),
                    Expr::This.invoke("isActive", Vec::new()),
                    Expr::string("}"),
                ],
            },
        }]
    );
}

#[test]
fn covariant_property_is_stored_wide_and_read_narrow() {
    let (model, bottom) = diamond_model();
    let imp = synthesize(&model, &bottom).expect("synthesis succeeds");

    let field = imp.class.field("value").expect("value field");
    assert_eq!(field.ty, TypeRef::class(WIDE));
    assert_eq!(
        imp.constructor_params,
        vec![ParamDef::new("value", TypeRef::class(NARROWEST))]
    );

    let accessor = imp.class.method("getValue").expect("accessor");
    assert_eq!(accessor.return_type, TypeRef::class(NARROWEST));
    assert_eq!(
        accessor.body,
        vec![Stmt::Return {
            value: Expr::field("value").narrow(TypeRef::class(NARROWEST), "getValue"),
        }]
    );
    assert!(imp.class.uses_narrowing());
}

#[test]
fn class_name_uses_the_configured_suffix() {
    let (model, iface) = profile_event_model();
    let options = SynthesisOptions {
        impl_suffix: "Generated".to_string(),
        ..SynthesisOptions::default()
    };
    let imp = synthesize_with(&model, &iface, &options, &[]).expect("synthesis succeeds");
    assert_eq!(imp.class.name, "ProfileEventGenerated");
    assert_eq!(imp.type_ref(), TypeRef::class("test.event.ProfileEventGenerated"));
}

#[test]
fn ir_serializes_with_textual_types() {
    let (model, iface) = profile_event_model();
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    let json = serde_json::to_value(&imp.class).expect("serializable");
    assert_eq!(json["extends"], "test.event.AbstractEvent");
    assert_eq!(json["fields"][0]["ty"], "java.lang.String");
    assert_eq!(json["methods"][0]["body"][0]["op"], "return");
    assert_eq!(json["methods"][0]["body"][0]["value"]["op"], "load_field");
}
