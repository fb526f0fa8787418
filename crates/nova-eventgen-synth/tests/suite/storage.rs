use nova_eventgen_model::{FieldDecl, MethodDecl, TypeDecl, TypeRef};
use nova_eventgen_synth::ir::{Expr, Stmt};
use nova_eventgen_synth::{JavaSourceBackend, SynthesisError};
use nova_eventgen_test_utils::{
    base_model, event_interface, getter, nullable, property_settings, setter, use_field,
    ABSTRACT_EVENT,
};
use pretty_assertions::assert_eq;

use super::synthesize;

#[test]
fn optional_property_wraps_on_write() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.ChatEvent")
            .method(getter("getMessage", TypeRef::optional(TypeRef::string())))
            .method(setter("setMessage", TypeRef::string())),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    let field = imp.class.field("message").expect("message field");
    assert!(field
        .ty
        .same_instantiation(&TypeRef::optional(TypeRef::string())));
    assert!(!field.is_final);

    let mutator = imp.class.method("setMessage").expect("mutator");
    assert_eq!(mutator.params[0].ty, TypeRef::string());
    assert_eq!(
        mutator.body,
        vec![Stmt::StoreField {
            field: "message".to_string(),
            value: Expr::param("message").wrap_optional(),
        }]
    );

    let accessor = imp.class.method("getMessage").expect("accessor");
    assert_eq!(
        accessor.body,
        vec![Stmt::Return {
            value: Expr::field("message"),
        }]
    );
}

#[test]
fn optional_over_a_nullable_inherited_field_is_rebuilt_on_read() {
    let mut model = base_model();
    model.add_type(
        TypeDecl::class(ABSTRACT_EVENT)
            .field(FieldDecl::new("reason", TypeRef::string()).annotated(use_field(false))),
    );
    let iface = model.add_type(
        event_interface("test.event.KickEvent")
            .method(getter("getReason", TypeRef::optional(TypeRef::string()))),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    assert!(imp.class.fields.is_empty());
    let accessor = imp.class.method("getReason").expect("accessor");
    assert_eq!(
        accessor.body,
        vec![Stmt::Return {
            value: Expr::field("reason").wrap_optional(),
        }]
    );
    let ctor = &imp.class.constructors[0];
    assert_eq!(
        ctor.body[1],
        Stmt::StoreField {
            field: "reason".to_string(),
            value: Expr::param("reason").invoke("orElse", vec![Expr::null()]),
        }
    );
}

#[test]
fn optional_inherited_field_gets_its_default_on_construction() {
    let mut model = base_model();
    model.add_type(
        TypeDecl::class(ABSTRACT_EVENT).field(
            FieldDecl::new("reason", TypeRef::optional(TypeRef::string()))
                .annotated(use_field(false)),
        ),
    );
    let iface = model.add_type(
        event_interface("test.event.KickEvent").method(
            getter("getReason", TypeRef::optional(TypeRef::string()))
                .annotated(property_settings(false, true)),
        ),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    assert!(imp.class.fields.is_empty());
    let ctor = &imp.class.constructors[0];
    assert!(ctor.params.is_empty());
    assert_eq!(
        ctor.body,
        vec![Stmt::StoreField {
            field: "reason".to_string(),
            value: Expr::EmptyOptional,
        }]
    );

    let text = JavaSourceBackend::default().render(&imp.class);
    assert!(text.contains("this.reason = java.util.Optional.empty();"));
}

#[test]
fn optional_properties_get_defaults() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.DefaultsEvent")
            .method(
                getter("getTag", TypeRef::optional(TypeRef::string()))
                    .annotated(property_settings(false, true)),
            )
            .method(getter("getCount", TypeRef::int()).annotated(property_settings(false, true)))
            .method(
                getter("getNote", TypeRef::string())
                    .annotated(property_settings(false, true))
                    .annotated(nullable()),
            )
            .method(getter("getName", TypeRef::string())),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    let names: Vec<&str> = imp.constructor_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["name"]);

    let tag = imp.class.field("tag").expect("tag field");
    assert_eq!(tag.initializer, Some(Expr::EmptyOptional));
    assert!(tag.is_final);
    let count = imp.class.field("count").expect("count field");
    assert_eq!(
        count.initializer,
        Some(Expr::zero(nova_eventgen_model::PrimitiveType::Int))
    );
    let note = imp.class.field("note").expect("note field");
    assert_eq!(note.initializer, None);
    assert!(!note.is_final);
}

#[test]
fn optional_reference_without_default_is_rejected() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.BadDefaultEvent")
            .method(getter("getNote", TypeRef::string()).annotated(property_settings(false, true))),
    );
    let err = synthesize(&model, &iface).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::NoDefault {
            property: "note".to_string(),
            ty: "java.lang.String".to_string(),
        }
    );
    assert_eq!(err.to_diagnostic(&iface).code, "no-default");
}

#[test]
fn suppressed_required_property_is_stored_through_its_mutator() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.SecretEvent")
            .method(getter("getSecret", TypeRef::string()).annotated(property_settings(true, false)))
            .method(setter("setSecret", TypeRef::string()))
            .method(getter("getName", TypeRef::string())),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    let names: Vec<&str> = imp.constructor_params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["name", "secret"]);
    assert!(imp.class.field("secret").is_none());
    assert!(imp.class.method("getSecret").is_none());
    assert!(imp.class.method("setSecret").is_none());
    assert!(imp.class.constructors[0].body.contains(&Stmt::Expr {
        value: Expr::This.invoke("setSecret", vec![Expr::param("secret")]),
    }));

    let to_string = imp.class.method("toString").expect("toString");
    let Stmt::Return {
        value: Expr::Concat { parts },
    } = &to_string.body[0]
    else {
        panic!("unexpected toString body: {:?}", to_string.body);
    };
    assert_eq!(parts.len(), 3);
}

#[test]
fn suppressed_property_without_storage_is_rejected() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.LostEvent")
            .method(getter("getLost", TypeRef::string()).annotated(property_settings(true, false))),
    );
    assert_eq!(
        synthesize(&model, &iface).unwrap_err(),
        SynthesisError::NoStorage {
            property: "lost".to_string()
        }
    );
}

#[test]
fn use_field_storage_and_inherited_accessor() {
    let mut model = base_model();
    model.add_type(
        TypeDecl::class(ABSTRACT_EVENT)
            .field(FieldDecl::new("cause", TypeRef::object()).annotated(use_field(true)))
            .method(MethodDecl::getter("getCause", TypeRef::object()).with_body()),
    );
    let iface = model.add_type(
        event_interface("test.event.CausedEvent")
            .method(getter("getCause", TypeRef::object()))
            .method(getter("getName", TypeRef::string())),
    );
    let imp = synthesize(&model, &iface).expect("synthesis succeeds");

    assert!(imp.class.field("cause").is_none());
    assert!(imp.class.method("getCause").is_none());
    assert!(imp.class.constructors[0].body.contains(&Stmt::StoreField {
        field: "cause".to_string(),
        value: Expr::param("cause"),
    }));

    let to_string = imp.class.method("toString").expect("toString");
    assert_eq!(
        to_string.body,
        vec![Stmt::Return {
            value: Expr::Concat {
                parts: vec![
                    Expr::string("CausedEventImpl{cause="),
                    Expr::field("cause"),
                    Expr::string(", name="),
                    Expr::This.invoke("getName", Vec::new()),
                    Expr::string("}"),
                ],
            },
        }]
    );
}

#[test]
fn unrelated_inherited_field_has_no_narrowing_path() {
    let mut model = base_model();
    model.add_type(
        TypeDecl::class(ABSTRACT_EVENT)
            .field(FieldDecl::new("count", TypeRef::string()).annotated(use_field(false))),
    );
    let iface = model.add_type(
        event_interface("test.event.CountEvent").method(getter("getCount", TypeRef::int())),
    );

    let err = synthesize(&model, &iface).unwrap_err();
    assert_eq!(
        err,
        SynthesisError::NoNarrowingPath {
            property: "count".to_string(),
            storage: "java.lang.String".to_string(),
            canonical: "int".to_string(),
        }
    );
    let diagnostic = err.to_diagnostic(&iface);
    assert_eq!(diagnostic.interface.as_deref(), Some("test.event.CountEvent"));
    assert_eq!(diagnostic.property.as_deref(), Some("count"));
}
