use nova_eventgen_model::{Severity, TypeDecl, TypeRef};
use nova_eventgen_resolve::resolve_properties;
use nova_eventgen_test_utils::{
    base_model, diamond_model, event_interface, getter, NARROW, NARROWEST, WIDE,
};
use pretty_assertions::assert_eq;

#[test]
fn diamond_overrides_collapse_to_one_property() {
    let (model, bottom) = diamond_model();
    let resolution = resolve_properties(&model, &bottom);

    assert_eq!(resolution.names(), vec!["value"]);
    let value = resolution.get("value").expect("value property");
    assert_eq!(value.canonical_type(), &TypeRef::class(NARROWEST));
    assert_eq!(value.storage_type(), &TypeRef::class(WIDE));
    assert_eq!(value.most_specific_method().owner.name(), "test.diamond.Bottom");
    assert!(value.is_most_specific());
    assert!(value.needs_narrowing());
    assert!(value.mutator().is_none());
}

#[test]
fn resolution_is_deterministic() {
    let (model, bottom) = diamond_model();
    assert_eq!(
        resolve_properties(&model, &bottom),
        resolve_properties(&model, &bottom)
    );
}

#[test]
fn narrowing_declared_in_an_ancestor_still_wins() {
    let mut model = base_model();
    model.add_type(
        event_interface("test.chain.Narrowing").method(getter("getValue", TypeRef::class(NARROW))),
    );
    let leaf = model.add_type(
        TypeDecl::interface("test.chain.Leaf")
            .extends(TypeRef::class("test.chain.Narrowing"))
            .method(getter("getValue", TypeRef::class(WIDE))),
    );

    let resolution = resolve_properties(&model, &leaf);
    let value = resolution.get("value").expect("value property");
    assert_eq!(value.canonical_type(), &TypeRef::class(NARROW));
    assert_eq!(value.storage_type(), &TypeRef::class(WIDE));
    // The accessor is the narrowest declaration, wherever it lives.
    assert_eq!(value.accessor().owner.name(), "test.chain.Narrowing");
}

#[test]
fn incompatible_overrides_keep_the_first_seen_candidate() {
    let mut model = base_model();
    model.add_type(
        event_interface("test.clash.Left").method(getter("getValue", TypeRef::class(WIDE))),
    );
    model.add_type(
        event_interface("test.clash.Right").method(getter("getValue", TypeRef::string())),
    );
    let bottom = model.add_type(
        TypeDecl::interface("test.clash.Bottom")
            .extends(TypeRef::class("test.clash.Left"))
            .extends(TypeRef::class("test.clash.Right")),
    );

    let resolution = resolve_properties(&model, &bottom);
    let value = resolution.get("value").expect("value property");
    assert_eq!(value.canonical_type(), &TypeRef::class(WIDE));
    assert_eq!(value.storage_type(), &TypeRef::class(WIDE));

    let clash: Vec<_> = resolution
        .diagnostics
        .iter()
        .filter(|d| d.code == "incompatible-override")
        .collect();
    assert_eq!(clash.len(), 1);
    assert_eq!(clash[0].severity, Severity::Warning);
    assert_eq!(clash[0].interface.as_deref(), Some("test.clash.Bottom"));
}

#[test]
fn default_methods_hide_inherited_abstract_declarations() {
    let mut model = base_model();
    model.add_type(
        event_interface("test.defaults.Parent")
            .method(getter("getLabel", TypeRef::string()))
            .method(getter("getCount", TypeRef::int())),
    );
    let child = model.add_type(
        TypeDecl::interface("test.defaults.Child")
            .extends(TypeRef::class("test.defaults.Parent"))
            .method(getter("getLabel", TypeRef::string()).with_body())
            .method(getter("getDefault", TypeRef::string()).static_method()),
    );

    let resolution = resolve_properties(&model, &child);
    assert_eq!(resolution.names(), vec!["count"]);
}
