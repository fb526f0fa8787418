use nova_eventgen_model::{Severity, TypeDecl, TypeRef};
use nova_eventgen_resolve::resolve_properties;
use nova_eventgen_test_utils::{base_model, event_interface, getter, setter};
use pretty_assertions::assert_eq;

#[test]
fn mismatched_setter_leaves_the_property_unpaired() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.pairing.FooEvent")
            .method(getter("getFoo", TypeRef::string()))
            .method(setter("setFoo", TypeRef::int())),
    );

    let resolution = resolve_properties(&model, &iface);
    let foo = resolution.get("foo").expect("foo property");
    assert!(foo.mutator().is_none());

    assert_eq!(resolution.diagnostics.len(), 1);
    let diagnostic = &resolution.diagnostics[0];
    assert_eq!(diagnostic.code, "unpaired-accessor");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(diagnostic.property.as_deref(), Some("foo"));
}

#[test]
fn read_only_property_is_reported_as_info() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.pairing.ReadOnlyEvent").method(getter("getFoo", TypeRef::string())),
    );

    let resolution = resolve_properties(&model, &iface);
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(resolution.diagnostics[0].severity, Severity::Info);
}

#[test]
fn optional_accessor_pairs_with_any_same_named_setter() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.pairing.MessageEvent")
            .method(getter("getMessage", TypeRef::optional(TypeRef::string())))
            .method(setter("setMessage", TypeRef::string())),
    );

    let resolution = resolve_properties(&model, &iface);
    let message = resolution.get("message").expect("message property");
    let mutator = message.mutator().expect("paired mutator");
    assert_eq!(mutator.params[0].ty, TypeRef::string());
    assert!(resolution.diagnostics.is_empty());
}

#[test]
fn exact_setter_is_preferred_and_may_live_in_an_ancestor() {
    let mut model = base_model();
    model.add_type(
        event_interface("test.pairing.Parent")
            .method(setter("setCount", TypeRef::int()))
            .method(setter("setCount", TypeRef::class("java.lang.Integer"))),
    );
    let child = model.add_type(
        TypeDecl::interface("test.pairing.Child")
            .extends(TypeRef::class("test.pairing.Parent"))
            .method(getter("getCount", TypeRef::class("java.lang.Integer"))),
    );

    let resolution = resolve_properties(&model, &child);
    let count = resolution.get("count").expect("count property");
    let mutator = count.mutator().expect("paired mutator");
    assert_eq!(mutator.params[0].ty, TypeRef::class("java.lang.Integer"));
    assert_eq!(mutator.owner.name(), "test.pairing.Parent");
}
