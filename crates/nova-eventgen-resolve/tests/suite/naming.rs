use nova_eventgen_model::{MethodDecl, TypeRef, Visibility};
use nova_eventgen_resolve::resolve_properties;
use nova_eventgen_test_utils::{base_model, event_interface, getter, profile_event_model};
use pretty_assertions::assert_eq;

#[test]
fn has_prefix_is_kept_in_the_property_name() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.naming.PermissionEvent")
            .method(getter("hasPermission", TypeRef::boolean())),
    );

    let resolution = resolve_properties(&model, &iface);
    assert_eq!(resolution.names(), vec!["hasPermission"]);
}

#[test]
fn bean_prefixes_map_to_decapitalized_names() {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.naming.WorldEvent")
            .method(getter("getWorld", TypeRef::string()))
            .method(getter("isCancelled", TypeRef::boolean()))
            .method(getter("keepsInventory", TypeRef::boolean()))
            .method(getter("getaway", TypeRef::string()))
            .method(getter("isLoaded", TypeRef::class("java.lang.Boolean")))
            .method(getter("getSecret", TypeRef::string()).visibility(Visibility::Private))
            .method(MethodDecl::new("getTarget", TypeRef::string()).param("id", TypeRef::int())),
    );

    let resolution = resolve_properties(&model, &iface);
    assert_eq!(resolution.names(), vec!["cancelled", "inventory", "world"]);
}

#[test]
fn profile_event_exposes_name_and_active() {
    let (model, iface) = profile_event_model();
    let resolution = resolve_properties(&model, &iface);

    assert_eq!(resolution.interface, iface);
    assert_eq!(resolution.names(), vec!["active", "name"]);
    assert!(resolution.get("active").expect("active").is_primitive());
    assert!(resolution.get("active").expect("active").mutator().is_some());
    assert!(resolution.get("name").expect("name").mutator().is_none());
}
