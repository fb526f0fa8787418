use nova_eventgen_model::{MemoryModel, MethodDecl};
use nova_eventgen_resolve::{resolve_properties, Property};
use nova_eventgen_test_utils::{base_model, event_interface};


/// Resolve an event interface made of `methods`.
pub(crate) fn properties_of(methods: Vec<MethodDecl>) -> Vec<Property> {
    let mut model: MemoryModel = base_model();
    let mut decl = event_interface("test.sort.SortEvent");
    for method in methods {
        decl = decl.method(method);
    }
    let iface = model.add_type(decl);
    resolve_properties(&model, &iface).properties
}

pub(crate) fn names(properties: &[Property]) -> Vec<&str> {
    properties.iter().map(Property::name).collect()
}
