//! Fixtures shared by eventgen tests.
//!
//! Every fixture model contains `test.event.Event` (annotated with `ImplementedBy` pointing at
//! `test.event.AbstractEvent`) so interfaces extending it can be synthesized directly.

use nova_eventgen_model::well_known::annotations::{
    ABSOLUTE_SORT_POSITION, IMPLEMENTED_BY, NON_NULL, NULLABLE, PROPERTY_SETTINGS, USE_FIELD,
};
use nova_eventgen_model::{Annotation, MemoryModel, MethodDecl, TypeDecl, TypeRef};

pub const EVENT: &str = "test.event.Event";
pub const ABSTRACT_EVENT: &str = "test.event.AbstractEvent";

/// `test.types.Wide` :> `test.types.Narrow` :> `test.types.Narrowest`.
pub const WIDE: &str = "test.types.Wide";
pub const NARROW: &str = "test.types.Narrow";
pub const NARROWEST: &str = "test.types.Narrowest";

pub fn implemented_by(class: &str) -> Annotation {
    Annotation::new(IMPLEMENTED_BY).with("value", class)
}

pub fn pinned(position: i64) -> Annotation {
    Annotation::new(ABSOLUTE_SORT_POSITION).with("value", position)
}

pub fn property_settings(required: bool, generate_methods: bool) -> Annotation {
    Annotation::new(PROPERTY_SETTINGS)
        .with("requiredParameter", required)
        .with("generateMethods", generate_methods)
}

pub fn nullable() -> Annotation {
    Annotation::new(NULLABLE)
}

pub fn non_null() -> Annotation {
    Annotation::new(NON_NULL)
}

pub fn use_field(override_to_string: bool) -> Annotation {
    Annotation::new(USE_FIELD).with("overrideToString", override_to_string)
}

pub fn getter(name: &str, ty: TypeRef) -> MethodDecl {
    MethodDecl::getter(name, ty)
}

pub fn setter(name: &str, ty: TypeRef) -> MethodDecl {
    MethodDecl::setter(name, ty)
}

/// Model holding the event root, its abstract base class and the `Wide`/`Narrow`/`Narrowest`
/// class chain.
pub fn base_model() -> MemoryModel {
    let mut model = MemoryModel::new();
    model.add_type(TypeDecl::class(ABSTRACT_EVENT));
    model.add_type(TypeDecl::interface(EVENT).annotated(implemented_by(ABSTRACT_EVENT)));
    model.add_type(TypeDecl::class(WIDE));
    model.add_type(TypeDecl::class(NARROW).extends(TypeRef::class(WIDE)));
    model.add_type(TypeDecl::class(NARROWEST).extends(TypeRef::class(NARROW)));
    model
}

/// An interface extending `test.event.Event`.
pub fn event_interface(name: &str) -> TypeDecl {
    TypeDecl::interface(name).extends(TypeRef::class(EVENT))
}

/// `test.event.ProfileEvent { String getName(); boolean isActive(); void setActive(boolean); }`
pub fn profile_event_model() -> (MemoryModel, TypeRef) {
    let mut model = base_model();
    let iface = model.add_type(
        event_interface("test.event.ProfileEvent")
            .method(getter("getName", TypeRef::string()))
            .method(getter("isActive", TypeRef::boolean()))
            .method(setter("setActive", TypeRef::boolean())),
    );
    (model, iface)
}

/// Diamond: `Bottom` extends `Left` and `Right`, both extending `Top`, each narrowing
/// `getValue()` (`Top: Wide`, `Left: Narrow`, `Right: Wide`, `Bottom: Narrowest`).
pub fn diamond_model() -> (MemoryModel, TypeRef) {
    let mut model = base_model();
    model.add_type(
        event_interface("test.diamond.Top").method(getter("getValue", TypeRef::class(WIDE))),
    );
    model.add_type(
        TypeDecl::interface("test.diamond.Left")
            .extends(TypeRef::class("test.diamond.Top"))
            .method(getter("getValue", TypeRef::class(NARROW))),
    );
    model.add_type(
        TypeDecl::interface("test.diamond.Right")
            .extends(TypeRef::class("test.diamond.Top"))
            .method(getter("getValue", TypeRef::class(WIDE))),
    );
    let bottom = model.add_type(
        TypeDecl::interface("test.diamond.Bottom")
            .extends(TypeRef::class("test.diamond.Left"))
            .extends(TypeRef::class("test.diamond.Right"))
            .method(getter("getValue", TypeRef::class(NARROWEST))),
    );
    (model, bottom)
}
