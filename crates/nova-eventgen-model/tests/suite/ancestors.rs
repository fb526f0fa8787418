use nova_eventgen_model::{ancestors, MemoryModel, TypeDecl, TypeRef};
use pretty_assertions::assert_eq;

#[test]
fn diamond_ancestors_are_visited_once_breadth_first() {
    let mut model = MemoryModel::new();
    model.add_type(TypeDecl::interface("d.Top"));
    model.add_type(TypeDecl::interface("d.Left").extends(TypeRef::class("d.Top")));
    model.add_type(TypeDecl::interface("d.Right").extends(TypeRef::class("d.Top")));
    let bottom = model.add_type(
        TypeDecl::interface("d.Bottom")
            .extends(TypeRef::class("d.Left"))
            .extends(TypeRef::class("d.Right")),
    );

    let names: Vec<String> = ancestors(&model, &bottom)
        .into_iter()
        .map(|ty| ty.name().to_string())
        .collect();
    assert_eq!(names, vec!["d.Bottom", "d.Left", "d.Right", "d.Top"]);
}

#[test]
fn class_ancestors_include_superclass_before_interfaces() {
    let mut model = MemoryModel::new();
    model.add_type(TypeDecl::class("c.Base"));
    model.add_type(TypeDecl::interface("c.Marker"));
    let leaf = model.add_type(
        TypeDecl::class("c.Leaf")
            .extends(TypeRef::class("c.Base"))
            .implements(TypeRef::class("c.Marker")),
    );

    let names: Vec<String> = ancestors(&model, &leaf)
        .into_iter()
        .map(|ty| ty.name().to_string())
        .collect();
    assert_eq!(names, vec!["c.Leaf", "c.Base", "c.Marker"]);
}
