use std::collections::{HashSet, VecDeque};

use crate::{Annotation, FieldRef, MethodRef, TypeRef};

/// Query interface over a metadata source.
///
/// Implementations exist per source (in-memory declarations, a compiler's semantic model,
/// parsed stubs); consumers never look past this trait. Unknown types answer with empty
/// results rather than errors.
pub trait TypeModel {
    /// Reflexive subtype check: `sub <: sup`.
    fn is_subtype_of(&self, sub: &TypeRef, sup: &TypeRef) -> bool;

    /// Methods declared directly on `ty` (not inherited ones), in declaration order.
    fn methods(&self, ty: &TypeRef) -> Vec<MethodRef>;

    /// Fields declared directly on `ty`.
    fn fields(&self, ty: &TypeRef) -> Vec<FieldRef>;

    fn super_class(&self, ty: &TypeRef) -> Option<TypeRef>;

    fn interfaces(&self, ty: &TypeRef) -> Vec<TypeRef>;

    fn annotations(&self, ty: &TypeRef) -> Vec<Annotation>;

    fn is_interface(&self, ty: &TypeRef) -> bool;

    /// Superclass (if any) followed by the directly implemented/extended interfaces.
    fn direct_supertypes(&self, ty: &TypeRef) -> Vec<TypeRef> {
        let mut out: Vec<TypeRef> = self.super_class(ty).into_iter().collect();
        out.extend(self.interfaces(ty));
        out
    }
}

/// Breadth-first ancestor closure of `root`, starting with `root` itself.
///
/// Every type appears once even when reachable through several paths.
pub fn ancestors(model: &dyn TypeModel, root: &TypeRef) -> Vec<TypeRef> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([root.clone()]);

    while let Some(current) = queue.pop_front() {
        if !seen.insert(current.clone()) {
            continue;
        }
        queue.extend(model.direct_supertypes(&current));
        out.push(current);
    }

    out
}
