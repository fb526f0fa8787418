use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    well_known, Annotated, Annotation, FieldRef, MethodRef, Parameter, TypeModel, TypeRef,
    Visibility,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    #[default]
    Interface,
    Class,
}

/// A type declaration held by [`MemoryModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: DeclKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl TypeDecl {
    fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            super_class: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Interface)
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Class)
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::class(self.name.clone())
    }

    /// `extends` clause: the superclass for classes, another super-interface for interfaces.
    #[must_use]
    pub fn extends(mut self, ty: TypeRef) -> Self {
        match self.kind {
            DeclKind::Class => self.super_class = Some(ty),
            DeclKind::Interface => self.interfaces.push(ty),
        }
        self
    }

    #[must_use]
    pub fn implements(mut self, ty: TypeRef) -> Self {
        self.interfaces.push(ty);
        self
    }

    #[must_use]
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

impl Annotated for TypeDecl {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

fn void_type() -> TypeRef {
    TypeRef::void()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default = "void_type")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub has_body: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            params: Vec::new(),
            return_type,
            has_body: false,
            is_static: false,
            annotations: Vec::new(),
        }
    }

    /// Abstract zero-argument method returning `ty`.
    pub fn getter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty)
    }

    /// Abstract `void name(ty value)` method.
    pub fn setter(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, TypeRef::void()).param("value", ty)
    }

    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.params.push(Parameter::new(name, ty));
        self
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_body(mut self) -> Self {
        self.has_body = true;
        self
    }

    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self.has_body = true;
        self
    }

    #[must_use]
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    fn to_method_ref(&self, owner: &TypeRef) -> MethodRef {
        MethodRef {
            owner: owner.clone(),
            name: self.name.clone(),
            visibility: self.visibility,
            params: self.params.clone(),
            return_type: self.return_type.clone(),
            has_body: self.has_body,
            is_static: self.is_static,
            annotations: self.annotations.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Protected,
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to parse type model JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("type `{0}` is declared more than once")]
    DuplicateType(String),
}

#[derive(Deserialize)]
struct ModelFile {
    types: Vec<TypeDecl>,
}

/// In-memory metadata source, populated programmatically or from JSON.
#[derive(Debug, Clone, Default)]
pub struct MemoryModel {
    types: IndexMap<String, TypeDecl>,
}

impl MemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load declarations from `{"types": [...]}` JSON.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(text)?;
        let mut model = Self::new();
        for decl in file.types {
            if model.types.contains_key(&decl.name) {
                return Err(ModelError::DuplicateType(decl.name));
            }
            model.add_type(decl);
        }
        Ok(model)
    }

    /// Add (or replace) a declaration and return a reference to it.
    pub fn add_type(&mut self, decl: TypeDecl) -> TypeRef {
        let ty = decl.type_ref();
        self.types.insert(decl.name.clone(), decl);
        ty
    }

    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    pub fn declarations(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.values()
    }

    /// All declared interfaces, in declaration order.
    pub fn declared_interfaces(&self) -> Vec<TypeRef> {
        self.types
            .values()
            .filter(|decl| decl.kind == DeclKind::Interface)
            .map(TypeDecl::type_ref)
            .collect()
    }

    fn supertype_matches(candidate: &TypeRef, sup: &TypeRef) -> bool {
        candidate.name() == sup.name()
            && (sup.args().is_empty()
                || candidate.args().is_empty()
                || candidate.same_instantiation(sup))
    }
}

impl TypeModel for MemoryModel {
    fn is_subtype_of(&self, sub: &TypeRef, sup: &TypeRef) -> bool {
        if !sub.is_reference() || !sup.is_reference() {
            return sub == sup;
        }
        if sup.name() == well_known::OBJECT || Self::supertype_matches(sub, sup) {
            return true;
        }

        let mut seen = HashSet::new();
        let mut queue: VecDeque<TypeRef> = self.direct_supertypes(sub).into();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if Self::supertype_matches(&current, sup) {
                return true;
            }
            queue.extend(self.direct_supertypes(&current));
        }
        false
    }

    fn methods(&self, ty: &TypeRef) -> Vec<MethodRef> {
        let Some(decl) = self.types.get(ty.name()) else {
            return Vec::new();
        };
        let owner = decl.type_ref();
        decl.methods
            .iter()
            .map(|m| m.to_method_ref(&owner))
            .collect()
    }

    fn fields(&self, ty: &TypeRef) -> Vec<FieldRef> {
        let Some(decl) = self.types.get(ty.name()) else {
            return Vec::new();
        };
        let owner = decl.type_ref();
        decl.fields
            .iter()
            .map(|f| FieldRef {
                owner: owner.clone(),
                name: f.name.clone(),
                ty: f.ty.clone(),
                visibility: f.visibility,
                annotations: f.annotations.clone(),
            })
            .collect()
    }

    fn super_class(&self, ty: &TypeRef) -> Option<TypeRef> {
        self.types.get(ty.name())?.super_class.clone()
    }

    fn interfaces(&self, ty: &TypeRef) -> Vec<TypeRef> {
        self.types
            .get(ty.name())
            .map(|decl| decl.interfaces.clone())
            .unwrap_or_default()
    }

    fn annotations(&self, ty: &TypeRef) -> Vec<Annotation> {
        self.types
            .get(ty.name())
            .map(|decl| decl.annotations.clone())
            .unwrap_or_default()
    }

    fn is_interface(&self, ty: &TypeRef) -> bool {
        self.types
            .get(ty.name())
            .is_some_and(|decl| decl.kind == DeclKind::Interface)
    }
}
