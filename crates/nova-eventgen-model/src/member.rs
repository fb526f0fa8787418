use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Annotated, Annotation, TypeRef};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            annotations: Vec::new(),
        }
    }
}

/// Identity of a method for de-duplication across a diamond-shaped ancestor graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<TypeRef>,
    pub return_type: TypeRef,
}

/// A method as seen through the type model.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRef {
    pub owner: TypeRef,
    pub name: String,
    pub visibility: Visibility,
    pub params: Vec<Parameter>,
    pub return_type: TypeRef,
    pub has_body: bool,
    pub is_static: bool,
    pub annotations: Vec<Annotation>,
}

impl MethodRef {
    pub fn signature(&self) -> MethodSignature {
        MethodSignature {
            name: self.name.clone(),
            params: self.params.iter().map(|p| p.ty.clone()).collect(),
            return_type: self.return_type.clone(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn param_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.params.iter().map(|p| &p.ty)
    }
}

impl Annotated for MethodRef {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.owner, self.name)?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param.ty)?;
        }
        write!(f, "): {}", self.return_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRef {
    pub owner: TypeRef,
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
    pub annotations: Vec<Annotation>,
}

impl Annotated for FieldRef {
    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
