//! Type model shared by the event implementation generator.
//!
//! Everything downstream (property resolution, sorting, synthesis) talks to interface
//! descriptions exclusively through [`TypeModel`], [`TypeRef`] and [`MethodRef`]. A metadata
//! source (the in-memory [`MemoryModel`], a compiler's semantic model, parsed stubs, ...) only
//! has to implement [`TypeModel`] to participate.

#![forbid(unsafe_code)]

mod annotation;
mod base_class;
mod diagnostic;
mod env;
mod member;
mod memory;
mod types;
pub mod well_known;

pub use crate::annotation::{Annotated, Annotation, AnnotationValue};
pub use crate::base_class::{resolve_base_class, BaseClass, BaseClassError};
pub use crate::diagnostic::{Diagnostic, Severity};
pub use crate::env::{ancestors, TypeModel};
pub use crate::member::{FieldRef, MethodRef, MethodSignature, Parameter, Visibility};
pub use crate::memory::{DeclKind, FieldDecl, MemoryModel, MethodDecl, ModelError, TypeDecl};
pub use crate::types::{PrimitiveType, TypeKind, TypeParseError, TypeRef};
