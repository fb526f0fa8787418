//! Implementation and factory synthesis.
//!
//! Given a sorted property set and the resolved base class, [`ImplSynthesizer`] decides every
//! member of the implementation class: storage, constructor parameters and null guards,
//! narrowing casts, optional wrapping and the string form. The result is an [`ir::ClassDef`],
//! which a [`Backend`] (such as [`JavaSourceBackend`]) lowers to its final form.
//! [`FactorySynthesizer`] aggregates one creation method per implementation.

#![forbid(unsafe_code)]

mod class;
mod error;
mod factory;
pub mod ir;
mod java;
mod options;
mod plan;
mod plugin;

pub use crate::class::{ImplClass, ImplSynthesizer};
pub use crate::error::{PluginError, SynthesisError};
pub use crate::factory::{FactoryClass, FactoryOptions, FactorySynthesizer, DEFAULT_FACTORY_CLASS};
pub use crate::java::{is_java_identifier, Backend, JavaSourceBackend, SourceFile};
pub use crate::options::{NullPolicy, SynthesisOptions, DEFAULT_IMPL_SUFFIX};
pub use crate::plugin::{PropertyContext, SynthesisPlugin, TransformAccessorPlugin};
