use nova_eventgen_model::{Diagnostic, TypeRef};
use thiserror::Error;

/// A plugin's refusal to generate members for a property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("no zero-argument method of `{ty}` is annotated `@TransformWith(\"{key}\")`")]
    MissingTransformer { ty: String, key: String },
    #[error("{0}")]
    Failed(String),
}

/// Why an implementation class could not be built. Always scoped to one interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error(
        "property `{property}`: no narrowing path from storage type `{storage}` to `{canonical}`"
    )]
    NoNarrowingPath {
        property: String,
        storage: String,
        canonical: String,
    },
    #[error(
        "mutator of property `{property}` accepts `{param}`, which cannot be stored as `{storage}`"
    )]
    IncompatibleMutator {
        property: String,
        param: String,
        storage: String,
    },
    #[error("optional property `{property}` of type `{ty}` has no default value")]
    NoDefault { property: String, ty: String },
    #[error(
        "property `{property}` is required but has neither a `@UseField` field nor a mutator"
    )]
    NoStorage { property: String },
    #[error("plugin `{plugin}` failed on property `{property}`: {source}")]
    Plugin {
        plugin: &'static str,
        property: String,
        #[source]
        source: PluginError,
    },
}

impl SynthesisError {
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisError::NoNarrowingPath { .. } => "no-narrowing-path",
            SynthesisError::IncompatibleMutator { .. } => "incompatible-mutator",
            SynthesisError::NoDefault { .. } => "no-default",
            SynthesisError::NoStorage { .. } => "no-storage",
            SynthesisError::Plugin { .. } => "plugin-failure",
        }
    }

    pub fn property(&self) -> &str {
        match self {
            SynthesisError::NoNarrowingPath { property, .. }
            | SynthesisError::IncompatibleMutator { property, .. }
            | SynthesisError::NoDefault { property, .. }
            | SynthesisError::NoStorage { property }
            | SynthesisError::Plugin { property, .. } => property,
        }
    }

    pub fn to_diagnostic(&self, interface: &TypeRef) -> Diagnostic {
        Diagnostic::error(self.code(), self.to_string())
            .for_interface(interface.name())
            .for_property(self.property())
    }
}
