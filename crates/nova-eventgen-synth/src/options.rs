use nova_eventgen_model::well_known::annotations::{NON_NULL, NULLABLE};
use nova_eventgen_resolve::Property;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IMPL_SUFFIX: &str = "Impl";

/// How generated constructors treat `null` for reference-typed properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NullPolicy {
    /// No guards; every reference property may be null.
    NoChecks,
    /// Guarded unless marked `@Nullable`.
    #[default]
    NonNullByDefault,
    /// Unguarded unless marked `@Nonnull`.
    NullByDefault,
}

impl NullPolicy {
    /// Whether `property` may hold `null`.
    pub fn permits_null(self, property: &Property) -> bool {
        if property.is_primitive() {
            return false;
        }
        match self {
            NullPolicy::NoChecks => true,
            NullPolicy::NonNullByDefault => property.has_annotation(NULLABLE),
            NullPolicy::NullByDefault => !property.has_annotation(NON_NULL),
        }
    }

    /// Whether a constructor argument for `property` gets a not-null guard.
    pub fn guards(self, property: &Property) -> bool {
        !property.is_primitive() && !self.permits_null(property)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    pub null_policy: NullPolicy,
    /// Appended to the interface's simple name to form the generated class name.
    pub impl_suffix: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            null_policy: NullPolicy::default(),
            impl_suffix: DEFAULT_IMPL_SUFFIX.to_string(),
        }
    }
}
