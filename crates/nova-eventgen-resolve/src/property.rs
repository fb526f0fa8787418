use nova_eventgen_model::{Annotated, Annotation, AnnotationValue, MethodRef, TypeRef};

/// One resolved, de-duplicated property of an interface.
///
/// Invariants: `canonical_type` is the most-specific method's return type; the least-specific
/// method's return type is a supertype of (or equal to) every override and is what the
/// generated field stores.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    canonical_type: TypeRef,
    accessor: MethodRef,
    least_specific_method: MethodRef,
    most_specific_method: MethodRef,
    mutator: Option<MethodRef>,
}

impl Property {
    /// `accessor` is the declaration this property stands for. The resolver always passes the
    /// most-specific override; hosts assembling properties by hand may pass a wider, shadowed
    /// declaration, which the sorter then leaves out.
    pub fn new(
        name: impl Into<String>,
        accessor: MethodRef,
        least_specific_method: MethodRef,
        most_specific_method: MethodRef,
        mutator: Option<MethodRef>,
    ) -> Self {
        Self {
            name: name.into(),
            canonical_type: most_specific_method.return_type.clone(),
            accessor,
            least_specific_method,
            most_specific_method,
            mutator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Narrowest return type across all overrides; used for constructor parameters and
    /// accessor return types.
    pub fn canonical_type(&self) -> &TypeRef {
        &self.canonical_type
    }

    /// Return type of the accessor this property was built from.
    pub fn declared_type(&self) -> &TypeRef {
        &self.accessor.return_type
    }

    /// Widest return type across all overrides; used for field storage.
    pub fn storage_type(&self) -> &TypeRef {
        &self.least_specific_method.return_type
    }

    pub fn accessor(&self) -> &MethodRef {
        &self.accessor
    }

    pub fn mutator(&self) -> Option<&MethodRef> {
        self.mutator.as_ref()
    }

    pub fn least_specific_method(&self) -> &MethodRef {
        &self.least_specific_method
    }

    pub fn most_specific_method(&self) -> &MethodRef {
        &self.most_specific_method
    }

    /// Whether the accessor is the narrowest override. Shadowed wider declarations are not.
    pub fn is_most_specific(&self) -> bool {
        self.declared_type().same_instantiation(&self.canonical_type)
    }

    /// Whether reads from storage need a checked cast to reach the canonical type.
    pub fn needs_narrowing(&self) -> bool {
        !self.storage_type().same_instantiation(&self.canonical_type)
    }

    pub fn is_primitive(&self) -> bool {
        self.canonical_type.is_primitive()
    }

    /// First matching annotation on the accessor, the most/least specific overrides, then the
    /// mutator.
    pub fn annotation(&self, name: &str) -> Option<&Annotation> {
        [
            Some(&self.accessor),
            Some(&self.most_specific_method),
            Some(&self.least_specific_method),
            self.mutator.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find_map(|method| method.annotation(name))
    }

    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotation(name).is_some()
    }

    pub fn annotation_value(&self, name: &str, key: &str) -> Option<&AnnotationValue> {
        self.annotation(name).and_then(|a| a.value(key))
    }
}
