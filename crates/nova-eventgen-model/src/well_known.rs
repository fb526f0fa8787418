//! Names with fixed meaning to the generator.

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
/// The optional wrapper type. Properties of this type accept any same-named single-argument
/// mutator and get wrapped on write.
pub const OPTIONAL: &str = "java.util.Optional";

/// Annotation simple names.
pub mod annotations {
    /// `@ImplementedBy(value = "<base class>", priority = 1)` on an interface.
    pub const IMPLEMENTED_BY: &str = "ImplementedBy";
    /// `@AbsoluteSortPosition(value)` on an accessor.
    pub const ABSOLUTE_SORT_POSITION: &str = "AbsoluteSortPosition";
    /// `@PropertySettings(requiredParameter = true, generateMethods = true)` on an accessor.
    pub const PROPERTY_SETTINGS: &str = "PropertySettings";
    /// `@UseField(overrideToString = false)` on a base-class field.
    pub const USE_FIELD: &str = "UseField";
    pub const NULLABLE: &str = "Nullable";
    pub const NON_NULL: &str = "Nonnull";
    /// `@TransformResult(value)` on an accessor.
    pub const TRANSFORM_RESULT: &str = "TransformResult";
    /// `@TransformWith(value)` on a method of the property's type.
    pub const TRANSFORM_WITH: &str = "TransformWith";
    /// Marks a static interface method to be forwarded into the generated factory.
    pub const FACTORY_METHOD: &str = "FactoryMethod";
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// `prefix` followed by an upper-case letter, e.g. `getName` for `get`. Returns the remainder.
pub fn strip_bean_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    rest.chars()
        .next()
        .is_some_and(char::is_uppercase)
        .then_some(rest)
}
