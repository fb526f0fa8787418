use thiserror::Error;

use crate::well_known::annotations::IMPLEMENTED_BY;
use crate::{ancestors, Annotated, AnnotationValue, Diagnostic, TypeModel, TypeRef};

const DEFAULT_PRIORITY: i64 = 1;

/// The class a generated implementation extends.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseClass {
    pub ty: TypeRef,
    pub priority: i64,
    /// Ancestor carrying the winning `ImplementedBy`.
    pub declared_on: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BaseClassError {
    #[error("no `@ImplementedBy` found on `{interface}` or any of its ancestors")]
    Missing { interface: String },
    #[error("`@ImplementedBy` on `{declared_on}` has no usable `value`: {reason}")]
    Malformed { declared_on: String, reason: String },
}

impl BaseClassError {
    pub fn to_diagnostic(&self, interface: &TypeRef) -> Diagnostic {
        let code = match self {
            BaseClassError::Missing { .. } => "missing-base-class",
            BaseClassError::Malformed { .. } => "malformed-base-class",
        };
        Diagnostic::error(code, self.to_string()).for_interface(interface.name())
    }
}

/// Resolve the implementation base class for `root`.
///
/// Walks the ancestor closure breadth-first and keeps the highest-priority `ImplementedBy`;
/// on equal priority the first one encountered wins.
pub fn resolve_base_class(
    model: &dyn TypeModel,
    root: &TypeRef,
) -> Result<BaseClass, BaseClassError> {
    let mut best: Option<BaseClass> = None;

    for ancestor in ancestors(model, root) {
        let annotations = model.annotations(&ancestor);
        let Some(annotation) = annotations.annotation(IMPLEMENTED_BY) else {
            continue;
        };

        let value = annotation
            .value("value")
            .and_then(AnnotationValue::as_str)
            .ok_or_else(|| BaseClassError::Malformed {
                declared_on: ancestor.name().to_string(),
                reason: "expected a class name string".to_string(),
            })?;
        let ty = TypeRef::parse(value).map_err(|err| BaseClassError::Malformed {
            declared_on: ancestor.name().to_string(),
            reason: err.to_string(),
        })?;
        let priority = annotation
            .value("priority")
            .and_then(AnnotationValue::as_int)
            .unwrap_or(DEFAULT_PRIORITY);

        if best.as_ref().is_some_and(|b| b.priority >= priority) {
            continue;
        }
        tracing::trace!(
            target: "nova.eventgen.model",
            interface = %root,
            candidate = %ty,
            priority,
            "base class candidate"
        );
        best = Some(BaseClass {
            ty,
            priority,
            declared_on: ancestor,
        });
    }

    best.ok_or_else(|| BaseClassError::Missing {
        interface: root.name().to_string(),
    })
}
