use std::collections::{HashMap, HashSet};

use nova_eventgen_model::well_known::annotations::{PROPERTY_SETTINGS, USE_FIELD};
use nova_eventgen_model::{
    ancestors, Annotated, AnnotationValue, FieldRef, TypeModel, TypeRef, Visibility,
};
use nova_eventgen_resolve::Property;

use crate::ir::{Expr, FieldDef, MethodDef, ParamDef, Stmt};
use crate::{NullPolicy, SynthesisError};

/// What the base class already provides: `@UseField` storage and implemented methods.
pub(crate) struct BaseMembers {
    use_fields: HashMap<String, FieldRef>,
    implemented: HashSet<(String, Vec<TypeRef>)>,
}

impl BaseMembers {
    pub(crate) fn collect(model: &dyn TypeModel, base: &TypeRef) -> Self {
        let mut use_fields = HashMap::new();
        let mut implemented = HashSet::new();
        for ty in ancestors(model, base) {
            for field in model.fields(&ty) {
                if field.visibility != Visibility::Private && field.has_annotation(USE_FIELD) {
                    use_fields.entry(field.name.clone()).or_insert(field);
                }
            }
            for method in model.methods(&ty) {
                if method.has_body && !method.is_static && method.visibility != Visibility::Private
                {
                    let params = method.param_types().cloned().collect();
                    implemented.insert((method.name.clone(), params));
                }
            }
        }
        Self {
            use_fields,
            implemented,
        }
    }

    fn implements(&self, name: &str, params: &[TypeRef]) -> bool {
        self.implemented.contains(&(name.to_string(), params.to_vec()))
    }
}

/// Where a property's value lives in the generated class.
#[derive(Debug, Clone)]
pub(crate) enum Storage {
    /// A generated private field named after the property.
    Own { ty: TypeRef },
    /// An inherited `@UseField` field. `unwrapped` fields hold the optional's element.
    Inherited { field: FieldRef, unwrapped: bool },
    /// Suppressed and required: written once through the mutator.
    Mutator,
    /// Suppressed and not required: not materialized at all.
    None,
}

/// Everything decided about one property before any member is emitted.
pub(crate) struct PropertyPlan<'p> {
    pub(crate) property: &'p Property,
    pub(crate) required: bool,
    pub(crate) suppressed: bool,
    pub(crate) storage: Storage,
    pub(crate) read: Option<Expr>,
    pub(crate) to_string_value: Option<Expr>,
    pub(crate) constructor: Vec<Stmt>,
    pub(crate) default_field: Option<FieldDef>,
    pub(crate) default_accessor: Option<MethodDef>,
    pub(crate) default_mutator: Option<MethodDef>,
    pub(crate) accessor_inherited: bool,
}

impl<'p> PropertyPlan<'p> {
    pub(crate) fn build(
        model: &dyn TypeModel,
        base: &BaseMembers,
        null_policy: NullPolicy,
        property: &'p Property,
    ) -> Result<Self, SynthesisError> {
        let settings = |key: &str| {
            property
                .annotation_value(PROPERTY_SETTINGS, key)
                .and_then(AnnotationValue::as_bool)
        };
        let required = settings("requiredParameter").unwrap_or(true);
        let suppressed = !settings("generateMethods").unwrap_or(true);

        let name = property.name();
        let canonical = property.canonical_type();
        let no_path = |storage: &TypeRef| SynthesisError::NoNarrowingPath {
            property: name.to_string(),
            storage: storage.to_string(),
            canonical: canonical.to_string(),
        };

        let storage = match base.use_fields.get(name) {
            Some(field) => {
                let unwrapped = canonical.is_optional()
                    && !field.ty.is_optional()
                    && model.is_subtype_of(&optional_element(canonical), &field.ty);
                if !unwrapped && !model.is_subtype_of(canonical, &field.ty) {
                    return Err(no_path(&field.ty));
                }
                Storage::Inherited {
                    field: field.clone(),
                    unwrapped,
                }
            }
            None if !suppressed => {
                let ty = property.storage_type();
                if !model.is_subtype_of(canonical, ty) {
                    return Err(no_path(ty));
                }
                Storage::Own { ty: ty.clone() }
            }
            None if required => {
                if property.mutator().is_none() {
                    return Err(SynthesisError::NoStorage {
                        property: name.to_string(),
                    });
                }
                Storage::Mutator
            }
            None => Storage::None,
        };

        let mut plan = Self {
            property,
            required,
            suppressed,
            storage,
            read: None,
            to_string_value: None,
            constructor: Vec::new(),
            default_field: None,
            default_accessor: None,
            default_mutator: None,
            accessor_inherited: base.implements(&property.accessor().name, &[]),
        };

        let initializer = if required {
            None
        } else {
            plan.default_value(null_policy)?
        };

        plan.read = plan.read_expr(model);
        plan.to_string_value = plan.to_string_expr();
        if required {
            plan.constructor = plan.constructor_stmts(model, null_policy)?;
        }

        match &plan.storage {
            Storage::Own { ty } => {
                plan.default_field = Some(FieldDef {
                    name: name.to_string(),
                    ty: ty.clone(),
                    visibility: Visibility::Private,
                    is_final: property.mutator().is_none() && (required || initializer.is_some()),
                    initializer,
                });
            }
            // Inherited fields cannot carry an initializer, so the default is stored on construction.
            Storage::Inherited { field, .. } => {
                if let Some(value) = initializer {
                    plan.constructor.push(Stmt::StoreField {
                        field: field.name.clone(),
                        value,
                    });
                }
            }
            Storage::Mutator | Storage::None => {}
        }

        if !suppressed {
            if !plan.accessor_inherited {
                plan.default_accessor = plan.read.clone().map(|read| {
                    MethodDef::overriding(&property.accessor().name, canonical.clone())
                        .body(vec![Stmt::Return { value: read }])
                });
            }
            plan.default_mutator = plan.mutator_def(model, base)?;
        }

        Ok(plan)
    }

    /// Field name and declared type of the storage, if the property has a field.
    fn stored_field(&self) -> Option<(&str, &TypeRef, bool)> {
        match &self.storage {
            Storage::Own { ty } => Some((self.property.name(), ty, false)),
            Storage::Inherited { field, unwrapped } => {
                Some((field.name.as_str(), &field.ty, *unwrapped))
            }
            Storage::Mutator | Storage::None => None,
        }
    }

    /// Initial value of a non-required property; `Ok(None)` means the language default.
    fn default_value(&self, null_policy: NullPolicy) -> Result<Option<Expr>, SynthesisError> {
        let property = self.property;
        let canonical = property.canonical_type();
        match &self.storage {
            Storage::None => Ok(None),
            Storage::Inherited { unwrapped: true, .. } => Ok(None),
            _ if canonical.is_optional() => Ok(Some(Expr::EmptyOptional)),
            _ => match canonical.as_primitive() {
                Some(primitive) => Ok(Some(Expr::zero(primitive))),
                None if null_policy.permits_null(property) => Ok(None),
                None => Err(SynthesisError::NoDefault {
                    property: property.name().to_string(),
                    ty: canonical.to_string(),
                }),
            },
        }
    }

    /// The stored value as the canonical type.
    fn read_expr(&self, model: &dyn TypeModel) -> Option<Expr> {
        let (field, ty, unwrapped) = self.stored_field()?;
        let canonical = self.property.canonical_type();
        let method = &self.property.accessor().name;
        let load = Expr::field(field);
        if unwrapped {
            let element = optional_element(canonical);
            let value = if model.is_subtype_of(ty, &element) {
                load
            } else {
                load.narrow(element, method)
            };
            return Some(value.wrap_optional());
        }
        Some(if ty.same_instantiation(canonical) {
            load
        } else {
            load.narrow(canonical.clone(), method)
        })
    }

    fn to_string_expr(&self) -> Option<Expr> {
        if self.suppressed {
            return None;
        }
        if let Storage::Inherited { field, .. } = &self.storage {
            let bypass = field
                .annotation_value(USE_FIELD, "overrideToString")
                .and_then(AnnotationValue::as_bool)
                .unwrap_or(false);
            if bypass {
                return Some(Expr::field(&field.name));
            }
        }
        Some(Expr::This.invoke(&self.property.accessor().name, Vec::new()))
    }

    fn constructor_stmts(
        &self,
        model: &dyn TypeModel,
        null_policy: NullPolicy,
    ) -> Result<Vec<Stmt>, SynthesisError> {
        let property = self.property;
        let name = property.name();
        let canonical = property.canonical_type();
        let mut stmts = Vec::new();

        if null_policy.guards(property) {
            stmts.push(Stmt::RequireNonNull {
                value: Expr::param(name),
                property: name.to_string(),
            });
        }

        match &self.storage {
            Storage::Own { .. } | Storage::Inherited { .. } => {
                let value = self.store_expr(model, Expr::param(name), canonical, "<init>")?;
                stmts.push(self.store_stmt(value));
            }
            Storage::Mutator => {
                if let Some(mutator) = property.mutator() {
                    let param_ty = &mutator.params[0].ty;
                    let arg = if model.is_subtype_of(canonical, param_ty) {
                        Expr::param(name)
                    } else if canonical.is_optional()
                        && model.is_subtype_of(&optional_element(canonical), param_ty)
                    {
                        Expr::param(name).invoke("orElse", vec![Expr::null()])
                    } else {
                        return Err(self.incompatible_mutator(param_ty, canonical));
                    };
                    stmts.push(Stmt::Expr {
                        value: Expr::This.invoke(&mutator.name, vec![arg]),
                    });
                }
            }
            Storage::None => {}
        }
        Ok(stmts)
    }

    fn mutator_def(
        &self,
        model: &dyn TypeModel,
        base: &BaseMembers,
    ) -> Result<Option<MethodDef>, SynthesisError> {
        let Some(mutator) = self.property.mutator() else {
            return Ok(None);
        };
        let param_ty = &mutator.params[0].ty;
        if self.stored_field().is_none() || base.implements(&mutator.name, &[param_ty.clone()]) {
            return Ok(None);
        }

        let name = self.property.name();
        let value = self.store_expr(model, Expr::param(name), param_ty, &mutator.name)?;
        Ok(Some(
            MethodDef::overriding(&mutator.name, TypeRef::void())
                .param(ParamDef::new(name, param_ty.clone()))
                .body(vec![self.store_stmt(value)]),
        ))
    }

    fn store_stmt(&self, value: Expr) -> Stmt {
        let field = match self.stored_field() {
            Some((field, _, _)) => field.to_string(),
            None => self.property.name().to_string(),
        };
        Stmt::StoreField { field, value }
    }

    /// Convert `value` of type `from` into what the storage holds, narrowing with a checked cast
    /// where `from` is wider than the canonical type and wrapping into the optional wrapper where
    /// needed.
    fn store_expr(
        &self,
        model: &dyn TypeModel,
        value: Expr,
        from: &TypeRef,
        method: &str,
    ) -> Result<Expr, SynthesisError> {
        let canonical = self.property.canonical_type();
        let unwrapped = matches!(self.storage, Storage::Inherited { unwrapped: true, .. });
        let coerce = |value: Expr, to: &TypeRef| {
            if model.is_subtype_of(from, to) {
                Some(value)
            } else if model.is_subtype_of(to, from) {
                Some(value.narrow(to.clone(), method))
            } else {
                None
            }
        };

        let stored = if !canonical.is_optional() {
            coerce(value, canonical)
        } else if from.is_optional() {
            coerce(value, canonical).map(|v| {
                if unwrapped {
                    v.invoke("orElse", vec![Expr::null()])
                } else {
                    v
                }
            })
        } else {
            coerce(value, &optional_element(canonical)).map(|v| {
                if unwrapped {
                    v
                } else {
                    v.wrap_optional()
                }
            })
        };

        stored.ok_or_else(|| self.incompatible_mutator(from, canonical))
    }

    fn incompatible_mutator(&self, param: &TypeRef, storage: &TypeRef) -> SynthesisError {
        SynthesisError::IncompatibleMutator {
            property: self.property.name().to_string(),
            param: param.to_string(),
            storage: storage.to_string(),
        }
    }
}

/// Element type of an optional wrapper; `java.lang.Object` when raw.
pub(crate) fn optional_element(optional: &TypeRef) -> TypeRef {
    optional
        .args()
        .first()
        .cloned()
        .unwrap_or_else(TypeRef::object)
}
