use nova_eventgen_model::well_known::annotations::{TRANSFORM_RESULT, TRANSFORM_WITH};
use nova_eventgen_model::{ancestors, Annotated, AnnotationValue, MethodRef, TypeModel, TypeRef};
use nova_eventgen_resolve::Property;

use crate::ir::{Expr, FieldDef, MethodDef, Stmt};
use crate::plan::PropertyPlan;
use crate::PluginError;

/// Custom member generation for individual properties.
///
/// Plugins run in registration order before default generation. The first one returning
/// `Ok(true)` owns the property: default field/accessor/mutator generation is skipped and the
/// plugin is expected to emit whatever it needs through the [`PropertyContext`] (including the
/// defaults it wants to keep). An error aborts the class being built.
pub trait SynthesisPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, cx: &mut PropertyContext<'_>) -> Result<bool, PluginError>;
}

/// A plugin's view of one property and the members generated for it.
pub struct PropertyContext<'a> {
    model: &'a dyn TypeModel,
    plan: &'a PropertyPlan<'a>,
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) methods: Vec<MethodDef>,
}

impl<'a> PropertyContext<'a> {
    pub(crate) fn new(model: &'a dyn TypeModel, plan: &'a PropertyPlan<'a>) -> Self {
        Self {
            model,
            plan,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn model(&self) -> &'a dyn TypeModel {
        self.model
    }

    pub fn property(&self) -> &'a Property {
        self.plan.property
    }

    /// The stored value, narrowed to the canonical type. `None` when the property has no
    /// storage in the generated class.
    pub fn read_value(&self) -> Option<Expr> {
        self.plan.read.clone()
    }

    /// Whether the base class already implements the accessor.
    pub fn accessor_inherited(&self) -> bool {
        self.plan.accessor_inherited
    }

    pub fn emit_default_field(&mut self) {
        self.fields.extend(self.plan.default_field.clone());
    }

    pub fn emit_default_accessor(&mut self) {
        self.methods.extend(self.plan.default_accessor.clone());
    }

    pub fn emit_default_mutator(&mut self) {
        self.methods.extend(self.plan.default_mutator.clone());
    }

    pub(crate) fn emit_defaults(&mut self) {
        self.emit_default_field();
        self.emit_default_accessor();
        self.emit_default_mutator();
    }

    pub fn push_field(&mut self, field: FieldDef) {
        self.fields.push(field);
    }

    pub fn push_method(&mut self, method: MethodDef) {
        self.methods.push(method);
    }
}

/// Accessors annotated `@TransformResult(key)` return `stored.m()`, where `m` is the zero-argument
/// method of the property type annotated `@TransformWith(key)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformAccessorPlugin;

impl TransformAccessorPlugin {
    fn transformer(model: &dyn TypeModel, ty: &TypeRef, key: &str) -> Option<MethodRef> {
        ancestors(model, ty)
            .iter()
            .flat_map(|ancestor| model.methods(ancestor))
            .find(|method| {
                !method.is_static
                    && method.params.is_empty()
                    && method.is_public()
                    && method.has_annotation(TRANSFORM_WITH)
                    && annotation_key(method.annotation_value(TRANSFORM_WITH, "value")) == key
            })
    }
}

fn annotation_key(value: Option<&AnnotationValue>) -> &str {
    value.and_then(AnnotationValue::as_str).unwrap_or("")
}

impl SynthesisPlugin for TransformAccessorPlugin {
    fn name(&self) -> &'static str {
        "transform-accessor"
    }

    fn generate(&self, cx: &mut PropertyContext<'_>) -> Result<bool, PluginError> {
        let property = cx.property();
        if !property.has_annotation(TRANSFORM_RESULT) || cx.accessor_inherited() {
            return Ok(false);
        }
        let Some(stored) = cx.read_value() else {
            return Ok(false);
        };

        let key = annotation_key(property.annotation_value(TRANSFORM_RESULT, "value"));
        let ty = property.canonical_type();
        let transformer = Self::transformer(cx.model(), ty, key).ok_or_else(|| {
            PluginError::MissingTransformer {
                ty: ty.to_string(),
                key: key.to_string(),
            }
        })?;
        if !cx.model().is_subtype_of(&transformer.return_type, ty) {
            return Err(PluginError::Failed(format!(
                "`{transformer}` returns `{}`, which is not assignable to `{ty}`",
                transformer.return_type
            )));
        }

        tracing::trace!(
            target: "nova.eventgen.synth",
            property = property.name(),
            transformer = %transformer,
            "transforming accessor result"
        );

        cx.emit_default_field();
        cx.push_method(
            MethodDef::overriding(&property.accessor().name, ty.clone()).body(vec![Stmt::Return {
                value: stored.invoke(&transformer.name, Vec::new()),
            }]),
        );
        cx.emit_default_mutator();
        Ok(true)
    }
}
