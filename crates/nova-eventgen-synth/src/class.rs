use nova_eventgen_model::{BaseClass, TypeModel, TypeRef, Visibility};
use nova_eventgen_resolve::Property;

use crate::ir::{ClassDef, ConstructorDef, Expr, MethodDef, ParamDef, Stmt};
use crate::plan::{BaseMembers, PropertyPlan};
use crate::plugin::{PropertyContext, SynthesisPlugin};
use crate::{SynthesisError, SynthesisOptions};

/// A synthesized implementation of one interface.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplClass {
    pub interface: TypeRef,
    pub class: ClassDef,
    /// Constructor parameters in sorted-property order; the factory mirrors them.
    pub constructor_params: Vec<ParamDef>,
}

impl ImplClass {
    pub fn type_ref(&self) -> TypeRef {
        self.class.type_ref()
    }
}

/// Builds implementation classes for event interfaces.
pub struct ImplSynthesizer<'a> {
    model: &'a dyn TypeModel,
    options: &'a SynthesisOptions,
    plugins: &'a [Box<dyn SynthesisPlugin>],
}

impl<'a> ImplSynthesizer<'a> {
    pub fn new(model: &'a dyn TypeModel, options: &'a SynthesisOptions) -> Self {
        Self {
            model,
            options,
            plugins: &[],
        }
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: &'a [Box<dyn SynthesisPlugin>]) -> Self {
        self.plugins = plugins;
        self
    }

    /// `<InterfaceSimpleName><suffix>`.
    pub fn class_name(&self, interface: &TypeRef) -> String {
        format!("{}{}", interface.simple_name(), self.options.impl_suffix)
    }

    /// Synthesize the implementation of `interface` from its sorted properties.
    ///
    /// Member order follows `properties`. Any error aborts this class only.
    pub fn synthesize(
        &self,
        interface: &TypeRef,
        properties: &[Property],
        base: &BaseClass,
    ) -> Result<ImplClass, SynthesisError> {
        let base_members = BaseMembers::collect(self.model, &base.ty);
        let plans = properties
            .iter()
            .map(|property| {
                PropertyPlan::build(self.model, &base_members, self.options.null_policy, property)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let class_name = self.class_name(interface);
        let mut class = ClassDef::new(interface.package().map(str::to_string), &class_name);
        class.extends = Some(base.ty.clone());
        class.implements.push(interface.clone());

        let mut constructor = ConstructorDef {
            visibility: Visibility::Public,
            params: Vec::new(),
            body: Vec::new(),
        };
        for plan in &plans {
            if plan.required {
                constructor.params.push(ParamDef::new(
                    plan.property.name(),
                    plan.property.canonical_type().clone(),
                ));
            }
            constructor.body.extend(plan.constructor.iter().cloned());
        }

        let mut methods = Vec::new();
        for plan in &plans {
            let mut cx = PropertyContext::new(self.model, plan);
            if !plan.suppressed && !self.run_plugins(&mut cx)? {
                cx.emit_defaults();
            }
            class.fields.append(&mut cx.fields);
            methods.append(&mut cx.methods);
        }
        methods.push(to_string_method(&class_name, &plans));

        class.methods = methods;
        let constructor_params = constructor.params.clone();
        class.constructors.push(constructor);

        tracing::debug!(
            target: "nova.eventgen.synth",
            interface = %interface,
            class = %class.qualified_name(),
            fields = class.fields.len(),
            methods = class.methods.len(),
            "synthesized implementation"
        );

        Ok(ImplClass {
            interface: interface.clone(),
            class,
            constructor_params,
        })
    }

    /// Offer the property to each plugin in order; `true` once one of them takes it.
    fn run_plugins(&self, cx: &mut PropertyContext<'_>) -> Result<bool, SynthesisError> {
        for plugin in self.plugins {
            let handled = plugin
                .generate(cx)
                .map_err(|source| SynthesisError::Plugin {
                    plugin: plugin.name(),
                    property: cx.property().name().to_string(),
                    source,
                })?;
            if handled {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// `ClassName{a=<a>, b=<b>}` over all non-suppressed properties, in order.
fn to_string_method(class_name: &str, plans: &[PropertyPlan<'_>]) -> MethodDef {
    let mut parts = Vec::new();
    let mut literal = format!("{class_name}{{");
    let mut first = true;
    for plan in plans {
        let Some(value) = plan.to_string_value.clone() else {
            continue;
        };
        if !first {
            literal.push_str(", ");
        }
        first = false;
        literal.push_str(plan.property.name());
        literal.push('=');
        parts.push(Expr::string(std::mem::take(&mut literal)));
        parts.push(value);
    }
    literal.push('}');
    parts.push(Expr::string(literal));

    MethodDef::overriding("toString", TypeRef::string()).body(vec![Stmt::Return {
        value: Expr::Concat { parts },
    }])
}
