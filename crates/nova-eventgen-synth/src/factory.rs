use std::collections::HashSet;

use nova_eventgen_model::well_known::annotations::FACTORY_METHOD;
use nova_eventgen_model::{Annotated, Diagnostic, TypeModel, TypeRef, Visibility};

use crate::ir::{ClassDef, ConstructorDef, Expr, MethodDef, ParamDef, Stmt};
use crate::ImplClass;

pub const DEFAULT_FACTORY_CLASS: &str = "EventFactory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryOptions {
    pub package: Option<String>,
    pub class_name: String,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            package: None,
            class_name: DEFAULT_FACTORY_CLASS.to_string(),
        }
    }
}

/// The aggregated factory plus anything noteworthy found while assembling it.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryClass {
    pub class: ClassDef,
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds the single factory class exposing one creation method per implementation.
pub struct FactorySynthesizer<'a> {
    model: &'a dyn TypeModel,
    options: &'a FactoryOptions,
}

impl<'a> FactorySynthesizer<'a> {
    pub fn new(model: &'a dyn TypeModel, options: &'a FactoryOptions) -> Self {
        Self { model, options }
    }

    pub fn synthesize(&self, classes: &[ImplClass]) -> FactoryClass {
        let mut class = ClassDef::new(self.options.package.clone(), &self.options.class_name);
        class.is_final = true;
        class.constructors.push(ConstructorDef {
            visibility: Visibility::Private,
            params: Vec::new(),
            body: Vec::new(),
        });

        let mut seen = HashSet::new();
        let mut diagnostics = Vec::new();

        for imp in classes {
            let mut create = create_method(imp);
            if !seen.insert(signature(&create)) {
                let renamed = qualified_create_name(&imp.interface, &seen, &create);
                diagnostics.push(
                    Diagnostic::info(
                        "factory-method-renamed",
                        format!(
                            "factory method `{}` clashes with an earlier one; exposed as `{renamed}`",
                            create.name
                        ),
                    )
                    .for_interface(imp.interface.name()),
                );
                create.name = renamed;
                seen.insert(signature(&create));
            }
            class.methods.push(create);

            for forwarded in self.forwarded_methods(&imp.interface) {
                if seen.insert(signature(&forwarded)) {
                    class.methods.push(forwarded);
                } else {
                    diagnostics.push(
                        Diagnostic::warning(
                            "duplicate-factory-method",
                            format!(
                                "factory method `{}` clashes with an earlier one and was skipped",
                                forwarded.name
                            ),
                        )
                        .for_interface(imp.interface.name()),
                    );
                }
            }
        }

        tracing::debug!(
            target: "nova.eventgen.synth",
            class = %class.qualified_name(),
            methods = class.methods.len(),
            "synthesized factory"
        );

        FactoryClass { class, diagnostics }
    }

    /// Static interface methods marked `@FactoryMethod`, re-exposed unchanged.
    fn forwarded_methods(&self, interface: &TypeRef) -> Vec<MethodDef> {
        self.model
            .methods(interface)
            .into_iter()
            .filter(|m| m.is_static && m.is_public() && m.has_annotation(FACTORY_METHOD))
            .map(|m| {
                let params: Vec<ParamDef> = m
                    .params
                    .iter()
                    .map(|p| ParamDef::new(&p.name, p.ty.clone()))
                    .collect();
                let args = params.iter().map(|p| Expr::param(&p.name)).collect();
                let call = Expr::InvokeStatic {
                    owner: interface.clone(),
                    method: m.name.clone(),
                    args,
                };
                let body = if m.return_type.is_void() {
                    Stmt::Expr { value: call }
                } else {
                    Stmt::Return { value: call }
                };
                MethodDef {
                    name: m.name.clone(),
                    visibility: Visibility::Public,
                    is_static: true,
                    overrides: false,
                    return_type: m.return_type.clone(),
                    params,
                    body: vec![body],
                }
            })
            .collect()
    }
}

type Signature = (String, Vec<TypeRef>);

fn signature(method: &MethodDef) -> Signature {
    (
        method.name.clone(),
        method.params.iter().map(|p| p.ty.clone()).collect(),
    )
}

/// `create` followed by every segment of the qualified interface name, e.g.
/// `test.b.PingEvent` becomes `createTestBPingEvent`. A numeric suffix is added if even
/// that is taken.
fn qualified_create_name(
    interface: &TypeRef,
    seen: &HashSet<Signature>,
    create: &MethodDef,
) -> String {
    let mut base = String::from("create");
    for segment in interface.name().split(['.', '$']) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            base.extend(first.to_uppercase());
            base.push_str(chars.as_str());
        }
    }
    let params: Vec<TypeRef> = create.params.iter().map(|p| p.ty.clone()).collect();
    let mut candidate = base.clone();
    let mut n = 2;
    while seen.contains(&(candidate.clone(), params.clone())) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    candidate
}

/// `public static <Iface> create<Iface>(<ctor params>) { return new <Impl>(<ctor params>); }`
fn create_method(imp: &ImplClass) -> MethodDef {
    let args = imp
        .constructor_params
        .iter()
        .map(|p| Expr::param(&p.name))
        .collect();
    MethodDef {
        name: format!("create{}", imp.interface.simple_name()),
        visibility: Visibility::Public,
        is_static: true,
        overrides: false,
        return_type: imp.interface.clone(),
        params: imp.constructor_params.clone(),
        body: vec![Stmt::Return {
            value: Expr::New {
                ty: imp.type_ref(),
                args,
            },
        }],
    }
}
