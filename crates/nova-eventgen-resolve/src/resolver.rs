use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};

use nova_eventgen_model::{ancestors, Diagnostic, MethodRef, MethodSignature, TypeModel, TypeRef};

use crate::{classify, MethodRole, Property};

/// Properties of one interface plus the non-fatal findings made while resolving them.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyResolution {
    pub interface: TypeRef,
    /// One entry per property name, ordered by name.
    pub properties: Vec<Property>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PropertyResolution {
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(Property::name).collect()
    }
}

/// Resolve the canonical property set of `root`.
///
/// Never fails: unmatched accessors become read-only properties and conflicting overrides keep
/// the first-seen candidate, both reported through [`PropertyResolution::diagnostics`].
pub fn resolve_properties(model: &dyn TypeModel, root: &TypeRef) -> PropertyResolution {
    let mut resolver = Resolver {
        model,
        root,
        seen_signatures: HashSet::new(),
        accessors: BTreeMap::new(),
        mutators: BTreeMap::new(),
        diagnostics: Vec::new(),
    };

    for ty in ancestors(model, root) {
        for method in model.methods(&ty) {
            resolver.visit(method);
        }
    }

    let resolution = resolver.finish();
    tracing::debug!(
        target: "nova.eventgen.resolve",
        interface = %root,
        properties = resolution.properties.len(),
        "resolved properties"
    );
    resolution
}

struct Candidates {
    most_specific: MethodRef,
    least_specific: MethodRef,
}

struct Resolver<'a> {
    model: &'a dyn TypeModel,
    root: &'a TypeRef,
    seen_signatures: HashSet<MethodSignature>,
    accessors: BTreeMap<String, Candidates>,
    mutators: BTreeMap<String, Vec<MethodRef>>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolver<'_> {
    fn visit(&mut self, method: MethodRef) {
        if method.is_static || !self.seen_signatures.insert(method.signature()) {
            return;
        }
        // Implemented (default) methods still claim their signature above so an ancestor's
        // abstract declaration doesn't resurrect the property.
        if method.has_body {
            return;
        }

        match classify(&method) {
            MethodRole::Accessor { property } => self.record_accessor(property, method),
            MethodRole::Mutator { property } => {
                self.mutators.entry(property).or_default().push(method);
            }
            MethodRole::None => {}
        }
    }

    fn record_accessor(&mut self, property: String, method: MethodRef) {
        let model = self.model;
        let candidates = match self.accessors.entry(property) {
            Entry::Vacant(entry) => {
                entry.insert(Candidates {
                    most_specific: method.clone(),
                    least_specific: method,
                });
                return;
            }
            Entry::Occupied(entry) => entry.into_mut(),
        };

        let ty = &method.return_type;
        let most = &candidates.most_specific.return_type;
        let least = &candidates.least_specific.return_type;

        let narrows_most = model.is_subtype_of(ty, most) && !ty.same_instantiation(most);
        let widens_least = model.is_subtype_of(least, ty) && !ty.same_instantiation(least);
        let related =
            |other: &TypeRef| model.is_subtype_of(ty, other) || model.is_subtype_of(other, ty);
        let compatible = related(most) && related(least);

        if !compatible {
            self.diagnostics.push(
                Diagnostic::warning(
                    "incompatible-override",
                    format!(
                        "`{method}` is neither narrower nor wider than `{}`; keeping the latter",
                        candidates.most_specific
                    ),
                )
                .for_interface(self.root.name())
                .for_property(method.name.clone()),
            );
            return;
        }

        if narrows_most {
            candidates.most_specific = method.clone();
        }
        if widens_least {
            candidates.least_specific = method;
        }
    }

    fn finish(self) -> PropertyResolution {
        let Resolver {
            root,
            accessors,
            mutators,
            mut diagnostics,
            ..
        } = self;

        let mut properties = Vec::with_capacity(accessors.len());
        for (name, candidates) in accessors {
            let canonical = &candidates.most_specific.return_type;
            let same_named = mutators.get(&name).map(Vec::as_slice).unwrap_or_default();
            let mutator = pair_mutator(canonical, same_named);

            if mutator.is_none() {
                let diagnostic = if same_named.is_empty() {
                    Diagnostic::info(
                        "unpaired-accessor",
                        format!("`{name}` has no mutator; it is read-only"),
                    )
                } else {
                    Diagnostic::warning(
                        "unpaired-accessor",
                        format!(
                            "no mutator of `{name}` accepts `{canonical}`; it is read-only"
                        ),
                    )
                };
                diagnostics.push(diagnostic.for_interface(root.name()).for_property(&name));
            }

            // One property per name, so the accessor is always the most-specific override.
            properties.push(Property::new(
                name,
                candidates.most_specific.clone(),
                candidates.least_specific,
                candidates.most_specific,
                mutator,
            ));
        }

        PropertyResolution {
            interface: root.clone(),
            properties,
            diagnostics,
        }
    }
}

/// A mutator matches when its parameter is exactly the canonical type. Optional-wrapped
/// properties accept any same-named mutator; wrapping happens at emission time.
fn pair_mutator(canonical: &TypeRef, candidates: &[MethodRef]) -> Option<MethodRef> {
    candidates
        .iter()
        .find(|m| m.params[0].ty.same_instantiation(canonical))
        .or_else(|| {
            if canonical.is_optional() {
                candidates.first()
            } else {
                None
            }
        })
        .cloned()
}
