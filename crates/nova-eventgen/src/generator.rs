use nova_eventgen_config::EventGenConfig;
use nova_eventgen_model::{resolve_base_class, Diagnostic, Severity, TypeModel, TypeRef};
use nova_eventgen_resolve::resolve_properties;
use nova_eventgen_sort::{sort_properties, SortPolicy};
use nova_eventgen_synth::{
    Backend, FactoryClass, FactoryOptions, FactorySynthesizer, ImplClass, ImplSynthesizer,
    SynthesisOptions, SynthesisPlugin, TransformAccessorPlugin,
};
use rayon::prelude::*;

/// Everything produced by one [`EventGenerator::generate`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutput {
    /// One implementation per interface that generated cleanly, in input order.
    pub classes: Vec<ImplClass>,
    pub factory: FactoryClass,
    /// Per-interface diagnostics in input order, followed by the factory's.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Lower every implementation and then the factory.
    pub fn render<B: Backend>(&self, backend: &B) -> Vec<B::Output> {
        self.classes
            .iter()
            .map(|imp| &imp.class)
            .chain(std::iter::once(&self.factory.class))
            .map(|class| backend.lower(class))
            .collect()
    }
}

pub struct EventGenerator {
    parallel: bool,
    sort_policy: SortPolicy,
    options: SynthesisOptions,
    factory: FactoryOptions,
    plugins: Vec<Box<dyn SynthesisPlugin>>,
}

impl EventGenerator {
    /// A generator with the built-in [`TransformAccessorPlugin`] registered.
    pub fn new(config: EventGenConfig) -> Self {
        Self {
            parallel: config.parallel,
            sort_policy: config.sort_policy(),
            options: config.synthesis_options(),
            factory: config.factory_options(),
            plugins: vec![Box::new(TransformAccessorPlugin)],
        }
    }

    /// Register `plugin` after the ones already present.
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl SynthesisPlugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn generate(
        &self,
        model: &(dyn TypeModel + Sync),
        interfaces: &[TypeRef],
    ) -> GenerationOutput {
        // A malformed policy is fatal for every interface, but each one still gets reported.
        let policy = self.sort_policy.validate().map_err(|err| err.to_diagnostic());

        let run = |interface: &TypeRef| match &policy {
            Ok(()) => self.generate_one(model, interface),
            Err(diagnostic) => (
                None,
                vec![diagnostic.clone().for_interface(interface.name())],
            ),
        };
        let outcomes: Vec<(Option<ImplClass>, Vec<Diagnostic>)> = if self.parallel {
            interfaces.par_iter().map(run).collect()
        } else {
            interfaces.iter().map(run).collect()
        };

        let mut classes = Vec::new();
        let mut diagnostics = Vec::new();
        for (class, mut found) in outcomes {
            classes.extend(class);
            diagnostics.append(&mut found);
        }

        let factory = FactorySynthesizer::new(model, &self.factory).synthesize(&classes);
        diagnostics.extend(factory.diagnostics.iter().cloned());

        tracing::info!(
            target: "nova.eventgen",
            interfaces = interfaces.len(),
            generated = classes.len(),
            diagnostics = diagnostics.len(),
            parallel = self.parallel,
            "generation finished"
        );

        GenerationOutput {
            classes,
            factory,
            diagnostics,
        }
    }

    /// The whole pipeline for one interface. Any error withholds this interface's class only.
    fn generate_one(
        &self,
        model: &dyn TypeModel,
        interface: &TypeRef,
    ) -> (Option<ImplClass>, Vec<Diagnostic>) {
        let _span =
            tracing::debug_span!(target: "nova.eventgen", "interface", name = %interface).entered();

        if !model.is_interface(interface) {
            let diagnostic = Diagnostic::error(
                "not-an-interface",
                format!("`{interface}` is not an interface known to the type model"),
            )
            .for_interface(interface.name());
            return (None, vec![diagnostic]);
        }

        let base = match resolve_base_class(model, interface) {
            Ok(base) => base,
            Err(err) => return (None, vec![err.to_diagnostic(interface)]),
        };

        let resolution = resolve_properties(model, interface);
        let mut diagnostics = resolution.diagnostics;
        let sorted = sort_properties(&resolution.properties, &self.sort_policy);

        let synthesized = ImplSynthesizer::new(model, &self.options)
            .with_plugins(&self.plugins)
            .synthesize(interface, &sorted, &base);
        match synthesized {
            Ok(class) => {
                tracing::debug!(
                    target: "nova.eventgen",
                    class = %class.class.qualified_name(),
                    base = %base.ty,
                    properties = sorted.len(),
                    "generated implementation"
                );
                (Some(class), diagnostics)
            }
            Err(err) => {
                tracing::debug!(target: "nova.eventgen", error = %err, "synthesis failed");
                diagnostics.push(err.to_diagnostic(interface));
                (None, diagnostics)
            }
        }
    }
}
