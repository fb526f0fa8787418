use nova_eventgen::config::EventGenConfig;
use nova_eventgen::model::Severity;
use nova_eventgen::{EventGenerator, GenerationOutput};

mod pipeline;

pub(crate) fn generator() -> EventGenerator {
    EventGenerator::new(EventGenConfig::default())
}

/// `(severity, code, interface)` for every diagnostic, in output order.
pub(crate) fn summary(output: &GenerationOutput) -> Vec<(Severity, &'static str, String)> {
    output
        .diagnostics
        .iter()
        .map(|d| (d.severity, d.code, d.interface.clone().unwrap_or_default()))
        .collect()
}

pub(crate) fn class_names(output: &GenerationOutput) -> Vec<String> {
    output
        .classes
        .iter()
        .map(|imp| imp.class.qualified_name())
        .collect()
}
