//! Event implementation generator.
//!
//! [`EventGenerator`] runs the per-interface pipeline (base class, property resolution, sorting,
//! synthesis) over a [`TypeModel`](nova_eventgen_model::TypeModel) and aggregates every
//! successful implementation into one factory class. Failures are reported as
//! [`Diagnostic`](nova_eventgen_model::Diagnostic)s and only withhold the interface they concern.

#![forbid(unsafe_code)]

mod generator;

pub use crate::generator::{EventGenerator, GenerationOutput};

pub use nova_eventgen_config as config;
pub use nova_eventgen_model as model;
pub use nova_eventgen_synth as synth;
