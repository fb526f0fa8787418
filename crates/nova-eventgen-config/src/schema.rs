use std::collections::BTreeMap;

use schemars::schema::{InstanceType, RootSchema, Schema, SchemaObject, StringValidation};
use schemars::schema_for;

use crate::EventGenConfig;

/// JSON schema for `eventgen.toml`, for editor tooling and CI validation.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(EventGenConfig)
}

/// `{ from = "to" }` map whose keys and values are non-empty prefixes.
pub(crate) fn directional_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> Schema {
    let mut schema: SchemaObject =
        <BTreeMap<String, String> as schemars::JsonSchema>::json_schema(generator).into();
    let prefix = Schema::from(SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        string: Some(Box::new(StringValidation {
            min_length: Some(1),
            ..StringValidation::default()
        })),
        ..SchemaObject::default()
    });
    schema.object().property_names = Some(Box::new(prefix.clone()));
    schema.object().additional_properties = Some(Box::new(prefix));
    schema.into()
}
