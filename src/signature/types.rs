use crate::{
    Result,
    schema::{Schema, SchemaValidator},
};
use serde_json::{Value, json};
use std::fmt;

/// Pairs the schema of a model's inference request with the schema of its
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSignature {
    pub inputs: Schema,
    pub outputs: Schema,
}

impl ModelSignature {
    pub fn new(inputs: Schema, outputs: Schema) -> Self {
        Self { inputs, outputs }
    }

    pub fn validate_inputs(&self, validator: &dyn SchemaValidator, payload: &Value) -> Result<()> {
        validator.validate(&self.inputs, payload)
    }

    pub fn validate_outputs(&self, validator: &dyn SchemaValidator, payload: &Value) -> Result<()> {
        validator.validate(&self.outputs, payload)
    }

    pub fn to_json(&self) -> Value {
        json!({
            "inputs": self.inputs.to_json(),
            "outputs": self.outputs.to_json(),
        })
    }
}

impl fmt::Display for ModelSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "inputs:")?;
        writeln!(f, "  {}", self.inputs)?;
        writeln!(f, "outputs:")?;
        write!(f, "  {}", self.outputs)
    }
}
