use super::types::{ColSpec, DataType, Object, Schema, SchemaType};
use crate::{Error, Result, config::ValidationConfig};
use serde_json::Value;
use tracing::debug;

/// Checks a JSON payload against a [`Schema`].
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, schema: &Schema, payload: &Value) -> Result<()>;
}

/// Structural validator over `serde_json::Value` payloads.
///
/// Named schemas expect a JSON object keyed by column name; top-level keys
/// not declared in the schema are ignored. A schema with a single unnamed
/// column validates the payload directly, several unnamed columns expect a
/// positional JSON array. `null` counts as absent.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaValidator {
    allow_extra_properties: bool,
}

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            allow_extra_properties: config.allow_extra_properties,
        }
    }

    /// Accept object properties that the schema does not declare.
    pub fn allow_extra_properties(mut self, allow: bool) -> Self {
        self.allow_extra_properties = allow;
        self
    }

    fn validate_named(&self, schema: &Schema, payload: &Value) -> Result<()> {
        let map = payload.as_object().ok_or_else(|| {
            Error::validation("$", format!("expected object, got {}", kind(payload)))
        })?;

        for col in &schema.inputs {
            let Some(name) = col.name.as_deref() else {
                continue;
            };
            self.validate_column(col, map.get(name), name)?;
        }

        for key in map.keys() {
            if schema.column(key).is_none() {
                debug!("Ignoring column '{}' not declared in schema", key);
            }
        }
        Ok(())
    }

    fn validate_unnamed(&self, schema: &Schema, payload: &Value) -> Result<()> {
        if let [col] = schema.inputs.as_slice() {
            return self.validate_column(col, Some(payload), "$");
        }

        let items = payload.as_array().ok_or_else(|| {
            Error::validation("$", format!("expected array, got {}", kind(payload)))
        })?;
        if items.len() > schema.inputs.len() {
            return Err(Error::validation(
                "$",
                format!(
                    "expected at most {} values, got {}",
                    schema.inputs.len(),
                    items.len()
                ),
            ));
        }
        for (i, col) in schema.inputs.iter().enumerate() {
            self.validate_column(col, items.get(i), &format!("$[{}]", i))?;
        }
        Ok(())
    }

    fn validate_column(&self, col: &ColSpec, value: Option<&Value>, path: &str) -> Result<()> {
        match value {
            None | Some(Value::Null) if col.required => {
                Err(Error::validation(path, "missing required column"))
            }
            None | Some(Value::Null) => Ok(()),
            Some(value) => self.check(&col.dtype, value, path),
        }
    }

    fn check(&self, dtype: &SchemaType, value: &Value, path: &str) -> Result<()> {
        match dtype {
            SchemaType::Primitive(dtype) => check_primitive(*dtype, value, path),
            SchemaType::Array(items) => {
                let values = value.as_array().ok_or_else(|| {
                    Error::validation(path, format!("expected array, got {}", kind(value)))
                })?;
                for (i, item) in values.iter().enumerate() {
                    self.check(items, item, &format!("{}[{}]", path, i))?;
                }
                Ok(())
            }
            SchemaType::Object(object) => self.check_object(object, value, path),
        }
    }

    fn check_object(&self, object: &Object, value: &Value, path: &str) -> Result<()> {
        let map = value.as_object().ok_or_else(|| {
            Error::validation(path, format!("expected object, got {}", kind(value)))
        })?;

        for property in &object.properties {
            let child = format!("{}.{}", path, property.name);
            match map.get(&property.name) {
                None | Some(Value::Null) if property.required => {
                    return Err(Error::validation(child, "missing required property"));
                }
                None | Some(Value::Null) => {}
                Some(inner) => self.check(&property.dtype, inner, &child)?,
            }
        }

        if !self.allow_extra_properties {
            if let Some(key) = map.keys().find(|key| object.property(key).is_none()) {
                return Err(Error::validation(
                    format!("{}.{}", path, key),
                    "property not defined in schema",
                ));
            }
        }
        Ok(())
    }
}

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema: &Schema, payload: &Value) -> Result<()> {
        if schema.inputs.is_empty() {
            return Ok(());
        }
        if schema.has_input_names() {
            self.validate_named(schema, payload)
        } else {
            self.validate_unnamed(schema, payload)
        }
    }
}

fn check_primitive(dtype: DataType, value: &Value, path: &str) -> Result<()> {
    let ok = match dtype {
        DataType::Boolean => value.is_boolean(),
        DataType::Integer => value
            .as_i64()
            .is_some_and(|n| i32::try_from(n).is_ok()),
        DataType::Long => value.as_i64().is_some(),
        DataType::Float | DataType::Double => value.is_number(),
        DataType::String | DataType::Binary | DataType::Datetime => value.is_string(),
    };
    if ok {
        Ok(())
    } else {
        Err(Error::validation(
            path,
            format!("expected {}, got {}", dtype, kind(value)),
        ))
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColSpec, Property};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn message_schema() -> Schema {
        Schema::new(vec![ColSpec::new(
            "messages",
            SchemaType::array(Object::new(vec![
                Property::new("role", DataType::String).optional(),
                Property::new("content", DataType::String),
            ])),
        )])
    }

    fn path_of(result: Result<()>) -> String {
        match result {
            Err(Error::Validation { path, .. }) => path,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_valid_payload() {
        let validator = JsonSchemaValidator::new();
        let payload = json!({"messages": [{"role": "user", "content": "hi"}]});
        validator.validate(&message_schema(), &payload).unwrap();
    }

    #[test]
    fn test_optional_property_may_be_absent_or_null() {
        let validator = JsonSchemaValidator::new();
        let schema = message_schema();
        validator
            .validate(&schema, &json!({"messages": [{"content": "hi"}]}))
            .unwrap();
        validator
            .validate(&schema, &json!({"messages": [{"role": null, "content": "hi"}]}))
            .unwrap();
    }

    #[test]
    fn test_rejects_missing_required_property() {
        let validator = JsonSchemaValidator::new();
        let result = validator.validate(&message_schema(), &json!({"messages": [{"role": "user"}]}));
        assert_eq!(path_of(result), "messages[0].content");
    }

    #[test]
    fn test_rejects_missing_column() {
        let validator = JsonSchemaValidator::new();
        let result = validator.validate(&message_schema(), &json!({"prompt": "hi"}));
        assert_eq!(path_of(result), "messages");
    }

    #[test]
    fn test_extra_properties() {
        let payload = json!({"messages": [{"content": "hi", "name": "igor"}]});
        let strict = JsonSchemaValidator::new();
        assert_eq!(
            path_of(strict.validate(&message_schema(), &payload)),
            "messages[0].name"
        );

        let lenient = JsonSchemaValidator::new().allow_extra_properties(true);
        lenient.validate(&message_schema(), &payload).unwrap();
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let validator = JsonSchemaValidator::new();
        let payload = json!({"messages": [], "object": "chat.completion"});
        validator.validate(&message_schema(), &payload).unwrap();
    }

    #[rstest]
    #[case(DataType::String, json!("hi"), true)]
    #[case(DataType::String, json!(1), false)]
    #[case(DataType::Long, json!(7), true)]
    #[case(DataType::Long, json!(1.5), false)]
    #[case(DataType::Long, json!("7"), false)]
    #[case(DataType::Integer, json!(2_147_483_647_i64), true)]
    #[case(DataType::Integer, json!(2_147_483_648_i64), false)]
    #[case(DataType::Double, json!(1.5), true)]
    #[case(DataType::Float, json!(3), true)]
    #[case(DataType::Boolean, json!(true), true)]
    #[case(DataType::Boolean, json!(0), false)]
    #[case(DataType::Datetime, json!("2024-01-01T00:00:00Z"), true)]
    #[case(DataType::Binary, json!([1, 2]), false)]
    fn test_primitive_types(#[case] dtype: DataType, #[case] value: Value, #[case] ok: bool) {
        assert_eq!(check_primitive(dtype, &value, "$").is_ok(), ok);
    }

    #[test]
    fn test_type_mismatch_reason() {
        let validator = JsonSchemaValidator::new();
        let result = validator.validate(&message_schema(), &json!({"messages": {"content": "hi"}}));
        match result {
            Err(Error::Validation { path, reason }) => {
                assert_eq!(path, "messages");
                assert_eq!(reason, "expected array, got object");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unnamed_columns() {
        let validator = JsonSchemaValidator::new();
        let single = Schema::new(vec![ColSpec::unnamed(DataType::String)]);
        validator.validate(&single, &json!("hello")).unwrap();
        assert!(validator.validate(&single, &json!(5)).is_err());

        let pair = Schema::new(vec![
            ColSpec::unnamed(DataType::String),
            ColSpec::unnamed(DataType::Long).optional(),
        ]);
        validator.validate(&pair, &json!(["a", 1])).unwrap();
        validator.validate(&pair, &json!(["a"])).unwrap();
        assert_eq!(path_of(validator.validate(&pair, &json!([]))), "$[0]");
        assert!(validator.validate(&pair, &json!(["a", 1, 2])).is_err());
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        let validator = JsonSchemaValidator::new();
        validator.validate(&Schema::default(), &json!(42)).unwrap();
    }

    #[test]
    fn test_from_config() {
        let config = ValidationConfig {
            allow_extra_properties: true,
        };
        let validator = JsonSchemaValidator::from_config(&config);
        let payload = json!({"messages": [{"content": "hi", "extra": 1}]});
        validator.validate(&message_schema(), &payload).unwrap();
    }
}
