use serde_json::{Map, Value, json};
use std::fmt;

/// Primitive column and property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    String,
    Binary,
    Datetime,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Binary => "binary",
            Self::Datetime => "datetime",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Primitive(DataType),
    Array(Box<SchemaType>),
    Object(Object),
}

impl SchemaType {
    pub fn array(items: impl Into<SchemaType>) -> Self {
        Self::Array(Box::new(items.into()))
    }

    pub fn object(properties: Vec<Property>) -> Self {
        Self::Object(Object::new(properties))
    }

    /// Name used in the JSON rendering ("string", "array", "object", ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Primitive(dtype) => dtype.as_str(),
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// JSON rendering without name or required flag.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Primitive(dtype) => json!({ "type": dtype.as_str() }),
            Self::Array(items) => json!({ "type": "array", "items": items.to_json() }),
            Self::Object(object) => object.to_json(),
        }
    }
}

impl From<DataType> for SchemaType {
    fn from(dtype: DataType) -> Self {
        Self::Primitive(dtype)
    }
}

impl From<Object> for SchemaType {
    fn from(object: Object) -> Self {
        Self::Object(object)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(dtype) => write!(f, "{}", dtype),
            Self::Array(items) => write!(f, "Array({})", items),
            Self::Object(object) => write!(f, "{}", object),
        }
    }
}

/// A named member of an [`Object`]. Required unless marked otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub dtype: SchemaType,
    pub required: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, dtype: impl Into<SchemaType>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
            required: true,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    fn to_json(&self) -> Value {
        let mut value = self.dtype.to_json();
        if let Value::Object(ref mut map) = value {
            map.insert("required".to_string(), Value::Bool(self.required));
        }
        value
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.required { "required" } else { "optional" };
        write!(f, "{}: {} ({})", self.name, self.dtype, flag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub properties: Vec<Property>,
}

impl Object {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.to_json()))
            .collect();
        json!({ "type": "object", "properties": properties })
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, property) in self.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", property)?;
        }
        write!(f, "}}")
    }
}

/// One top-level column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColSpec {
    pub name: Option<String>,
    pub dtype: SchemaType,
    pub required: bool,
}

impl ColSpec {
    pub fn new(name: impl Into<String>, dtype: impl Into<SchemaType>) -> Self {
        Self {
            name: Some(name.into()),
            dtype: dtype.into(),
            required: true,
        }
    }

    pub fn unnamed(dtype: impl Into<SchemaType>) -> Self {
        Self {
            name: None,
            dtype: dtype.into(),
            required: true,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn optional(self) -> Self {
        self.required(false)
    }

    pub fn to_json(&self) -> Value {
        let mut value = self.dtype.to_json();
        if let Value::Object(ref mut map) = value {
            if let Some(ref name) = self.name {
                map.insert("name".to_string(), Value::String(name.clone()));
            }
            map.insert("required".to_string(), Value::Bool(self.required));
        }
        value
    }
}

impl fmt::Display for ColSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = if self.required { "required" } else { "optional" };
        match self.name {
            Some(ref name) => write!(f, "'{}': {} ({})", name, self.dtype, flag),
            None => write!(f, "{} ({})", self.dtype, flag),
        }
    }
}

/// An ordered list of column specifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub inputs: Vec<ColSpec>,
}

impl Schema {
    pub fn new(inputs: Vec<ColSpec>) -> Self {
        Self { inputs }
    }

    pub fn column(&self, name: &str) -> Option<&ColSpec> {
        self.inputs
            .iter()
            .find(|col| col.name.as_deref() == Some(name))
    }

    pub fn has_input_names(&self) -> bool {
        !self.inputs.is_empty() && self.inputs.iter().all(|col| col.name.is_some())
    }

    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().filter_map(|col| col.name.as_deref()).collect()
    }

    pub fn required_input_names(&self) -> Vec<&str> {
        self.inputs
            .iter()
            .filter(|col| col.required)
            .filter_map(|col| col.name.as_deref())
            .collect()
    }

    /// Renders the schema as a JSON array of column dicts.
    pub fn to_json(&self) -> Value {
        Value::Array(self.inputs.iter().map(ColSpec::to_json).collect())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, col) in self.inputs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", col)?;
        }
        write!(f, "]")
    }
}
