//! Schema literals for the chat completion payloads.

use crate::schema::{ColSpec, DataType, Object, Property, Schema, SchemaType};

/// `{role?: string, content: string}`, shared by requests and replies.
pub fn message_object() -> Object {
    Object::new(vec![
        Property::new("role", DataType::String).optional(),
        Property::new("content", DataType::String),
    ])
}

/// Item of the `choices` array; `message_field` is "message" for complete
/// choices and "delta" for streamed chunks.
fn choice_object(message_field: &str) -> Object {
    Object::new(vec![
        Property::new("index", DataType::Long).optional(),
        Property::new(message_field, message_object()),
        Property::new("finish_reason", DataType::String).optional(),
    ])
}

pub fn chain_completion_choice_object() -> Object {
    choice_object("message")
}

pub fn chain_completion_chunk_object() -> Object {
    choice_object("delta")
}

pub fn chat_completion_request_schema() -> Schema {
    Schema::new(vec![ColSpec::new(
        "messages",
        SchemaType::array(message_object()),
    )])
}

pub fn chat_completion_response_schema() -> Schema {
    Schema::new(vec![ColSpec::new(
        "choices",
        SchemaType::array(chain_completion_choice_object()),
    )])
}

/// Streaming counterpart of [`chat_completion_response_schema`]. Not
/// registered under any task.
pub fn chat_completion_chunk_schema() -> Schema {
    Schema::new(vec![ColSpec::new(
        "choices",
        SchemaType::array(chain_completion_chunk_object()),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_schema_shape() {
        let schema = chat_completion_request_schema();
        assert_eq!(schema.input_names(), vec!["messages"]);

        let col = schema.column("messages").unwrap();
        assert!(col.required);
        assert_eq!(col.dtype, SchemaType::array(message_object()));
    }

    #[test]
    fn test_message_object_required_flags() {
        let object = message_object();
        assert!(!object.property("role").unwrap().required);
        assert!(object.property("content").unwrap().required);
    }

    #[test]
    fn test_choice_and_chunk_differ_only_in_field_name() {
        let choice = chain_completion_choice_object();
        let chunk = chain_completion_chunk_object();

        let names = |o: &Object| o.properties.iter().map(|p| p.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(&choice), vec!["index", "message", "finish_reason"]);
        assert_eq!(names(&chunk), vec!["index", "delta", "finish_reason"]);

        assert_eq!(
            choice.property("message").unwrap().dtype,
            chunk.property("delta").unwrap().dtype
        );
        assert_eq!(choice.property("index"), chunk.property("index"));
        assert_eq!(choice.property("finish_reason"), chunk.property("finish_reason"));
    }
}
