use crate::stability::{self, Annotated, Stability};
use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_QUESTION: &str = "What is mlflow?";
const DEFAULT_ANSWER: &str =
    "MLflow is an open source platform for the machine learning lifecycle.";

/// One turn of a chat exchange. `role` is usually "system", "user" or
/// "assistant".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::user(DEFAULT_QUESTION)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCompletionRequest {
    pub messages: Vec<Message>,
}

impl ChatCompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl Default for ChatCompletionRequest {
    fn default() -> Self {
        Self::new(vec![Message::default()])
    }
}

/// A chat request with the latest question split from the prior turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitChatMessagesRequest {
    pub query: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub history: Vec<Message>,
}

/// `history` may be sent as `null`, which decodes to no prior turns.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Message>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Message>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SplitChatMessagesRequest {
    pub fn new(query: impl Into<String>, history: Vec<Message>) -> Self {
        Self {
            query: query.into(),
            history,
        }
    }
}

impl Default for SplitChatMessagesRequest {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION, Vec::new())
    }
}

/// Former name of [`SplitChatMessagesRequest`]. Constructing one, including
/// decoding it from JSON, logs a deprecation warning.
#[deprecated(since = "2.13.1", note = "use `SplitChatMessagesRequest` instead")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SplitChatMessagesRequest")]
pub struct MultiturnChatRequest {
    pub query: String,
    pub history: Vec<Message>,
}

#[allow(deprecated)]
impl MultiturnChatRequest {
    pub fn new(query: impl Into<String>, history: Vec<Message>) -> Self {
        stability::surface::<Self>();
        Self {
            query: query.into(),
            history,
        }
    }
}

#[allow(deprecated)]
impl Default for MultiturnChatRequest {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTION, Vec::new())
    }
}

#[allow(deprecated)]
impl From<SplitChatMessagesRequest> for MultiturnChatRequest {
    fn from(request: SplitChatMessagesRequest) -> Self {
        Self::new(request.query, request.history)
    }
}

#[allow(deprecated)]
impl From<MultiturnChatRequest> for SplitChatMessagesRequest {
    fn from(request: MultiturnChatRequest) -> Self {
        Self {
            query: request.query,
            history: request.history,
        }
    }
}

/// A complete candidate reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainCompletionChoice {
    pub index: i64,
    pub message: Message,
    pub finish_reason: String,
}

impl ChainCompletionChoice {
    pub fn new(index: i64, message: Message) -> Self {
        Self {
            index,
            message,
            finish_reason: "stop".to_string(),
        }
    }
}

impl Default for ChainCompletionChoice {
    fn default() -> Self {
        Self::new(0, Message::assistant(DEFAULT_ANSWER))
    }
}

/// A streamed partial reply. Same shape as [`ChainCompletionChoice`] with
/// the message under `delta`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainCompletionChunk {
    pub index: i64,
    pub delta: Message,
    pub finish_reason: String,
}

impl ChainCompletionChunk {
    pub fn new(index: i64, delta: Message) -> Self {
        Self {
            index,
            delta,
            finish_reason: "stop".to_string(),
        }
    }
}

impl Default for ChainCompletionChunk {
    fn default() -> Self {
        Self::new(0, Message::assistant(DEFAULT_ANSWER))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChainCompletionChoice>,
    pub object: String,
}

impl ChatCompletionResponse {
    pub fn new(choices: Vec<ChainCompletionChoice>) -> Self {
        Self {
            choices,
            object: "chat.completion".to_string(),
        }
    }
}

impl Default for ChatCompletionResponse {
    fn default() -> Self {
        Self::new(vec![ChainCompletionChoice::default()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringResponse {
    pub content: String,
}

impl StringResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Default for StringResponse {
    fn default() -> Self {
        Self::new(DEFAULT_ANSWER)
    }
}

macro_rules! experimental {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Annotated for $ty {
                const NAME: &'static str = stringify!($ty);
                const STABILITY: Stability = Stability::Experimental;
            }
        )*
    };
}

experimental!(
    Message,
    ChatCompletionRequest,
    SplitChatMessagesRequest,
    ChainCompletionChoice,
    ChainCompletionChunk,
    ChatCompletionResponse,
    StringResponse,
);

#[allow(deprecated)]
impl Annotated for MultiturnChatRequest {
    const NAME: &'static str = "MultiturnChatRequest";
    const STABILITY: Stability = Stability::Deprecated {
        since: "2.13.1",
        note: "Use `SplitChatMessagesRequest` instead.",
    };
}
