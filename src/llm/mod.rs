mod types;

#[allow(deprecated)]
pub use types::{
    ChainCompletionChoice, ChainCompletionChunk, ChatCompletionRequest, ChatCompletionResponse,
    Message, MultiturnChatRequest, SplitChatMessagesRequest, StringResponse,
};
