//! Task name to signature registry.
//!
//! The table is built once and read-only afterwards. Binaries call [`init`]
//! at startup so it is not built lazily on first lookup.

mod schemas;
mod types;

pub use schemas::*;
pub use types::ModelSignature;

use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

pub const LLM_V1_CHAT: &str = "llm/v1/chat";

pub static SIGNATURE_FOR_LLM_INFERENCE_TASK: LazyLock<HashMap<&'static str, ModelSignature>> =
    LazyLock::new(|| {
        HashMap::from([(
            LLM_V1_CHAT,
            ModelSignature::new(
                chat_completion_request_schema(),
                chat_completion_response_schema(),
            ),
        )])
    });

/// Builds the registry. Calling it more than once is a no-op.
pub fn init() {
    let table = LazyLock::force(&SIGNATURE_FOR_LLM_INFERENCE_TASK);
    debug!("Signature registry ready with {} task(s)", table.len());
}

pub fn signature_for_task(task: &str) -> Result<&'static ModelSignature> {
    SIGNATURE_FOR_LLM_INFERENCE_TASK
        .get(task)
        .ok_or_else(|| Error::unknown_task(task))
}

/// Registered task names, sorted.
pub fn tasks() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SIGNATURE_FOR_LLM_INFERENCE_TASK.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chat_task_registered() {
        init();
        let signature = signature_for_task(LLM_V1_CHAT).unwrap();
        assert_eq!(signature.inputs, chat_completion_request_schema());
        assert_eq!(signature.outputs, chat_completion_response_schema());
        assert_eq!(tasks(), vec![LLM_V1_CHAT]);
    }

    #[test]
    fn test_unknown_task() {
        let err = signature_for_task("llm/v2/unknown").unwrap_err();
        match err {
            Error::UnknownTask { task } => assert_eq!(task, "llm/v2/unknown"),
            other => panic!("expected UnknownTask, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_returns_shared_instance() {
        let first = signature_for_task(LLM_V1_CHAT).unwrap();
        let second = signature_for_task(LLM_V1_CHAT).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
