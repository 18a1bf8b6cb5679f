pub mod config;
pub mod error;
pub mod llm;
pub mod schema;
pub mod signature;
pub mod stability;

pub use error::{Error, Result};
pub use signature::{ModelSignature, SIGNATURE_FOR_LLM_INFERENCE_TASK, signature_for_task};
