use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use llm_signatures::{
    config,
    llm::{
        ChainCompletionChoice, ChainCompletionChunk, ChatCompletionRequest, ChatCompletionResponse,
        Message, SplitChatMessagesRequest, StringResponse,
    },
    schema::JsonSchemaValidator,
    signature,
};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{error, info};

/// Inspect LLM inference task signatures and validate payloads against them
#[derive(Parser, Debug)]
#[command(name = "llm-signatures")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered task identifiers
    Tasks,

    /// Print the input and output schemas of a task
    Show {
        /// Task identifier, e.g. llm/v1/chat
        task: String,
    },

    /// Print the default JSON payload of a record type
    Example {
        #[arg(value_enum)]
        record: Record,
    },

    /// Validate a JSON payload file against a task signature
    Validate {
        /// Task identifier, e.g. llm/v1/chat
        task: String,

        /// Path to the JSON payload
        file: PathBuf,

        /// Which side of the signature to check
        #[arg(short, long, value_enum, default_value = "input")]
        side: Side,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    Input,
    Output,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Record {
    Message,
    ChatCompletionRequest,
    SplitChatMessagesRequest,
    MultiturnChatRequest,
    ChainCompletionChoice,
    ChainCompletionChunk,
    ChatCompletionResponse,
    StringResponse,
}

impl Record {
    #[allow(deprecated)]
    fn example(self) -> serde_json::Result<Value> {
        match self {
            Self::Message => serde_json::to_value(Message::default()),
            Self::ChatCompletionRequest => serde_json::to_value(ChatCompletionRequest::default()),
            Self::SplitChatMessagesRequest => {
                serde_json::to_value(SplitChatMessagesRequest::default())
            }
            Self::MultiturnChatRequest => {
                serde_json::to_value(llm_signatures::llm::MultiturnChatRequest::default())
            }
            Self::ChainCompletionChoice => serde_json::to_value(ChainCompletionChoice::default()),
            Self::ChainCompletionChunk => serde_json::to_value(ChainCompletionChunk::default()),
            Self::ChatCompletionResponse => serde_json::to_value(ChatCompletionResponse::default()),
            Self::StringResponse => serde_json::to_value(StringResponse::default()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = config::validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .context("Failed to build log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    signature::init();

    match cli.command {
        Commands::Tasks => {
            for task in signature::tasks() {
                println!("{}", task);
            }
        }
        Commands::Show { task } => {
            let signature = signature::signature_for_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&signature.to_json())?);
        }
        Commands::Example { record } => {
            println!("{}", serde_json::to_string_pretty(&record.example()?)?);
        }
        Commands::Validate { task, file, side } => {
            let signature = signature::signature_for_task(&task)?;
            let payload_str = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read payload {}", file.display()))?;
            let payload: Value = serde_json::from_str(&payload_str)
                .with_context(|| format!("Payload {} is not valid JSON", file.display()))?;

            let validator = JsonSchemaValidator::from_config(&config.validation);
            let result = match side {
                Side::Input => signature.validate_inputs(&validator, &payload),
                Side::Output => signature.validate_outputs(&validator, &payload),
            };

            match result {
                Ok(()) => {
                    info!("Payload {} matches {} {:?} schema", file.display(), task, side);
                    println!("ok");
                }
                Err(e) => {
                    error!("Payload {} rejected: {}", file.display(), e);
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
