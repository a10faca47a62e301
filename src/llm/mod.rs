//! src/llm/mod.rs

use anyhow::Result;
use async_trait::async_trait;

pub mod anthropic;
pub mod conversation;

pub use anthropic::AnthropicClient;
pub use conversation::{Conversation, Turn};

const FENCE: &str = "```";

/// The `LLMClient` trait defines the interface for a Large Language Model client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Returns the name of the LLM client.
    fn name(&self) -> &str;
    /// Sends the whole conversation and returns the text of the reply.
    async fn call(&self, conversation: &Conversation) -> Result<String>;
}

/// What an assistant reply amounts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A commit message found inside a fenced block.
    Candidate(String),
    /// No usable fenced block; the whole reply is relayed as a question.
    Question(String),
}

impl Reply {
    pub fn interpret(response: &str) -> Self {
        let message = extract_commit_message(response);
        if message.is_empty() {
            Reply::Question(response.trim().to_string())
        } else {
            Reply::Candidate(message)
        }
    }
}

/// Returns the trimmed text between the first two triple-backtick fences.
///
/// Empty when there is no opening fence or the block is never closed.
pub fn extract_commit_message(response: &str) -> String {
    response
        .find(FENCE)
        .and_then(|start| {
            let body = &response[start + FENCE.len()..];
            body.find(FENCE).map(|end| body[..end].trim().to_string())
        })
        .unwrap_or_default()
}
