//! src/llm/conversation.rs

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Ordered, append-only record of one commit-message dialogue.
///
/// It always opens with the user's draft and diff, and every request sends
/// the full list, so the assistant sees earlier questions and answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(draft: &str, diff: &str) -> Self {
        Self {
            turns: vec![Turn {
                role: Role::User,
                content: initial_prompt(draft, diff),
            }],
        }
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    /// Records an answer to a clarifying question.
    pub fn push_context(&mut self, answer: &str) {
        self.push_user(format!("Additional context: {answer}"));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    fn push(&mut self, role: Role, content: String) {
        self.turns.push(Turn { role, content });
    }
}

fn initial_prompt(draft: &str, diff: &str) -> String {
    format!(
        "Help me write a better git commit message. Here's my original message:\n\"{draft}\"\n\nHere are the changes:\n{diff}"
    )
}
