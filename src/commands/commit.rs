use crate::editor::MessageEditor;
use crate::errors::CommitError;
use crate::git::VersionControl;
use crate::llm::{Conversation, LLMClient, Reply};
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const REJECTION_HINT: &str =
    "I don't want to use that message. Please suggest a different commit message.";

/// Everything the commit loop talks to.
pub struct Collaborators<'a> {
    pub assistant: &'a dyn LLMClient,
    pub vcs: &'a dyn VersionControl,
    pub editor: &'a dyn MessageEditor,
    pub prompter: &'a mut dyn Prompter,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommitOptions {
    /// Include unstaged changes, for both the diff and the commit.
    pub all: bool,
    /// See `SessionConfig::reject_hint`.
    pub reject_hint: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Committed { message: String },
    NothingToCommit,
}

/// What the user picked for a suggested message.
enum Decision {
    Use(String),
    Regenerate,
}

pub async fn handle_commit(ctx: Collaborators<'_>, options: CommitOptions) -> Result<Outcome> {
    let Collaborators {
        assistant,
        vcs,
        editor,
        prompter,
    } = ctx;

    vcs.ensure_repository().await?;

    let draft = ask(prompter, "Enter commit message")?;

    let diff = vcs.diff(options.all).await?;
    if diff.trim().is_empty() {
        let notice = if options.all {
            "No changes found."
        } else {
            "No staged changes found. Stage your changes first."
        };
        println!("{}", notice.yellow());
        return Ok(Outcome::NothingToCommit);
    }

    let mut conversation = Conversation::new(&draft, &diff);

    let final_message = loop {
        let response = request_reply(assistant, &conversation).await?;

        match Reply::interpret(&response) {
            Reply::Question(question) => {
                println!("\n{} {}", format!("{} asks:", assistant.name()).bold(), question);
                let answer = ask(prompter, "Your response")?;
                conversation.push_assistant(response);
                conversation.push_context(&answer);
            }
            Reply::Candidate(candidate) => {
                println!("\n{}\n{}", "Suggested commit message:".bold(), candidate.cyan());
                match choose(prompter, editor, &candidate)? {
                    Decision::Use(message) => break message,
                    Decision::Regenerate => {
                        if options.reject_hint {
                            conversation.push_assistant(response);
                            conversation.push_user(REJECTION_HINT);
                        }
                        log::debug!("suggestion rejected, requesting another");
                    }
                }
            }
        }
    };

    vcs.commit(&final_message, options.all).await?;
    println!("{}", "Commit successful!".green());
    Ok(Outcome::Committed {
        message: final_message,
    })
}

async fn request_reply(assistant: &dyn LLMClient, conversation: &Conversation) -> Result<String> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Asking {}...", assistant.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let response = assistant.call(conversation).await;
    spinner.finish_and_clear();
    response
}

fn choose(
    prompter: &mut dyn Prompter,
    editor: &dyn MessageEditor,
    candidate: &str,
) -> Result<Decision> {
    loop {
        match ask(prompter, "Use this message? (y/n/e to edit)")?.as_str() {
            "y" => return Ok(Decision::Use(candidate.to_string())),
            "n" => return Ok(Decision::Regenerate),
            "e" => {
                return edit_candidate(prompter, editor, candidate)
                    .context("Error editing message")
                    .map(Decision::Use)
            }
            _ => println!("{}", "Invalid option. Please enter y, n, or e.".yellow()),
        }
    }
}

fn edit_candidate(
    prompter: &mut dyn Prompter,
    editor: &dyn MessageEditor,
    candidate: &str,
) -> Result<String> {
    let edited = editor.edit(candidate)?;
    let edited = edited.trim();

    if edited == candidate {
        let confirm = ask(prompter, "No changes made. Use original message? (y/n)")?;
        if confirm != "y" {
            return Err(CommitError::Cancelled("edit cancelled".to_string()).into());
        }
    }
    if edited.is_empty() {
        return Err(CommitError::Cancelled("empty commit message, aborting".to_string()).into());
    }
    Ok(edited.to_string())
}

fn ask(prompter: &mut dyn Prompter, label: &str) -> Result<String> {
    prompter
        .ask(label)
        .ok_or_else(|| CommitError::Cancelled("input closed, nothing committed".to_string()).into())
}
