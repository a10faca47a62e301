//! src/main.rs

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod editor;
mod errors;
mod git;
mod llm;
mod prompt;

use cli::{Cli, HELP_TEXT};
use commands::{handle_commit, Collaborators, CommitOptions};
use config::Config;
use editor::ExternalEditor;
use git::GitCli;
use llm::AnthropicClient;
use prompt::TerminalPrompter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse_args(std::env::args_os());
    if cli.wants_usage() {
        println!("{HELP_TEXT}");
        return ExitCode::SUCCESS;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            errors::exit_code_for(&err)
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let api_key = Config::api_key()?;
    let config = Config::load()?;

    let assistant = AnthropicClient::new(api_key, &config.llm)?;
    let git = GitCli::locate()?;
    let editor = ExternalEditor::new(config.session.editor.clone());
    let mut prompter = TerminalPrompter;

    let outcome = handle_commit(
        Collaborators {
            assistant: &assistant,
            vcs: &git,
            editor: &editor,
            prompter: &mut prompter,
        },
        CommitOptions {
            all: cli.all,
            reject_hint: config.session.reject_hint,
        },
    )
    .await?;
    log::debug!("finished: {outcome:?}");
    Ok(())
}
