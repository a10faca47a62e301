//! src/cli.rs
use clap::Parser;
use std::ffi::OsString;

pub const HELP_TEXT: &str = "Usage: gitcommit [options]

Options:
  -a        Commit all changes (including unstaged)
  -help     Display this help message

When run, the program will:
1. Ask for an initial commit message
2. Get feedback from Claude
3. Present options to:
   - Accept the suggested message (y)
   - Reject it (n)
   - Edit it in your editor (e)

Environment:
  CLAUDE_API_KEY    Required API key for Claude
  CLAUDE_MODEL      Model identifier override
  CLAUDE_API_URL    Messages endpoint override
  GITCOMMIT_EDITOR  Editor command used for (e)
  GITCOMMIT_CONFIG  Path to config.toml";

/// 用 Claude 润色提交信息，确认后执行 git commit
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Commit all changes (including unstaged), same as `git commit -a`
    #[arg(short = 'a')]
    pub all: bool,

    /// Display this help message
    #[arg(short = 'h', long = "help")]
    pub help: bool,

    /// Positional arguments are not accepted; any present prints usage.
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Parses the given argv, accepting the single-dash `-help` spelling.
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Cli::parse_from(normalize_args(args))
    }

    pub fn wants_usage(&self) -> bool {
        self.help || !self.rest.is_empty()
    }
}

fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| if arg == "-help" { OsString::from("--help") } else { arg })
        .collect()
}
