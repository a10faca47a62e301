//! src/editor.rs

use crate::errors::CommitError;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Lets the user rework a message by hand.
pub trait MessageEditor {
    /// Returns the file content as the user left it.
    fn edit(&self, message: &str) -> Result<String>;
}

/// Opens a terminal editor on a temporary file.
///
/// `command` may carry arguments (`"code --wait"`). Without one the `edit`
/// crate picks the editor from `$VISUAL`/`$EDITOR` and its own fallbacks.
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    command: Option<String>,
}

impl ExternalEditor {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    fn launch(&self, path: &Path) -> Result<()> {
        let Some(command) = &self.command else {
            return edit::edit_file(path).map_err(|e| {
                CommitError::Editor {
                    editor: "$EDITOR".to_string(),
                    reason: e.to_string(),
                }
                .into()
            });
        };

        let mut parts = command.split_whitespace();
        let program = parts.next().unwrap_or_default();
        log::debug!("launching editor {command} on {}", path.display());
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| CommitError::Editor {
                editor: command.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CommitError::Editor {
                editor: command.clone(),
                reason: format!("exited with {status}"),
            }
            .into())
        }
    }
}

impl MessageEditor for ExternalEditor {
    fn edit(&self, message: &str) -> Result<String> {
        // Removed when `file` drops, whichever way this function returns.
        let mut file = tempfile::Builder::new()
            .prefix("commit-msg-")
            .suffix(".txt")
            .tempfile()
            .context("error creating temp file")?;
        writeln!(file, "{message}").context("error writing to temp file")?;
        file.flush().context("error writing to temp file")?;

        self.launch(file.path())?;

        fs::read_to_string(file.path()).context("error reading edited file")
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn untouched_file_round_trips() {
        let editor = ExternalEditor::new(Some("true".into()));
        let edited = editor.edit("Fix null pointer in parser").unwrap();
        assert_eq!(edited, "Fix null pointer in parser\n");
    }

    #[test]
    fn editor_changes_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-editor.sh");
        fs::write(&script, "#!/bin/sh\nprintf 'feat: rewritten\\n' > \"$1\"\n").unwrap();
        let editor = ExternalEditor::new(Some(format!("sh {}", script.display())));

        assert_eq!(editor.edit("draft").unwrap(), "feat: rewritten\n");
    }

    #[test]
    fn failing_editor_is_a_tool_error() {
        let editor = ExternalEditor::new(Some("false".into()));
        let err = editor.edit("draft").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CommitError>(),
            Some(CommitError::Editor { editor, .. }) if editor == "false"
        ));
    }

    #[test]
    fn missing_editor_is_a_tool_error() {
        let editor = ExternalEditor::new(Some("definitely-not-an-editor-4821".into()));
        assert!(editor.edit("draft").is_err());
    }

    #[test]
    fn blank_command_defers_to_environment() {
        assert!(ExternalEditor::new(Some("  ".into())).command.is_none());
    }
}
