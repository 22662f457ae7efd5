//! Parsing of terminal input lines into front-end commands.

use student_core::{FormFields, KeyCommand};

use crate::error::{AppError, AppResult};

pub const HELP: &str = "\
commands:
  refresh                          reload the roster
  r                                refresh shortcut
  save <name> | <email> | <course> add a student, or update the one being edited
  edit <id>                        load a student into the form
  cancel                           leave edit mode
  delete <id>                      ask to delete a student
  confirm                          confirm the pending delete
  dismiss                          close the delete dialog
  esc                              close the dialog and cancel editing
  online | offline                 report a connectivity change
  show                             redraw
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Key(KeyCommand),
    Save(FormFields),
    /// Id as typed; resolved against the roster when run.
    Edit(String),
    Cancel,
    Delete(String),
    Confirm,
    Dismiss,
    Connectivity(bool),
    Show,
    Help,
    Quit,
}

pub fn parse(line: &str) -> AppResult<Command> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "refresh" => Command::Refresh,
        "r" | "ctrl-r" => Command::Key(KeyCommand::Refresh),
        "esc" | "escape" => Command::Key(KeyCommand::Escape),
        "save" => {
            // Empty parts are passed through; the validator reports them.
            let mut parts = rest.splitn(3, '|').map(str::trim);
            let name = parts.next().unwrap_or_default();
            let email = parts.next().unwrap_or_default();
            let course = parts.next().unwrap_or_default();
            Command::Save(FormFields::new(name, email, course))
        }
        "edit" if !rest.is_empty() => Command::Edit(rest.to_string()),
        "edit" => return Err(AppError::Usage("edit <id>")),
        "delete" if !rest.is_empty() => Command::Delete(rest.to_string()),
        "delete" => return Err(AppError::Usage("delete <id>")),
        "cancel" => Command::Cancel,
        "confirm" => Command::Confirm,
        "dismiss" => Command::Dismiss,
        "online" => Command::Connectivity(true),
        "offline" => Command::Connectivity(false),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(AppError::UnknownCommand(other.to_string())),
    };
    Ok(command)
}
