//! Command registry: every outline operation as a named action.
//!
//! An [`Action`] is either a plain callback or a checked callback that can be asked whether it
//! applies before it runs. The registry owns the actions by id, queries applicability before
//! executing, and turns operation errors into notifications so no invocation ever fails loudly.

use crate::branch;
use crate::error::OutlineError;
use crate::folding;
use crate::host::Context;
use crate::hotkeys::{Hotkey, Modifier};
use crate::motion;
use std::collections::BTreeMap;

/// Namespace prefixed to the ids of built-in commands.
pub const NAMESPACE: &str = "branchmark";

/// Callback that always applies.
pub type Callback = fn(&mut Context<'_>) -> Result<(), OutlineError>;
/// Callback reporting applicability when `checking`, performing the edit otherwise.
pub type CheckCallback = fn(&mut Context<'_>, bool) -> Result<bool, OutlineError>;

#[derive(Clone, Copy)]
/// The two callback shapes a command can have.
pub enum Action {
    /// Always available; runs unconditionally.
    Always(Callback),
    /// Availability depends on the document and cursor.
    Checkable(CheckCallback),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of invoking a command.
pub enum Outcome {
    /// The command ran.
    Applied,
    /// The command does not apply here; nothing happened.
    NotApplicable,
    /// The command applied but refused or failed; the user was notified, nothing changed.
    Refused,
}

#[derive(Clone)]
/// Named, hotkey-bound action.
pub struct Command {
    /// Unique id, `namespace:name`.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Default hotkeys.
    pub hotkeys: Vec<Hotkey>,
    /// What the command does.
    pub action: Action,
}

impl Command {
    #[must_use]
    /// Built-in command `branchmark:<name>`.
    pub fn builtin(name: &str, title: &str, hotkey: Hotkey, action: Action) -> Self {
        Self {
            id: format!("{NAMESPACE}:{name}"),
            name: title.to_string(),
            hotkeys: vec![hotkey],
            action,
        }
    }

    /// Whether the command applies, without side effects.
    ///
    /// Errors while checking count as "not applicable".
    pub fn check(&self, cx: &mut Context<'_>) -> bool {
        match self.action {
            Action::Always(_) => true,
            Action::Checkable(callback) => callback(cx, true).unwrap_or_else(|e| {
                tracing::warn!(id = %self.id, error = %e, "check failed");
                false
            }),
        }
    }

    /// Runs the command if it applies, notifying the user of any refusal.
    pub fn execute(&self, cx: &mut Context<'_>) -> Outcome {
        tracing::debug!(id = %self.id, "execute");
        let result = match self.action {
            Action::Always(callback) => callback(cx).map(|()| true),
            Action::Checkable(callback) => {
                if !self.check(cx) {
                    return Outcome::NotApplicable;
                }
                callback(cx, false)
            }
        };
        match result {
            Ok(true) => Outcome::Applied,
            Ok(false) => Outcome::NotApplicable,
            Err(e) => {
                if e.is_advisory() {
                    tracing::info!(id = %self.id, reason = %e, "refused");
                } else {
                    tracing::warn!(id = %self.id, error = %e, "failed");
                }
                cx.notifier.notify(&e.to_string());
                Outcome::Refused
            }
        }
    }
}

#[derive(Default)]
/// Commands by id, injected into whatever dispatches hotkeys.
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    #[must_use]
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Registry holding every built-in outline command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in builtin_commands() {
            registry.register(command);
        }
        registry
    }

    /// Adds or replaces a command.
    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.id.clone(), command);
    }

    #[must_use]
    /// Looks up `id`; a bare built-in name resolves within the crate namespace.
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands
            .get(id)
            .or_else(|| self.commands.get(&format!("{NAMESPACE}:{id}")))
    }

    /// Registered commands ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Whether `id` applies in the current context.
    ///
    /// # Errors
    ///
    /// Returns an error if no command is registered under `id`.
    pub fn check(&self, id: &str, cx: &mut Context<'_>) -> Result<bool, OutlineError> {
        let command = self
            .get(id)
            .ok_or_else(|| OutlineError::UnknownCommand(id.to_string()))?;
        Ok(command.check(cx))
    }

    /// Executes `id` in the current context.
    ///
    /// # Errors
    ///
    /// Returns an error if no command is registered under `id`.
    pub fn execute(&self, id: &str, cx: &mut Context<'_>) -> Result<Outcome, OutlineError> {
        let command = self
            .get(id)
            .ok_or_else(|| OutlineError::UnknownCommand(id.to_string()))?;
        Ok(command.execute(cx))
    }
}

fn key(modifiers: &[Modifier], key: &str) -> Hotkey {
    Hotkey::new(modifiers, key)
}

/// The outline commands with their default hotkeys.
#[must_use]
pub fn builtin_commands() -> Vec<Command> {
    use Action::{Always, Checkable};
    use Modifier::{Alt, Shift};

    vec![
        Command::builtin(
            "goto-previous-branch",
            "Goto previous branch",
            key(&[Alt], "ArrowUp"),
            Always(motion::goto_previous_branch),
        ),
        Command::builtin(
            "goto-next-branch",
            "Goto next branch",
            key(&[Alt], "ArrowDown"),
            Always(motion::goto_next_branch),
        ),
        Command::builtin(
            "goto-parent-heading",
            "Goto parent heading",
            key(&[Alt], "Home"),
            Always(motion::goto_parent_heading),
        ),
        Command::builtin(
            "add-heading",
            "Add heading below",
            key(&[Alt], "Enter"),
            Always(motion::add_heading_below),
        ),
        Command::builtin(
            "demote-heading",
            "Demote heading",
            key(&[Alt], "ArrowRight"),
            Checkable(branch::demote_heading),
        ),
        Command::builtin(
            "promote-heading",
            "Promote heading",
            key(&[Alt], "ArrowLeft"),
            Checkable(branch::promote_heading),
        ),
        Command::builtin(
            "demote-branch",
            "Demote branch",
            key(&[Alt, Shift], "ArrowRight"),
            Checkable(branch::demote_branch),
        ),
        Command::builtin(
            "promote-branch",
            "Promote branch",
            key(&[Alt, Shift], "ArrowLeft"),
            Checkable(branch::promote_branch),
        ),
        Command::builtin(
            "move-branch-up",
            "Move branch up",
            key(&[Alt, Shift], "ArrowUp"),
            Checkable(branch::move_branch_up),
        ),
        Command::builtin(
            "move-branch-down",
            "Move branch down",
            key(&[Alt, Shift], "ArrowDown"),
            Checkable(branch::move_branch_down),
        ),
        Command::builtin(
            "copy-branch",
            "Copy branch",
            key(&[Alt], "C"),
            Checkable(branch::copy_branch),
        ),
        Command::builtin(
            "cut-branch",
            "Cut branch",
            key(&[Alt], "X"),
            Checkable(branch::cut_branch),
        ),
        Command::builtin(
            "paste-branch",
            "Paste branch",
            key(&[Alt], "V"),
            Always(branch::paste_branch),
        ),
        Command::builtin(
            "toggle-folding",
            "Toggle folding",
            key(&[Alt, Shift], "Key226"),
            Always(folding::toggle_fold),
        ),
        Command::builtin(
            "focus-folding",
            "Focus folding",
            key(&[Alt], "Key226"),
            Always(folding::focus_fold),
        ),
    ]
}

#[cfg(test)]
#[path = "tests/commands.rs"]
mod tests;
