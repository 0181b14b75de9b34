//! Hotkeys and the keymap that delegates one key chord to an ordered chain of commands.
//!
//! A chord such as `Alt+ArrowUp` means "goto previous branch" on a heading, yet the host's own
//! table command should still get the key inside a table. Each [`Binding`] lists candidate command
//! ids; dispatch walks them in order and stops at the first that applies.

use crate::commands::{CommandRegistry, Outcome};
use crate::error::OutlineError;
use crate::host::Context;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Modifier key held with a hotkey.
pub enum Modifier {
    /// Platform command key (Ctrl or Cmd).
    Mod,
    /// Control.
    Ctrl,
    /// Meta / Cmd.
    Meta,
    /// Alt / Option.
    Alt,
    /// Shift.
    Shift,
}

impl Modifier {
    fn name(self) -> &'static str {
        match self {
            Self::Mod => "Mod",
            Self::Ctrl => "Ctrl",
            Self::Meta => "Meta",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "mod" => Some(Self::Mod),
            "ctrl" | "control" => Some(Self::Ctrl),
            "meta" | "cmd" => Some(Self::Meta),
            "alt" | "option" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
/// Key chord: a set of modifiers plus one key.
pub struct Hotkey {
    /// Modifiers, kept sorted so equal chords compare equal.
    pub modifiers: Vec<Modifier>,
    /// Key name as the host reports it (`ArrowUp`, `X`, `Key226`).
    pub key: String,
}

impl Hotkey {
    #[must_use]
    /// Chord of `modifiers` and `key`.
    pub fn new(modifiers: &[Modifier], key: &str) -> Self {
        let mut modifiers = modifiers.to_vec();
        modifiers.sort_unstable();
        modifiers.dedup();
        Self {
            modifiers,
            key: key.to_string(),
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.name())?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for Hotkey {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, modifiers)) = parts.split_last() else {
            return Err(OutlineError::InvalidHotkey(s.to_string()));
        };
        if key.is_empty() {
            return Err(OutlineError::InvalidHotkey(s.to_string()));
        }
        let modifiers = modifiers
            .iter()
            .map(|m| Modifier::parse(m).ok_or_else(|| OutlineError::InvalidHotkey(s.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&modifiers, key))
    }
}

#[derive(Clone, Debug)]
/// One chord and the commands it tries, in order.
pub struct Binding {
    /// The chord.
    pub hotkey: Hotkey,
    /// Candidate command ids, first applicable wins.
    pub commands: Vec<String>,
}

impl Binding {
    #[must_use]
    /// Binding of `hotkey` to `commands`.
    pub fn new(hotkey: Hotkey, commands: &[&str]) -> Self {
        Self {
            hotkey,
            commands: commands.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Ordered fallback chains per hotkey.
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Default for Keymap {
    fn default() -> Self {
        use Modifier::{Alt, Shift};
        let bind = |modifiers: &[Modifier], key: &str, commands: &[&str]| {
            Binding::new(Hotkey::new(modifiers, key), commands)
        };
        Self {
            bindings: vec![
                bind(&[Alt], "Enter", &["branchmark:add-heading"]),
                bind(&[Alt], "Home", &["branchmark:goto-parent-heading"]),
                bind(
                    &[Alt],
                    "ArrowUp",
                    &["branchmark:goto-previous-branch", "editor:table-row-before"],
                ),
                bind(
                    &[Alt],
                    "ArrowDown",
                    &["branchmark:goto-next-branch", "editor:table-row-after"],
                ),
                bind(
                    &[Alt],
                    "ArrowLeft",
                    &["branchmark:promote-heading", "editor:table-col-before"],
                ),
                bind(
                    &[Alt],
                    "ArrowRight",
                    &["branchmark:demote-heading", "editor:table-col-after"],
                ),
                bind(
                    &[Alt, Shift],
                    "ArrowUp",
                    &[
                        "branchmark:move-branch-up",
                        "editor:table-row-up",
                        "editor:swap-line-up",
                    ],
                ),
                bind(
                    &[Alt, Shift],
                    "ArrowDown",
                    &[
                        "branchmark:move-branch-down",
                        "editor:table-row-down",
                        "editor:swap-line-down",
                    ],
                ),
                bind(
                    &[Alt, Shift],
                    "ArrowLeft",
                    &["branchmark:promote-branch", "editor:table-col-left"],
                ),
                bind(
                    &[Alt, Shift],
                    "ArrowRight",
                    &["branchmark:demote-branch", "editor:table-col-right"],
                ),
                bind(&[Alt], "X", &["branchmark:cut-branch"]),
                bind(&[Alt], "C", &["branchmark:copy-branch"]),
                bind(&[Alt], "V", &["branchmark:paste-branch"]),
                bind(&[Alt], "Key226", &["branchmark:focus-folding"]),
                bind(&[Alt, Shift], "Key226", &["branchmark:toggle-folding"]),
                bind(&[Alt], "Backspace", &["editor:table-row-delete"]),
                bind(&[Alt], "Delete", &["editor:table-col-delete"]),
            ],
        }
    }
}

impl Keymap {
    #[must_use]
    /// Keymap with exactly `bindings`.
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }

    #[must_use]
    /// All bindings in declaration order.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    #[must_use]
    /// Binding for `hotkey`, if any.
    pub fn binding(&self, hotkey: &Hotkey) -> Option<&Binding> {
        self.bindings.iter().find(|b| &b.hotkey == hotkey)
    }

    /// Whether any command bound to `hotkey` applies; no side effects beyond notices for
    /// missing commands.
    pub fn check(&self, hotkey: &Hotkey, registry: &CommandRegistry, cx: &mut Context<'_>) -> bool {
        let Some(binding) = self.binding(hotkey) else {
            return false;
        };
        binding.commands.iter().any(|id| match registry.check(id, cx) {
            Ok(applies) => applies,
            Err(e) => {
                cx.notifier.notify(&e.to_string());
                false
            }
        })
    }

    /// Tries each command bound to `hotkey` until one applies or refuses.
    ///
    /// A missing command is reported through the notifier and skipped.
    pub fn dispatch(
        &self,
        hotkey: &Hotkey,
        registry: &CommandRegistry,
        cx: &mut Context<'_>,
    ) -> Outcome {
        let Some(binding) = self.binding(hotkey) else {
            tracing::debug!(%hotkey, "unbound hotkey");
            return Outcome::NotApplicable;
        };
        for id in &binding.commands {
            match registry.execute(id, cx) {
                Ok(Outcome::NotApplicable) => {}
                Ok(outcome) => return outcome,
                Err(e) => {
                    tracing::warn!(%hotkey, error = %e, "binding names a missing command");
                    cx.notifier.notify(&e.to_string());
                }
            }
        }
        Outcome::NotApplicable
    }
}

#[cfg(test)]
#[path = "tests/hotkeys.rs"]
mod tests;
