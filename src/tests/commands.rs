use super::{Action, Command, CommandRegistry, Outcome, NAMESPACE};
use crate::buffer::MemoryHost;
use crate::error::OutlineError;
use crate::formats::markdown::MarkdownFormat;
use crate::host::{Context, TextSource};
use crate::input::Parsed;

const DOC: &str = "# A\n## B\ntext\n## C\n# D\n";

fn execute(text: &str, line: usize, id: &str) -> (MemoryHost, Outcome) {
    let registry = CommandRegistry::with_builtins();
    let mut host = MemoryHost::new(text, line, 0);
    let source = Parsed::new(MarkdownFormat);
    let outcome = registry.execute(id, &mut host.context(&source)).unwrap();
    (host, outcome)
}

#[test]
fn test_builtins_registered() {
    let registry = CommandRegistry::with_builtins();
    let ids: Vec<&str> = registry.iter().map(|c| c.id.as_str()).collect();
    println!("{ids:?}");
    assert_eq!(ids.len(), 15);
    assert!(ids.iter().all(|id| id.starts_with(NAMESPACE)));
    assert!(ids.contains(&"branchmark:move-branch-up"));
    assert!(ids.contains(&"branchmark:focus-folding"));

    let by_name = registry.get("demote-branch").unwrap();
    assert_eq!(by_name.id, "branchmark:demote-branch");
    assert_eq!(by_name.hotkeys[0].to_string(), "Alt+Shift+ArrowRight");
    assert!(registry.get("editor:swap-line-up").is_none());
}

#[test]
fn test_applied() {
    let (host, outcome) = execute(DOC, 0, "branchmark:demote-branch");
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(host.buffer.text(), "## A\n### B\ntext\n### C\n# D\n");
    assert!(host.notices.messages.is_empty());
}

#[test]
fn test_not_applicable_is_silent() {
    let (host, outcome) = execute(DOC, 1, "move-branch-up");
    assert_eq!(outcome, Outcome::NotApplicable);
    assert!(host.notices.messages.is_empty());

    let (host, outcome) = execute(DOC, 2, "demote-heading");
    assert_eq!(outcome, Outcome::NotApplicable);
    assert_eq!(host.buffer.text(), DOC);
}

#[test]
fn test_refusal_is_notified() {
    let (host, outcome) = execute(DOC, 0, "promote-branch");
    assert_eq!(outcome, Outcome::Refused);
    assert_eq!(host.notices.messages, vec!["Cannot promote branch of depth 1!"]);
    assert_eq!(host.buffer.text(), DOC);
}

#[test]
fn test_always_command_refusal() {
    let mut host = MemoryHost::new(DOC, 2, 0);
    host.clipboard.text = Some("plain text".to_string());
    let source = Parsed::new(MarkdownFormat);
    let registry = CommandRegistry::with_builtins();
    let outcome = registry
        .execute("paste-branch", &mut host.context(&source))
        .unwrap();
    assert_eq!(outcome, Outcome::Refused);
    assert_eq!(host.notices.messages, vec!["No branch on clipboard!"]);
}

#[test]
fn test_unknown_command() {
    let registry = CommandRegistry::with_builtins();
    let mut host = MemoryHost::new(DOC, 0, 0);
    let source = Parsed::new(MarkdownFormat);
    let err = registry
        .execute("nope", &mut host.context(&source))
        .unwrap_err();
    assert!(matches!(err, OutlineError::UnknownCommand(_)));
    assert_eq!(err.to_string(), "Error: Command nope does not exist.");
    assert!(registry.check("nope", &mut host.context(&source)).is_err());
}

#[test]
fn test_check_has_no_side_effects() {
    let registry = CommandRegistry::with_builtins();
    let mut host = MemoryHost::new(DOC, 1, 0);
    let source = Parsed::new(MarkdownFormat);
    for id in ["cut-branch", "copy-branch", "demote-branch", "move-branch-down"] {
        assert!(registry.check(id, &mut host.context(&source)).unwrap(), "{id}");
    }
    assert_eq!(host.buffer.text(), DOC);
    assert!(host.clipboard.text.is_none());
    assert!(host.notices.messages.is_empty());
}

fn mark(cx: &mut Context<'_>) -> Result<(), OutlineError> {
    cx.notifier.notify("marked");
    Ok(())
}

#[test]
fn test_register_custom_command() {
    let mut registry = CommandRegistry::new();
    registry.register(Command {
        id: "test:mark".to_string(),
        name: "Mark".to_string(),
        hotkeys: Vec::new(),
        action: Action::Always(mark),
    });
    let mut host = MemoryHost::new("", 0, 0);
    let source = Parsed::new(MarkdownFormat);
    let outcome = registry
        .execute("test:mark", &mut host.context(&source))
        .unwrap();
    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(host.notices.messages, vec!["marked"]);
}
