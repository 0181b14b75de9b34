//! branchmark: outline commands for markdown files from the command line.
#![allow(clippy::multiple_crate_versions)]

use branchmark::buffer::Buffer;
use branchmark::commands::CommandRegistry;
use branchmark::config::Config;
use branchmark::error::OutlineError;
use branchmark::formats::markdown::MarkdownFormat;
use branchmark::host::{Context, Editor, Notifier, TextSource};
use branchmark::hotkeys::{Hotkey, Keymap};
use branchmark::input::{HeadingSource, Parsed};
use branchmark::storage::{FileClipboard, FoldFile};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "branchmark")]
#[command(about = "Outline-aware branch editing for markdown", long_about = None)]
struct Args {
    #[command(subcommand)]
    task: Task,

    /// Clipboard file (overrides branchmark.toml)
    #[arg(long, global = true, value_name = "FILE")]
    clipboard: Option<PathBuf>,

    /// Fold state file (overrides branchmark.toml)
    #[arg(long, global = true, value_name = "FILE")]
    folds: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Task {
    /// Print the heading tree of a document
    Outline {
        /// Markdown file
        path: PathBuf,
    },
    /// Run commands in order at a cursor position
    Run {
        /// Markdown file
        path: PathBuf,
        #[command(flatten)]
        session: SessionArgs,
        /// Command ids, with or without the `branchmark:` prefix
        #[arg(required = true, value_name = "COMMAND")]
        commands: Vec<String>,
    },
    /// Dispatch a hotkey such as Alt+Shift+ArrowUp through the keymap
    Key {
        /// Markdown file
        path: PathBuf,
        #[command(flatten)]
        session: SessionArgs,
        /// Key chord
        hotkey: String,
    },
    /// List available commands and their hotkeys
    Commands,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Cursor line (0-based)
    #[arg(long, short = 'l', default_value_t = 0)]
    line: usize,

    /// Cursor column (0-based)
    #[arg(long, short = 'c', default_value_t = 0)]
    column: usize,

    /// Print the resulting document instead of writing it back
    #[arg(long)]
    dry_run: bool,

    /// Print the applied edit plans as JSON
    #[arg(long)]
    plan: bool,
}

/// Advisory messages go to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

fn main() -> Result<(), OutlineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load()?;

    // Override config with command line args
    if let Some(path) = args.clipboard {
        cfg.clipboard_file = path.display().to_string();
    }
    if let Some(path) = args.folds {
        cfg.fold_file = path.display().to_string();
    }

    let registry = CommandRegistry::with_builtins();
    match args.task {
        Task::Outline { path } => print_outline(&path),
        Task::Commands => {
            for command in registry.iter() {
                let hotkeys: Vec<String> = command.hotkeys.iter().map(ToString::to_string).collect();
                println!("{:<36} {:<24} {}", command.id, command.name, hotkeys.join(", "));
            }
            Ok(())
        }
        Task::Run {
            path,
            session,
            commands,
        } => run_session(&path, &session, &cfg, |cx| {
            for id in &commands {
                match registry.execute(id, cx) {
                    Ok(outcome) => eprintln!("{id}: {outcome:?}"),
                    Err(e) => cx.notifier.notify(&e.to_string()),
                }
            }
        }),
        Task::Key {
            path,
            session,
            hotkey,
        } => {
            let hotkey: Hotkey = hotkey.parse()?;
            let keymap = Keymap::default();
            run_session(&path, &session, &cfg, |cx| {
                let outcome = keymap.dispatch(&hotkey, &registry, cx);
                eprintln!("{hotkey}: {outcome:?}");
            })
        }
    }
}

fn print_outline(path: &Path) -> Result<(), OutlineError> {
    let text = fs::read_to_string(path)?;
    let outline = Parsed::new(MarkdownFormat).parse(&text)?;
    let lines: Vec<&str> = text.lines().collect();

    if outline.is_empty() {
        eprintln!("No headings found");
        return Ok(());
    }
    for heading in outline.headings() {
        let title = lines
            .get(heading.line)
            .map_or("", |l| l.trim_start().trim_start_matches('#').trim());
        let indent = "  ".repeat(heading.level - 1);
        println!("{:>5}  {indent}{title}", heading.line);
    }
    Ok(())
}

/// Loads `path` into a buffer, runs `f` against it, then writes back or prints the result.
fn run_session(
    path: &Path,
    session: &SessionArgs,
    cfg: &Config,
    f: impl FnOnce(&mut Context<'_>),
) -> Result<(), OutlineError> {
    let original = fs::read_to_string(path)?;
    let mut buffer = Buffer::from_text(&original).with_cursor(session.line, session.column);
    let mut clipboard = FileClipboard::new(&cfg.clipboard_file);
    let mut folds = FoldFile::new(&cfg.fold_file);
    let mut notifier = StderrNotifier;
    let source = Parsed::new(MarkdownFormat);

    let mut cx = Context {
        editor: &mut buffer,
        clipboard: &mut clipboard,
        folds: &mut folds,
        notifier: &mut notifier,
        source: &source,
    };
    f(&mut cx);

    if session.plan {
        println!("{}", serde_json::to_string_pretty(buffer.history())?);
    }
    let result = buffer.text();
    if session.dry_run {
        print!("{result}");
    } else if result != original {
        fs::write(path, &result)?;
    }
    let cursor = buffer.cursor();
    eprintln!("cursor {}:{}", cursor.line, cursor.column);
    Ok(())
}
