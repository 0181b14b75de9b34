use super::{FileClipboard, FoldFile};
use crate::branch::{copy_branch, paste_branch};
use crate::buffer::{Buffer, Notices};
use crate::edit_plan::Position;
use crate::error::OutlineError;
use crate::formats::markdown::MarkdownFormat;
use crate::host::{Clipboard, Context, Editor, Fold, FoldInfo, FoldStore, TextSource};
use crate::input::Parsed;
use std::fs;

#[test]
fn test_clipboard_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mut clipboard = FileClipboard::new(dir.path().join("clip.md"));
    assert_eq!(clipboard.read_text().unwrap(), "");

    clipboard.write_text("# A\nbody\n").unwrap();
    assert_eq!(clipboard.read_text().unwrap(), "# A\nbody\n");
}

#[test]
fn test_fold_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folds.json");
    let mut store = FoldFile::new(&path);
    assert_eq!(store.get_folds().unwrap(), FoldInfo::default());

    let info = FoldInfo {
        folds: vec![Fold::at(3), Fold::at(7)],
        lines: 12,
    };
    store.set_folds(info.clone()).unwrap();
    println!("{}", fs::read_to_string(&path).unwrap());
    assert_eq!(FoldFile::new(&path).get_folds().unwrap(), info);
}

#[test]
fn test_corrupt_fold_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folds.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        FoldFile::new(&path).get_folds(),
        Err(OutlineError::Json(_))
    ));
}

#[test]
fn test_copy_and_paste_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    let clip_path = dir.path().join("clip.md");
    let fold_path = dir.path().join("folds.json");
    let source = Parsed::new(MarkdownFormat);

    // First invocation copies.
    let mut buffer = Buffer::from_text("# A\n## B\nbody\n").with_cursor(1, 0);
    let mut clipboard = FileClipboard::new(&clip_path);
    let mut folds = FoldFile::new(&fold_path);
    let mut notices = Notices::default();
    let mut cx = Context {
        editor: &mut buffer,
        clipboard: &mut clipboard,
        folds: &mut folds,
        notifier: &mut notices,
        source: &source,
    };
    assert!(copy_branch(&mut cx, false).unwrap());
    assert_eq!(fs::read_to_string(&clip_path).unwrap(), "## B\nbody\n");

    // Second invocation pastes into another document.
    let mut other = Buffer::from_text("# X\n");
    other.set_cursor(Position::line_start(1));
    let mut clipboard = FileClipboard::new(&clip_path);
    let mut cx = Context {
        editor: &mut other,
        clipboard: &mut clipboard,
        folds: &mut folds,
        notifier: &mut notices,
        source: &source,
    };
    paste_branch(&mut cx).unwrap();
    assert_eq!(other.text(), "# X\n# B\nbody\n");
    assert_eq!(notices.messages, vec!["Copied branch to clipboard."]);
}
