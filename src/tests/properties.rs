//! Structural properties checked over generated outlines.

use crate::branch::{
    begin_paste, cut_branch, demote_branch, demote_heading, finish_paste, move_branch_down,
    move_branch_up, promote_branch, promote_heading,
};
use crate::buffer::{Buffer, MemoryHost};
use crate::edit_plan::Position;
use crate::folding::{focus_fold, toggle_fold};
use crate::formats::markdown::MarkdownFormat;
use crate::heading::{self, MAX_LEVEL};
use crate::host::{Editor, TextSource};
use crate::input::{Cached, HeadingSource, Parsed};
use crate::navigation::Outline;
use proptest::prelude::*;
use proptest::sample::Index;

/// Optional preamble, then headings of random depth each followed by a few body lines.
fn document() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        prop::collection::vec((1usize..=MAX_LEVEL, 0usize..3), 1..8),
    )
        .prop_map(|(preamble, sections)| {
            let mut text = String::new();
            if preamble {
                text.push_str("intro\n\n");
            }
            for (i, (level, body)) in sections.into_iter().enumerate() {
                text.push_str(&format!("{} H{i}\n", "#".repeat(level)));
                for j in 0..body {
                    text.push_str(&format!("body {i}.{j}\n"));
                }
            }
            text
        })
}

fn outline_of(text: &str) -> Outline {
    Parsed::new(MarkdownFormat).parse(text).unwrap()
}

/// One fresh provider of each kind; every edit property runs against both.
fn sources() -> Vec<Box<dyn HeadingSource>> {
    vec![
        Box::new(Parsed::new(MarkdownFormat)),
        Box::new(Cached::new(MarkdownFormat)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn providers_agree(doc in document()) {
        let buffer = Buffer::from_text(&doc);
        let parsed = Parsed::new(MarkdownFormat).outline(&buffer).unwrap();
        let cached = Cached::new(MarkdownFormat).outline(&buffer).unwrap();
        prop_assert_eq!(parsed, cached);
    }

    #[test]
    fn headings_are_marker_lines(doc in document()) {
        let expected: Vec<usize> = doc
            .lines()
            .enumerate()
            .filter(|(_, line)| heading::marker(line).is_some())
            .map(|(i, _)| i)
            .collect();
        let lines: Vec<usize> = outline_of(&doc).headings().iter().map(|h| h.line).collect();
        prop_assert_eq!(lines, expected);
    }

    #[test]
    fn branches_nest(doc in document()) {
        let outline = outline_of(&doc);
        for index in 0..outline.len() {
            let root = outline.headings()[index].level;
            let range = outline.branch_indices(index);
            prop_assert!(outline.headings()[range.start + 1..range.end]
                .iter()
                .all(|h| h.level > root));
            if let Some(end) = outline.branch_end_index(index) {
                prop_assert_eq!(end, range.end);
                prop_assert!(outline.headings()[end].level <= root);
            }
        }
    }

    #[test]
    fn demote_then_promote_restores(doc in document(), pick in any::<Index>()) {
        let outline = outline_of(&doc);
        let index = pick.index(outline.len());
        let deepest = outline.headings()[outline.branch_indices(index)]
            .iter()
            .map(|h| h.level)
            .max()
            .unwrap_or(0);
        for source in sources() {
            let source = source.as_ref();
            let mut host = MemoryHost::new(&doc, outline.headings()[index].line, 0);
            let demoted = demote_branch(&mut host.context(source), false);
            if deepest >= MAX_LEVEL {
                prop_assert!(demoted.is_err());
            } else {
                prop_assert!(demoted.unwrap());
                prop_assert!(promote_branch(&mut host.context(source), false).unwrap());
            }
            prop_assert_eq!(host.buffer.text(), doc.clone());
        }
    }

    #[test]
    fn promote_then_demote_heading_restores(doc in document(), pick in any::<Index>()) {
        let outline = outline_of(&doc);
        let heading = outline.headings()[pick.index(outline.len())];
        for source in sources() {
            let source = source.as_ref();
            let mut host = MemoryHost::new(&doc, heading.line, 0);
            let promoted = promote_heading(&mut host.context(source), false).unwrap();
            prop_assert_eq!(promoted, heading.level > 1);
            if promoted {
                prop_assert!(demote_heading(&mut host.context(source), false).unwrap());
            } else {
                // At level 1 only the opposite order is available.
                prop_assert!(demote_heading(&mut host.context(source), false).unwrap());
                prop_assert!(promote_heading(&mut host.context(source), false).unwrap());
            }
            prop_assert_eq!(host.buffer.text(), doc.clone());
        }
    }

    #[test]
    fn move_up_then_down_restores(doc in document(), pick in any::<Index>()) {
        let outline = outline_of(&doc);
        let index = pick.index(outline.len());
        for source in sources() {
            let source = source.as_ref();
            let mut host = MemoryHost::new(&doc, outline.headings()[index].line, 0);
            match outline.previous_sibling_index(index) {
                None => prop_assert!(!move_branch_up(&mut host.context(source), true).unwrap()),
                Some(sibling) => {
                    prop_assert!(move_branch_up(&mut host.context(source), false).unwrap());
                    prop_assert_eq!(host.buffer.cursor().line, outline.headings()[sibling].line);
                    prop_assert!(move_branch_down(&mut host.context(source), false).unwrap());
                    prop_assert_eq!(host.buffer.cursor().line, outline.headings()[index].line);
                }
            }
            prop_assert_eq!(host.buffer.text(), doc.clone());
        }
    }

    #[test]
    fn cut_then_paste_at_same_level_restores(doc in document(), pick in any::<Index>()) {
        let outline = outline_of(&doc);
        let root = outline.headings()[pick.index(outline.len())];
        for source in sources() {
            let source = source.as_ref();
            let mut host = MemoryHost::new(&doc, root.line, 0);
            prop_assert!(cut_branch(&mut host.context(source), false).unwrap());

            host.buffer.set_cursor(Position::line_start(root.line));
            let mut cx = host.context(source);
            let pending = begin_paste(&cx).unwrap();
            if pending.level == root.level {
                let clip = cx.clipboard.read_text().unwrap();
                finish_paste(&mut cx, pending, &clip).unwrap();
                prop_assert_eq!(host.buffer.text(), doc.clone());
            }
        }
    }

    #[test]
    fn toggle_twice_restores_folds(doc in document(), pick in any::<Index>()) {
        let line = pick.index(doc.lines().count());
        for source in sources() {
            let mut host = MemoryHost::new(&doc, line, 0);
            toggle_fold(&mut host.context(source.as_ref())).unwrap();
            toggle_fold(&mut host.context(source.as_ref())).unwrap();
            prop_assert!(host.folds.info.folds.is_empty());
        }
    }

    #[test]
    fn focus_opens_only_the_ancestor_path(doc in document(), pick in any::<Index>()) {
        let outline = outline_of(&doc);
        let index = pick.index(outline.len());
        let chain = outline.ancestor_chain(index);
        for source in sources() {
            let mut host = MemoryHost::new(&doc, outline.headings()[index].line, 0);
            focus_fold(&mut host.context(source.as_ref())).unwrap();

            let folds = &host.folds.info.folds;
            prop_assert_eq!(folds.len(), outline.len() - chain.len());
            for &i in &chain {
                let line = outline.headings()[i].line;
                prop_assert!(folds.iter().all(|fold| fold.from != line));
            }
        }
    }
}
