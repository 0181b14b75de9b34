use super::{extract_headings, Cached, HeadingSource, Parsed};
use crate::buffer::Buffer;
use crate::edit_plan::Position;
use crate::formats::markdown::MarkdownFormat;
use crate::heading::Heading;
use crate::host::Editor;

fn headings(text: &str) -> Vec<(usize, usize)> {
    extract_headings(text, &MarkdownFormat)
        .unwrap()
        .into_iter()
        .map(|h| (h.level, h.line))
        .collect()
}

#[test]
fn test_extracts_levels_and_lines() {
    let text = "# A\n## B\ntext\n## C\n# D\n";
    assert_eq!(headings(text), vec![(1, 0), (2, 1), (2, 3), (1, 4)]);
}

#[test]
fn test_empty_and_headingless_documents() {
    assert!(headings("").is_empty());
    assert!(headings("just a paragraph\n\nand another\n").is_empty());
}

#[test]
fn test_heading_on_unterminated_last_line() {
    assert_eq!(headings("# X"), vec![(1, 0)]);
    assert_eq!(headings("## X\n# Y"), vec![(2, 0), (1, 1)]);
    assert_eq!(headings("# A\ntext\n## B"), vec![(1, 0), (2, 2)]);
    let outline = Parsed::new(MarkdownFormat).parse("### clip").unwrap();
    assert_eq!(outline.headings(), &[Heading::new(3, 0)]);
}

#[test]
fn test_skips_fenced_code() {
    let text = "# A\n```\n# not a heading\n```\n## B\n";
    assert_eq!(headings(text), vec![(1, 0), (2, 4)]);
}

#[test]
fn test_skips_block_quotes_and_lists() {
    let text = "# A\n\n> # quoted\n\n- # in a list\n\n## B\n";
    assert_eq!(headings(text), vec![(1, 0), (2, 6)]);
}

#[test]
fn test_ignores_setext_headings() {
    let text = "Title\n=====\n\n# A\n";
    assert_eq!(headings(text), vec![(1, 3)]);
}

#[test]
fn test_all_depths() {
    let text = "# 1\n## 2\n### 3\n#### 4\n##### 5\n###### 6\n";
    let levels: Vec<usize> = headings(text).into_iter().map(|(level, _)| level).collect();
    assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_providers_agree() {
    let docs = [
        "# A\n## B\ntext\n## C\n# D\n",
        "intro\n\n### deep first\n# shallow\n",
        "no headings at all",
        "# only",
    ];
    for doc in docs {
        let buffer = Buffer::from_text(doc);
        let parsed = Parsed::new(MarkdownFormat).outline(&buffer).unwrap();
        let cached = Cached::new(MarkdownFormat).outline(&buffer).unwrap();
        println!("{doc:?}: {:?}", parsed.headings());
        assert_eq!(parsed, cached);
    }
}

#[test]
fn test_cache_follows_document_version() {
    let mut buffer = Buffer::from_text("# A\ntext\n");
    let source = Cached::new(MarkdownFormat);
    assert_eq!(source.cached_version(), None);

    let first = source.outline(&buffer).unwrap();
    assert_eq!(first.headings(), &[Heading::new(1, 0)]);
    assert_eq!(source.cached_version(), Some(0));

    // Same version, same outline.
    assert_eq!(source.outline(&buffer).unwrap(), first);

    buffer
        .replace_range("## B\n", Position::line_start(1), None)
        .unwrap();
    let second = source.outline(&buffer).unwrap();
    assert_eq!(source.cached_version(), Some(1));
    assert_eq!(
        second.headings(),
        &[Heading::new(1, 0), Heading::new(2, 1)]
    );
}

#[test]
fn test_parse_ignores_cache() {
    let buffer = Buffer::from_text("# A\n");
    let source = Cached::new(MarkdownFormat);
    source.outline(&buffer).unwrap();

    let clip = source.parse("## X\n### Y\n").unwrap();
    assert_eq!(clip.len(), 2);
    assert_eq!(source.cached_version(), Some(0));
    assert_eq!(source.outline(&buffer).unwrap().len(), 1);
}
