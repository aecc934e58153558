//! Merge tests: layering an override document over a base, with the
//! override winning on conflicts and comments unioned without duplicates.

use inikeep::{Comment, CommentPosition, Document, WriteOptions};

#[test]
fn test_override_wins_and_base_only_keys_survive() {
    let mut base = Document::parse_text("[S]\nK=base\nonly_in_base=1\n");
    let over = Document::parse_text("[S]\nK=override\n");
    base.merge(&over);
    assert_eq!(base.get("S", "K", ""), "override");
    assert_eq!(base.get("S", "only_in_base", ""), "1");
}

#[test]
fn test_new_sections_are_appended_whole() {
    let mut base = Document::parse_text("[A]\nx=1\n");
    let over = Document::parse_text("[B]\n; carried along\ny=2\n\n");
    base.merge(&over);
    let names: Vec<&str> = base.section_names().collect();
    assert_eq!(names, vec!["A", "B"]);
    // The appended section keeps its comments and blank run.
    let b = base.find_section("B").unwrap();
    assert!(b.comments.iter().any(|c| c.text == " carried along"));
    assert_eq!(b.find("y").unwrap().blank_lines_after, 1);
}

#[test]
fn test_new_keys_are_appended_in_override_order() {
    let mut base = Document::parse_text("[S]\na=1\n");
    let over = Document::parse_text("[S]\nb=2\nc=3\n");
    base.merge(&over);
    let keys: Vec<&str> = base
        .find_section("S")
        .unwrap()
        .entries
        .iter()
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn test_merge_unions_entry_comments_without_duplicates() {
    let mut base = Document::parse_text("[S]\nk=1 ; shared\n");
    let mut over = Document::parse_text("[S]\nk=2 ; shared\n");
    over.comment_key(
        "S",
        "k",
        Comment::new(" only in override", CommentPosition::After, 0),
    );
    base.merge(&over);

    let entry = base.find_section("S").unwrap().find("k").unwrap();
    assert_eq!(entry.value.as_deref(), Some("2"));
    let shared = entry.comments.iter().filter(|c| c.text == " shared").count();
    assert_eq!(shared, 1, "identical annotation must not be duplicated");
    assert!(entry.comments.iter().any(|c| c.text == " only in override"));
}

#[test]
fn test_merge_keeps_base_entry_position() {
    let mut base = Document::parse_text("[S]\nfirst=1\nK=base\nlast=3\n");
    let over = Document::parse_text("[S]\nK=override\n");
    base.merge(&over);
    let keys: Vec<&str> = base
        .find_section("S")
        .unwrap()
        .entries
        .iter()
        .map(|e| e.key.as_str())
        .collect();
    assert_eq!(keys, vec!["first", "K", "last"]);
}

#[test]
fn test_merge_marks_dirty() {
    let mut base = Document::parse_text("[S]\na=1\n");
    let over = Document::new();
    base.merge(&over);
    assert!(base.is_dirty());
}

#[test]
fn test_key_uniqueness_after_merge_sequences() {
    let mut base = Document::parse_text("[S]\nk=1\nj=2\n");
    let over = Document::parse_text("[S]\nk=9\nnew=3\n");
    base.merge(&over);
    base.merge(&over);
    let section = base.find_section("S").unwrap();
    let mut keys: Vec<&str> = section.entries.iter().map(|e| e.key.as_str()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), section.entries.len());
}

#[test]
fn test_layered_overrides_render() {
    let mut doc = Document::parse_text("[Video]\nWidth=640\nHeight=480\n");
    let user = Document::parse_text("[Video]\nWidth=1920\n[Audio]\nVolume=8\n");
    doc.merge(&user);
    let output = doc.render(&WriteOptions::default());
    assert_eq!(
        output,
        "[Video]\nWidth=1920\nHeight=480\n[Audio]\nVolume=8\n"
    );
}
