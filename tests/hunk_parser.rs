use patchmine::engine::{parse_hunks, LineKind, PatchError};

#[test]
fn hunk_counts_match_classified_lines() {
    let patch = "@@ -1,3 +1,4 @@\n context\n-removed\n+added\n+added2\n last";
    let hunks = parse_hunks(patch).unwrap();
    assert_eq!(hunks.len(), 1);

    let hunk = &hunks[0];
    assert_eq!(hunk.old_start, 1);
    assert_eq!(hunk.new_start, 1);
    // declared counts agree with the classified lines
    assert_eq!(hunk.old_count, hunk.old_line_span());
    assert_eq!(hunk.new_count, hunk.new_line_span());
    assert_eq!(hunk.old_line_span(), 3);
    assert_eq!(hunk.new_line_span(), 4);
}

#[test]
fn parsing_is_idempotent() {
    let patch = "@@ -10,2 +10,3 @@ fn run()\n ctx\n+new line\n ctx2";
    let first = parse_hunks(patch).unwrap();
    let second = parse_hunks(patch).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_patch_yields_zero_hunks() {
    assert!(parse_hunks("").unwrap().is_empty());
    assert!(parse_hunks("   \n  ").unwrap().is_empty());
}

#[test]
fn content_without_header_is_malformed() {
    let err = parse_hunks("this is not a diff").unwrap_err();
    assert!(matches!(err, PatchError::MalformedPatch));
}

#[test]
fn header_counts_default_to_one() {
    let hunks = parse_hunks("@@ -5 +7 @@\n-x\n+y").unwrap();
    assert_eq!(hunks[0].old_start, 5);
    assert_eq!(hunks[0].old_count, 1);
    assert_eq!(hunks[0].new_start, 7);
    assert_eq!(hunks[0].new_count, 1);
}

#[test]
fn section_trailer_is_captured() {
    let hunks = parse_hunks("@@ -1,2 +1,2 @@ def foo():\n ctx\n ctx2").unwrap();
    assert_eq!(hunks[0].section, "def foo():");
}

#[test]
fn file_headers_before_first_hunk_are_skipped() {
    let patch = "--- a/f.py\n+++ b/f.py\n@@ -1,1 +1,1 @@\n-a\n+b";
    let hunks = parse_hunks(patch).unwrap();
    assert_eq!(hunks.len(), 1);
    assert_eq!(hunks[0].lines.len(), 2);
    assert_eq!(hunks[0].lines[0].kind, LineKind::Removed);
    assert_eq!(hunks[0].lines[1].kind, LineKind::Added);
}

#[test]
fn unknown_marker_lines_are_context() {
    let patch = "@@ -1,1 +1,1 @@\n-old\n+new\n\\ No newline at end of file";
    let hunks = parse_hunks(patch).unwrap();
    assert_eq!(hunks[0].lines[2].kind, LineKind::Context);
    assert_eq!(hunks[0].lines[2].text, "\\ No newline at end of file");
}

#[test]
fn line_markers_are_stripped_and_reconstructed() {
    let patch = "@@ -1,2 +1,2 @@\n ctx\n-gone\n+here";
    let hunks = parse_hunks(patch).unwrap();
    assert_eq!(hunks[0].lines[0].text, "ctx");
    assert_eq!(hunks[0].lines[1].text, "gone");
    assert_eq!(hunks[0].lines[2].text, "here");
    assert_eq!(hunks[0].content(), " ctx\n-gone\n+here");
}

#[test]
fn multiple_hunks_stay_in_order() {
    let patch = "@@ -1,1 +1,1 @@\n-a\n+b\n@@ -9,1 +9,2 @@\n ctx\n+c";
    let hunks = parse_hunks(patch).unwrap();
    assert_eq!(hunks.len(), 2);
    assert_eq!(hunks[0].old_start, 1);
    assert_eq!(hunks[1].old_start, 9);
    assert_eq!(hunks[1].lines.len(), 2);
}
