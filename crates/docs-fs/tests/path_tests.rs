use docs_fs::NormalizedPath;
use rstest::rstest;

#[rstest]
#[case("a/../b", "b")]
#[case("./a/./b", "a/b")]
#[case("a//b", "a/b")]
#[case("../a", "../a")]
#[case("../../a/b", "../../a/b")]
#[case("a/b/../../..", "..")]
#[case("/a/b/../../c", "/c")]
#[case("/..", "/")]
#[case("/docs/adr/../rfcs/x.md", "/docs/rfcs/x.md")]
#[case("", ".")]
#[case("a\\..\\b", "b")]
fn test_clean(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).clean().as_str(), expected);
}

#[test]
fn test_backslashes_are_normalized() {
    let path = NormalizedPath::new("docs-cms\\adr\\adr-001.md");
    assert_eq!(path.as_str(), "docs-cms/adr/adr-001.md");
}

#[test]
fn test_join_handles_trailing_slash() {
    let base = NormalizedPath::new("/repo/");
    assert_eq!(base.join("adr").as_str(), "/repo/adr");
    assert_eq!(NormalizedPath::new("/repo").join("adr/x.md").as_str(), "/repo/adr/x.md");
}

#[test]
fn test_parent_and_file_name() {
    let path = NormalizedPath::new("/repo/docs-cms/adr/adr-001-use-rust.md");
    assert_eq!(path.file_name(), Some("adr-001-use-rust.md"));
    assert_eq!(path.file_stem(), Some("adr-001-use-rust"));
    assert_eq!(path.parent().unwrap().as_str(), "/repo/docs-cms/adr");
    assert_eq!(NormalizedPath::new("file.md").parent(), None);
}

#[test]
fn test_extension_ignores_dotfiles() {
    assert_eq!(NormalizedPath::new(".hidden").extension(), None);
    assert_eq!(NormalizedPath::new("notes.MDX").extension(), Some("MDX"));
    assert_eq!(NormalizedPath::new("README").extension(), None);
}

#[test]
fn test_segments_skip_empty_parts() {
    let path = NormalizedPath::new("/repo//adr/");
    let segments: Vec<_> = path.segments().collect();
    assert_eq!(segments, vec!["repo", "adr"]);
}

#[test]
fn test_is_absolute() {
    assert!(NormalizedPath::new("/repo").is_absolute());
    assert!(NormalizedPath::new("C:\\repo").is_absolute());
    assert!(!NormalizedPath::new("repo/adr").is_absolute());
}
