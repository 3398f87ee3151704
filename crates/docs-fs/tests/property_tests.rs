use docs_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_clean_is_idempotent(s in "[a-z./]{0,40}") {
        let once = NormalizedPath::new(&s).clean();
        let twice = once.clean();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_leaves_no_dot_segments(s in "/[a-z./]{0,40}") {
        let cleaned = NormalizedPath::new(&s).clean();
        for segment in cleaned.segments() {
            prop_assert_ne!(segment, ".");
            prop_assert_ne!(segment, "..");
        }
        prop_assert!(!cleaned.as_str().contains("//"));
    }

    #[test]
    fn test_no_backslashes_survive(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));
    }
}
