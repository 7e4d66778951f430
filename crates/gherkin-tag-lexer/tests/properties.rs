//! Universal properties of the line scanner.

use gherkin_tag_lexer::{MARKER, MidWordTags, ScanOptions, scan_tags, scan_tags_with};
use proptest::prelude::*;

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z0-9_.#%&*!-]{1,8}|[а-яシナリオ]{1,4}", 0..6)
}

fn separator() -> impl Strategy<Value = String> {
    "[ \t]{1,3}"
}

fn collect(line: &str) -> Vec<String> {
    scan_tags(line).map(|tag| tag.as_str().to_string()).collect()
}

proptest! {
    #[test]
    fn text_without_markers_has_no_tags(line in "[^@]{0,64}") {
        prop_assert_eq!(scan_tags(&line).count(), 0);
    }

    #[test]
    fn separated_tags_are_found_in_order(names in names(), sep in separator()) {
        let line = names
            .iter()
            .map(|name| format!("{MARKER}{name}"))
            .collect::<Vec<_>>()
            .join(&sep);
        let expected: Vec<String> = names.iter().map(|name| format!("{MARKER}{name}")).collect();
        prop_assert_eq!(collect(&line), expected);
    }

    #[test]
    fn adjacent_tags_split_at_each_marker(names in names()) {
        let line: String = names.iter().map(|name| format!("{MARKER}{name}")).collect();
        prop_assert_eq!(collect(&line).len(), names.len());
    }

    #[test]
    fn tags_never_contain_whitespace_or_inner_markers(line in "[ @a-z\t]{0,48}") {
        for tag in scan_tags(&line) {
            let Some(body) = tag.as_str().strip_prefix(MARKER) else {
                return Err(TestCaseError::fail(format!("`{tag}` lacks a marker")));
            };
            prop_assert!(!body.is_empty());
            prop_assert!(!body.contains(MARKER));
            prop_assert!(!body.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn spans_point_back_into_the_line(line in "[ @a-zé]{0,48}") {
        for tag in scan_tags(&line) {
            prop_assert_eq!(line.get(tag.start()..tag.end()), Some(tag.as_str()));
        }
    }

    #[test]
    fn scanning_is_idempotent(line in any::<String>()) {
        prop_assert_eq!(collect(&line), collect(&line));
    }

    #[test]
    fn reject_policy_yields_a_subsequence(line in "[ @a-z]{0,48}") {
        let allowed = collect(&line);
        let options = ScanOptions::default().with_mid_word(MidWordTags::Reject);
        let mut remaining = allowed.iter();
        for tag in scan_tags_with(&line, options) {
            prop_assert!(remaining.any(|candidate| candidate == tag.as_str()));
        }
    }
}
