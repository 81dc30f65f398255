use std::path::PathBuf;

use super::input::{InputError, SelectorInput, SourceInput};

fn inline(text: &str) -> SelectorInput {
    SelectorInput {
        text: Some(text.to_owned()),
        file: None,
    }
}

#[test]
fn selector_is_required() {
    let err = SelectorInput::default().load().unwrap_err();
    assert!(matches!(err, InputError::MissingSelector));
    insta::assert_snapshot!(err.to_string(), @"selector is required: use positional argument, -q/--query, or --query-file");
}

#[test]
fn inline_selector_wins_and_is_trimmed() {
    let input = SelectorInput {
        text: Some("  ul > li ".to_owned()),
        file: Some(PathBuf::from("does-not-exist.sel")),
    };
    assert_eq!(input.load().unwrap(), "ul > li");
}

#[test]
fn blank_selector_is_rejected() {
    assert!(matches!(
        inline(" \n ").load(),
        Err(InputError::EmptySelector)
    ));
}

#[test]
fn unreadable_files_name_the_path() {
    let input = SelectorInput {
        text: None,
        file: Some(PathBuf::from("does-not-exist.sel")),
    };
    let err = input.load().unwrap_err();
    assert!(matches!(&err, InputError::Read { path, .. } if path.ends_with("does-not-exist.sel")));
    assert!(err.to_string().starts_with("failed to read 'does-not-exist.sel': "));
}

#[test]
fn source_is_required() {
    let err = SourceInput::default().load(&inline("p")).unwrap_err();
    assert!(matches!(err, InputError::MissingSource));
}

#[test]
fn stdin_cannot_feed_both_inputs() {
    let selector = SelectorInput {
        text: None,
        file: Some(PathBuf::from("-")),
    };
    let source = SourceInput {
        path: Some(PathBuf::from("-")),
        text: None,
    };
    let err = source.load(&selector).unwrap_err();
    assert!(matches!(err, InputError::BothFromStdin));
}

#[test]
fn inline_source_parses() {
    let source = SourceInput {
        path: Some(PathBuf::from("ignored.html")),
        text: Some("<ul><li>a</li><li>b</li></ul>".to_owned()),
    };
    let tree = source.parse(&inline("li")).unwrap();
    // document, ul, two li, two text nodes
    assert_eq!(tree.len(), 6);
}
