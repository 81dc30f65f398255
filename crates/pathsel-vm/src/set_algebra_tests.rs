use crate::set_algebra::{Strategy, deduplicate, deduplicate_with, difference, difference_with};
use crate::test_utils::{Plain, list, select};

#[test]
fn deduplicate_keeps_first_occurrences() {
    let (doc, ul, items) = list();
    let [a, b, c] = [items[0], items[1], items[2]];
    let input = vec![b, a, b, ul, a, c];

    assert_eq!(deduplicate(&doc, input.clone()), [b, a, ul, c]);
    assert_eq!(
        deduplicate_with(&doc, input.clone(), Strategy::SideTable),
        [b, a, ul, c]
    );
    assert_eq!(deduplicate(&Plain(&doc), input), [b, a, ul, c]);
}

#[test]
fn deduplicate_without_duplicates_returns_input() {
    let (doc, _, items) = list();
    let ptr = items.as_ptr();
    let out = deduplicate(&doc, items);
    assert_eq!(out.as_ptr(), ptr);
}

#[test]
fn stamps_from_earlier_passes_do_not_leak() {
    let (doc, _, items) = list();
    for _ in 0..3 {
        assert_eq!(deduplicate(&doc, items.clone()), items);
        assert_eq!(difference(&doc, &items[..2], &items), items[2..]);
    }
}

#[test]
fn universal_twice_is_universal_once() {
    let (doc, _, _) = list();
    let once = select(&doc, "*", doc.root());
    let mut twice = once.clone();
    twice.extend(select(&doc, "*", doc.root()));

    assert_eq!(twice.len(), 2 * once.len());
    assert_eq!(deduplicate(&doc, twice), once);
}

#[test]
fn difference_preserves_order_of_second_operand() {
    let (doc, ul, items) = list();
    let a = [items[3], items[0]];
    let b = [items[4], items[3], ul, items[0], items[1]];

    assert_eq!(difference(&doc, &a, &b), [items[4], ul, items[1]]);
    assert_eq!(
        difference_with(&doc, &a, &b, Strategy::SideTable),
        [items[4], ul, items[1]]
    );
    assert_eq!(difference(&Plain(&doc), &a, &b), [items[4], ul, items[1]]);
    assert_eq!(difference(&doc, &[], &b), b);
    assert!(difference(&doc, &b, &a).is_empty());
}
