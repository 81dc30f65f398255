use crate::Interner;

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("div");
    let b = interner.intern("div");
    let c = interner.intern("span");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
}

#[test]
fn resolve_returns_original_text() {
    let mut interner = Interner::new();

    let sym = interner.intern("data-role");
    assert_eq!(interner.resolve(sym), "data-role");
}

#[test]
fn get_does_not_intern() {
    let mut interner = Interner::new();
    let sym = interner.intern("href");

    assert_eq!(interner.get("href"), Some(sym));
    assert_eq!(interner.get("src"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn symbols_are_case_sensitive() {
    let mut interner = Interner::new();

    let lower = interner.intern("div");
    let upper = interner.intern("DIV");

    assert_ne!(lower, upper);
    assert!(lower < upper);
}

#[test]
fn empty_interner() {
    let interner = Interner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.len(), 0);
}
