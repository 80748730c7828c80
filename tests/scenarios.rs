//! End-to-end, single-threaded scenarios (§8).

use lazy_skipset::SkipSet;

fn empty_set() -> SkipSet {
    SkipSet::new(Default::default()).unwrap()
}

#[test]
fn add_then_contains() {
    let set = empty_set();
    assert!(set.add(b"hello"));
    assert!(set.contains(b"hello"));
}

#[test]
fn duplicate_add_reports_false() {
    let set = empty_set();
    assert!(set.add(b"hello"));
    assert!(!set.add(b"hello"));
}

#[test]
fn contains_distinguishes_present_from_absent() {
    let set = empty_set();
    assert!(set.add(b"hello"));
    assert!(set.add(b"hola"));
    assert!(set.contains(b"hola"));
    assert!(!set.contains(b"homie"));
}

#[test]
fn add_remove_add_again() {
    let set = empty_set();
    assert!(set.add(b"x"));
    assert!(set.remove(b"x"));
    assert!(!set.contains(b"x"));
    assert!(!set.remove(b"x"));
    assert!(set.add(b"x"));
    assert!(set.contains(b"x"));
}

#[test]
fn remove_leaves_the_rest_intact() {
    let set = empty_set();
    assert!(set.add(b"x"));
    assert!(set.add(b"y"));
    assert!(set.remove(b"x"));
    assert!(!set.contains(b"x"));
    assert!(set.contains(b"y"));
}

#[test]
fn empty_set_has_nothing() {
    let set = empty_set();
    assert!(!set.contains(b""));
    assert!(!set.contains(b"anything"));
    assert!(!set.remove(b"anything"));
}
