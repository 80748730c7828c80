//! Boundary conditions called out explicitly (§8).

use lazy_skipset::SkipSetConfig;

#[test]
fn max_level_one_behaves_like_a_sorted_linked_list() {
    let set = lazy_skipset::SkipSet::new(SkipSetConfig::builder().max_level(1).build()).unwrap();
    for v in [b"banana".to_vec(), b"apple".to_vec(), b"cherry".to_vec()] {
        assert!(set.add(&v));
    }
    assert!(set.contains(b"apple"));
    assert!(set.contains(b"banana"));
    assert!(set.contains(b"cherry"));
    assert!(set.remove(b"banana"));
    assert!(!set.contains(b"banana"));
}

#[test]
fn p_near_zero_still_behaves_correctly() {
    let set = lazy_skipset::SkipSet::new(SkipSetConfig::builder().p(0.0001).build()).unwrap();
    for i in 0..500u32 {
        assert!(set.add(&i.to_be_bytes()));
    }
    for i in 0..500u32 {
        assert!(set.contains(&i.to_be_bytes()));
    }
    for i in (0..500u32).step_by(2) {
        assert!(set.remove(&i.to_be_bytes()));
    }
    for i in 0..500u32 {
        assert_eq!(set.contains(&i.to_be_bytes()), i % 2 == 1);
    }
}

#[test]
fn p_near_one_still_behaves_correctly() {
    let set = lazy_skipset::SkipSet::new(SkipSetConfig::builder().p(0.999).build()).unwrap();
    for i in 0..500u32 {
        assert!(set.add(&i.to_be_bytes()));
    }
    for i in 0..500u32 {
        assert!(set.contains(&i.to_be_bytes()));
    }
}

#[test]
fn many_elements_with_colliding_random_levels_stay_correct() {
    // A tiny max_level forces most nodes to collide on the same top level.
    let set = lazy_skipset::SkipSet::new(SkipSetConfig::builder().max_level(2).p(0.9).build()).unwrap();
    for i in 0..1000u32 {
        assert!(set.add(&i.to_be_bytes()));
    }
    for i in 0..1000u32 {
        assert!(set.contains(&i.to_be_bytes()));
    }
}

#[test]
fn rejects_invalid_configurations() {
    let config = SkipSetConfig::builder().max_level(0).build();
    assert!(lazy_skipset::SkipSet::new(config).is_err());

    let config = SkipSetConfig::builder().p(1.5).build();
    assert!(lazy_skipset::SkipSet::new(config).is_err());
}

#[test]
fn inserting_the_byte_strings_a_naive_sentinel_encoding_might_use() {
    let set = lazy_skipset::SkipSet::new(Default::default()).unwrap();
    for lookalike in [&b""[..], b"\0", &[0xff; 16], b"-inf", b"+inf", b"MIN", b"MAX"] {
        assert!(set.add(lookalike));
        assert!(set.contains(lookalike));
    }
    assert!(set.add(b"between"));
    assert!(set.contains(b"between"));
}
