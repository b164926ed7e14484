use snapjig_core::rng::{rand_unit, shuffled_order, splitmix32};

#[test]
fn shuffle_is_a_permutation() {
    for seed in [0u32, 1, 0xFFFF_FFFF, 0x1234_5678] {
        let order = shuffled_order(seed, 50);
        let mut seen = vec![false; 50];
        for value in order {
            assert!(value < 50);
            assert!(!seen[value], "duplicate order value {value}");
            seen[value] = true;
        }
        assert!(seen.iter().all(|&flag| flag));
    }
}

#[test]
fn shuffle_is_seed_deterministic() {
    assert_eq!(shuffled_order(99, 20), shuffled_order(99, 20));
    assert_ne!(shuffled_order(99, 20), shuffled_order(100, 20));
}

#[test]
fn unit_draws_stay_in_range() {
    for salt in 0..200 {
        let value = rand_unit(0xABCD_EF01, salt);
        assert!((0.0..1.0).contains(&value));
    }
}

#[test]
fn mixing_changes_the_seed() {
    assert_ne!(splitmix32(1), splitmix32(2));
    assert_ne!(splitmix32(0), 0);
}
