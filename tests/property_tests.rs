//! Property-based tests using proptest
//!
//! Invariants that should hold for any pair of sequences:
//! - distance is a metric (symmetry, identity, triangle inequality)
//! - distance is bounded by the sequence lengths
//! - the editop script has exactly `distance` entries
//! - applying the script to the source reproduces the target
//! - a score cutoff never changes a result below it
//! - shared affixes never change the distance

use proptest::prelude::*;

use seqdist::algorithms::{
    editops_apply, editops_to_opcodes, indel_distance, indel_editops, lcs_seq_distance,
    levenshtein, levenshtein_editops, levenshtein_normalized_similarity, opcodes_to_editops,
    EditKind,
};

fn lev(a: &[u8], b: &[u8]) -> usize {
    levenshtein(a, b, (1, 1, 1), None)
}

fn small_seq() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcd".to_vec()), 0..48)
}

/// Long enough to cross the 64-unit word boundary and trigger the
/// divide-and-conquer editops path.
fn long_seq() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"ab".to_vec()), 0..200)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    #[test]
    fn prop_symmetry(a in small_seq(), b in small_seq()) {
        prop_assert_eq!(lev(&a, &b), lev(&b, &a));
    }

    #[test]
    fn prop_identity(a in small_seq()) {
        prop_assert_eq!(lev(&a, &a), 0);
        prop_assert!(levenshtein_editops(&a, &a).is_empty());
    }

    #[test]
    fn prop_boundary(a in small_seq()) {
        prop_assert_eq!(lev(&a, &[]), a.len());
        prop_assert_eq!(lev(&[], &a), a.len());
    }

    #[test]
    fn prop_triangle_inequality(a in small_seq(), b in small_seq(), c in small_seq()) {
        prop_assert!(lev(&a, &c) <= lev(&a, &b) + lev(&b, &c));
    }

    #[test]
    fn prop_bounds(a in small_seq(), b in small_seq()) {
        let d = lev(&a, &b);
        prop_assert!(d <= a.len().max(b.len()));
        prop_assert!(d >= a.len().abs_diff(b.len()));
    }

    #[test]
    fn prop_editops_cardinality(a in small_seq(), b in small_seq()) {
        let d = lev(&a, &b);
        let ops = levenshtein_editops(&a, &b);
        prop_assert_eq!(ops.len(), d);
    }

    #[test]
    fn prop_editops_roundtrip(a in small_seq(), b in small_seq()) {
        let ops = levenshtein_editops(&a, &b);
        let applied = editops_apply(&ops, &a, &b).unwrap();
        prop_assert_eq!(applied, b);
    }

    #[test]
    fn prop_editops_indices_well_formed(a in small_seq(), b in small_seq()) {
        let ops = levenshtein_editops(&a, &b);
        let mut src_floor = 0usize;
        let mut dest_floor = 0usize;
        for op in &ops {
            prop_assert!(op.src_pos >= src_floor);
            prop_assert!(op.dest_pos >= dest_floor);
            match op.kind {
                EditKind::Insert => {
                    prop_assert!(op.src_pos <= a.len());
                    prop_assert!(op.dest_pos < b.len());
                    dest_floor = op.dest_pos + 1;
                }
                EditKind::Delete => {
                    prop_assert!(op.src_pos < a.len());
                    prop_assert!(op.dest_pos <= b.len());
                    src_floor = op.src_pos + 1;
                }
                EditKind::Replace => {
                    prop_assert!(op.src_pos < a.len());
                    prop_assert!(op.dest_pos < b.len());
                    src_floor = op.src_pos + 1;
                    dest_floor = op.dest_pos + 1;
                }
            }
        }
    }

    #[test]
    fn prop_cutoff_soundness(a in small_seq(), b in small_seq(), k in 0usize..24) {
        let d = lev(&a, &b);
        let bounded = levenshtein(&a, &b, (1, 1, 1), Some(k));
        if d <= k {
            prop_assert_eq!(bounded, d);
        } else {
            prop_assert_eq!(bounded, k + 1);
        }
    }

    #[test]
    fn prop_affix_invariance(
        x in small_seq(),
        a in small_seq(),
        b in small_seq(),
        y in small_seq(),
    ) {
        let wrapped_a: Vec<u8> = x.iter().chain(a.iter()).chain(y.iter()).copied().collect();
        let wrapped_b: Vec<u8> = x.iter().chain(b.iter()).chain(y.iter()).copied().collect();
        prop_assert_eq!(lev(&wrapped_a, &wrapped_b), lev(&a, &b));
    }

    #[test]
    fn prop_normalized_range(a in small_seq(), b in small_seq()) {
        let ns = levenshtein_normalized_similarity(&a, &b, (1, 1, 1), None);
        prop_assert!((0.0..=100.0).contains(&ns));
        prop_assert_eq!(ns == 100.0, a == b);
    }

    #[test]
    fn prop_opcodes_roundtrip(a in small_seq(), b in small_seq()) {
        let ops = levenshtein_editops(&a, &b);
        let spans = editops_to_opcodes(&ops, a.len(), b.len());
        prop_assert_eq!(opcodes_to_editops(&spans), ops);
    }

    #[test]
    fn prop_width_independence(a in small_seq(), b in small_seq()) {
        let a16: Vec<u16> = a.iter().map(|&c| c as u16).collect();
        let b16: Vec<u16> = b.iter().map(|&c| c as u16).collect();
        let a32: Vec<u32> = a.iter().map(|&c| c as u32).collect();
        let b32: Vec<u32> = b.iter().map(|&c| c as u32).collect();
        let d = lev(&a, &b);
        prop_assert_eq!(levenshtein(&a16, &b16, (1, 1, 1), None), d);
        prop_assert_eq!(levenshtein(&a32, &b32, (1, 1, 1), None), d);
    }

    #[test]
    fn prop_indel_editops_roundtrip(a in small_seq(), b in small_seq()) {
        let d = indel_distance(&a, &b, None);
        let ops = indel_editops(&a, &b);
        prop_assert_eq!(ops.len(), d);
        prop_assert_eq!(editops_apply(&ops, &a, &b).unwrap(), b);
    }

    #[test]
    fn prop_indel_consistent_with_lcs(a in small_seq(), b in small_seq()) {
        let lcs_dist = lcs_seq_distance(&a, &b, None);
        prop_assert!(lcs_dist <= indel_distance(&a, &b, None));
    }
}

proptest! {
    // Fewer cases for the long inputs; each one runs the multi-word kernel
    // and the divide-and-conquer reconstruction.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_long_editops_roundtrip(a in long_seq(), b in long_seq()) {
        let d = lev(&a, &b);
        let ops = levenshtein_editops(&a, &b);
        prop_assert_eq!(ops.len(), d);
        prop_assert_eq!(editops_apply(&ops, &a, &b).unwrap(), b);
    }

    #[test]
    fn prop_long_cutoff_soundness(a in long_seq(), b in long_seq(), k in 0usize..64) {
        let d = lev(&a, &b);
        let bounded = levenshtein(&a, &b, (1, 1, 1), Some(k));
        if d <= k {
            prop_assert_eq!(bounded, d);
        } else {
            prop_assert_eq!(bounded, k + 1);
        }
    }
}

/// Port of the upstream doubling fuzz driver: a handful of base pairs are
/// doubled repeatedly, and at every size the script length and the
/// reconstruction are asserted separately.
#[test]
fn doubling_driver() {
    let cases: [(&str, &str); 6] = [
        ("kitten", "sitting"),
        ("ab", "ba"),
        ("abc", ""),
        ("", "xyz"),
        ("aabbcc", "abcabc"),
        ("qwert", "qwert"),
    ];
    for (base1, base2) in cases {
        let mut s1 = base1.as_bytes().to_vec();
        let mut s2 = base2.as_bytes().to_vec();
        for _ in 0..7 {
            let score = lev(&s1, &s2);
            let ops = levenshtein_editops(&s1, &s2);
            assert_eq!(ops.len(), score, "cardinality for {base1:?}/{base2:?} at len {}", s1.len());
            let applied = editops_apply(&ops, &s1, &s2).unwrap();
            assert_eq!(applied, s2, "reconstruction for {base1:?}/{base2:?} at len {}", s1.len());

            s1 = s1.repeat(2);
            s2 = s2.repeat(2);
        }
    }
}
