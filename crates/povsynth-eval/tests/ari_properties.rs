//! Partition-level properties of the adjusted Rand index.

use povsynth_eval::adjusted_rand_index;
use proptest::prelude::*;

fn labelings() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1usize..40).prop_flat_map(|n| {
        (
            prop::collection::vec(0usize..6, n),
            prop::collection::vec(0usize..6, n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn symmetric((truth, est) in labelings()) {
        let ab = adjusted_rand_index(&truth, &est).unwrap();
        let ba = adjusted_rand_index(&est, &truth).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn label_names_do_not_matter((truth, est) in labelings(), shift in 1usize..100) {
        let renamed: Vec<usize> = est.iter().map(|l| l * 7 + shift).collect();
        prop_assert_eq!(
            adjusted_rand_index(&truth, &est).unwrap(),
            adjusted_rand_index(&truth, &renamed).unwrap()
        );
    }

    #[test]
    fn never_exceeds_one((truth, est) in labelings()) {
        let ari = adjusted_rand_index(&truth, &est).unwrap();
        prop_assert!(ari.is_finite());
        prop_assert!(ari <= 1.0 + 1e-12, "{}", ari);
    }

    #[test]
    fn self_comparison_is_perfect((truth, _) in labelings()) {
        prop_assert_eq!(adjusted_rand_index(&truth, &truth).unwrap(), 1.0);
    }
}
