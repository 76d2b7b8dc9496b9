//! Adjusted Rand index via the pair-confusion matrix.

use anyhow::{ensure, Result};
use std::collections::HashMap;

/// Pair counts over all ordered pairs of distinct items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairConfusion {
    /// Pairs split by both labelings.
    pub tn: u128,
    /// Pairs split by truth, joined by the estimate.
    pub fp: u128,
    /// Pairs joined by truth, split by the estimate.
    pub fn_: u128,
    /// Pairs joined by both labelings.
    pub tp: u128,
}

/// Pair-confusion counts of two equally long label vectors.
pub fn pair_confusion(truth: &[usize], estimate: &[usize]) -> Result<PairConfusion> {
    ensure!(
        truth.len() == estimate.len(),
        "label vectors differ in length ({} vs {})",
        truth.len(),
        estimate.len()
    );

    let mut joint: HashMap<(usize, usize), u128> = HashMap::new();
    let mut rows: HashMap<usize, u128> = HashMap::new();
    let mut cols: HashMap<usize, u128> = HashMap::new();
    for (&t, &e) in truth.iter().zip(estimate) {
        *joint.entry((t, e)).or_default() += 1;
        *rows.entry(t).or_default() += 1;
        *cols.entry(e).or_default() += 1;
    }

    let n = truth.len() as u128;
    let joint_sq = squares(&joint);
    let tp = joint_sq - n;
    let fp = squares(&cols) - joint_sq;
    let fn_ = squares(&rows) - joint_sq;
    let tn = n * n - fp - fn_ - joint_sq;
    Ok(PairConfusion { tn, fp, fn_, tp })
}

fn squares<K>(counts: &HashMap<K, u128>) -> u128 {
    counts.values().map(|c| c * c).sum()
}

/// Adjusted Rand index of `estimate` against `truth`.
///
/// Returns exactly `1.0` when the two labelings induce the same partition,
/// including the trivial all-in-one and all-singleton cases.
#[allow(clippy::cast_precision_loss)]
pub fn adjusted_rand_index(truth: &[usize], estimate: &[usize]) -> Result<f64> {
    let c = pair_confusion(truth, estimate)?;
    if c.fn_ == 0 && c.fp == 0 {
        return Ok(1.0);
    }
    let (tn, fp, fn_, tp) = (c.tn as f64, c.fp as f64, c.fn_ as f64, c.tp as f64);
    Ok(2.0 * (tp * tn - fn_ * fp) / ((tp + fn_) * (fn_ + tn) + (tp + fp) * (fp + tn)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_partitions_score_one() {
        let a = [0, 0, 1, 1, 2];
        let relabelled = [7, 7, 3, 3, 9];
        assert_eq!(adjusted_rand_index(&a, &a).unwrap(), 1.0);
        assert_eq!(adjusted_rand_index(&a, &relabelled).unwrap(), 1.0);
        assert_eq!(adjusted_rand_index(&[], &[]).unwrap(), 1.0);
    }

    #[test]
    fn known_value() {
        let truth = [0, 0, 1, 1];
        let est = [0, 0, 1, 2];
        let ari = adjusted_rand_index(&truth, &est).unwrap();
        assert!((ari - 0.571_428_571_428_571_4).abs() < 1e-12, "{ari}");

        let truth = [0, 0, 0, 1, 1, 1];
        let est = [0, 0, 1, 1, 2, 2];
        let ari = adjusted_rand_index(&truth, &est).unwrap();
        assert!((ari - 0.242_424_242_424_242_4).abs() < 1e-12, "{ari}");
    }

    #[test]
    fn orthogonal_partition_is_negative() {
        let ari = adjusted_rand_index(&[0, 0, 1, 1], &[0, 1, 0, 1]).unwrap();
        assert!((ari + 0.5).abs() < 1e-12, "{ari}");
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(adjusted_rand_index(&[0, 1], &[0]).is_err());
    }
}
