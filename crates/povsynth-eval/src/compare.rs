//! Score an estimated clustering against a truth clustering.

use anyhow::{ensure, Result};
use rand::Rng;
use std::path::Path;

use crate::ari::adjusted_rand_index;
use crate::clustering::{read_clustering, LabelMode, Labeling};

/// The three reported ARI scores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AriScores {
    /// Clusters compared line for line.
    pub full: f64,
    /// Clusters merged per topic block on both sides.
    pub topics_only: f64,
    /// Estimate in full mode against truth POVs redrawn inside their topic block.
    pub randomized_pov: f64,
}

impl std::fmt::Display for AriScores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:?} {:?}", self.full, self.topics_only, self.randomized_pov)
    }
}

/// ARI of two labelings over the same item set.
pub fn score(truth: &Labeling, estimate: &Labeling) -> Result<f64> {
    ensure!(
        truth.items().eq(estimate.items()),
        "truth and estimate cover different items ({} vs {})",
        truth.len(),
        estimate.len()
    );
    adjusted_rand_index(&truth.labels(), &estimate.labels())
}

/// Read both files in every mode and score them.
///
/// The randomized baseline reads the estimate in full mode and gives every
/// truth item a uniform POV slot within its true topic block.
pub fn compare_clusterings<R: Rng + ?Sized>(
    truth: &Path,
    estimate: &Path,
    povs_per_cluster: usize,
    rng: &mut R,
) -> Result<AriScores> {
    let read = |path: &Path, mode, rng: &mut R| read_clustering(path, mode, povs_per_cluster, rng);

    let full = score(
        &read(truth, LabelMode::Full, &mut *rng)?,
        &read(estimate, LabelMode::Full, &mut *rng)?,
    )?;
    let topics_only = score(
        &read(truth, LabelMode::TopicsOnly, &mut *rng)?,
        &read(estimate, LabelMode::TopicsOnly, &mut *rng)?,
    )?;
    let randomized_pov = score(
        &read(truth, LabelMode::RandomizePov, &mut *rng)?,
        &read(estimate, LabelMode::Full, &mut *rng)?,
    )?;
    Ok(AriScores { full, topics_only, randomized_pov })
}
