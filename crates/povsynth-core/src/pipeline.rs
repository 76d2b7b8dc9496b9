//! End-to-end generation: every phase in its fixed RNG order.
//!
//! preferences → page distributions → revert rates → edit volumes →
//! allocation → per-page shuffles → revert draws.
//!
//! Reordering any of these changes the output for a given seed.

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::allocate::allocate_edits;
use crate::params::Params;
use crate::preference::Preferences;
use crate::revert::{classify_reverts, RevertRates, RevertStats};
use crate::sequence::{sequence_revisions, Revision};
use crate::truth::ClusteringGroundTruth;
use crate::volume::{edit_count, sample_volumes};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Everything one generation run produces.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Parameters the run used.
    pub params: Params,
    /// Sampled user preferences and page distributions.
    pub preferences: Preferences,
    /// Sampled revert rates.
    pub revert_rates: RevertRates,
    /// Raw per-user edit volumes.
    pub volumes: Vec<f64>,
    /// Classified revisions, sorted by id.
    pub revisions: Vec<Revision>,
    /// Per-rule revert decision counts.
    pub revert_stats: RevertStats,
    /// Derived ground-truth clusterings.
    pub truth: ClusteringGroundTruth,
}

/// Run the full model with a `StdRng` seeded from `seed`.
pub fn generate(params: &Params, seed: u64) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_with_rng(params, &mut rng)
}

/// Run the full model on a caller-supplied RNG.
pub fn generate_with_rng<R: rand::Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Dataset> {
    let preferences = Preferences::sample(params, rng)?;
    debug!(
        users = params.users(),
        topics = params.topics(),
        pages = params.pages(),
        "sampled preferences"
    );

    let revert_rates = RevertRates::sample(params, rng)?;
    let volumes = sample_volumes(params, rng)?;
    let counts: Vec<u64> = volumes.iter().copied().map(edit_count).collect();
    debug!(edits = counts.iter().sum::<u64>(), "sampled edit volumes");

    let by_page = allocate_edits(params, &preferences, &counts, rng)?;
    let mut revisions = sequence_revisions(by_page, rng);
    let revert_stats = classify_reverts(&mut revisions, &revert_rates, rng)?;
    debug!(
        revisions = revisions.len(),
        decisions = revert_stats.decisions(),
        reverts = revert_stats.reverts,
        cross_topic = revert_stats.cross_topic,
        same_pov = revert_stats.same_pov,
        cross_pov = revert_stats.cross_pov,
        "classified reverts"
    );

    let truth = ClusteringGroundTruth::build(params, &preferences, &revisions);
    Ok(Dataset {
        params: params.clone(),
        preferences,
        revert_rates,
        volumes,
        revisions,
        revert_stats,
        truth,
    })
}
