//! Per-user edit volume from a bounded Pareto distribution.

use anyhow::Result;
use rand::Rng;
use rand_distr::Distribution;

use crate::dist::BoundedPareto;
use crate::params::Params;

/// Bounded-Pareto sampler configured from the run parameters.
pub fn edit_volume_distribution(params: &Params) -> Result<BoundedPareto> {
    let p = params.priors();
    BoundedPareto::new(p.pareto_shape, p.edits_min, p.edits_max)
}

/// One raw volume draw per user, in user order.
pub fn sample_volumes<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Vec<f64>> {
    let dist = edit_volume_distribution(params)?;
    Ok((0..params.users()).map(|_| dist.sample(rng)).collect())
}

/// Usable edit count of a raw draw (truncated toward zero).
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn edit_count(volume: f64) -> u64 {
    volume.max(0.0).floor() as u64
}
