//! Sampling primitives the generative model is built from.
//!
//! `rand_distr` supplies the scalar distributions (gamma, beta, binomial);
//! the vector-valued ones are composed here so that their RNG consumption
//! order is fixed and documented:
//!
//! - [`symmetric_dirichlet`]: `dim` gamma draws, normalised.
//! - [`multinomial`]: one conditional binomial draw per category until the
//!   trial budget is exhausted; the last category takes the remainder.
//! - [`BoundedPareto`]: one uniform draw pushed through the inverse CDF.

use anyhow::{anyhow, ensure, Result};
use rand::Rng;
use rand_distr::{Binomial, Distribution, Gamma};

/// Draw from a symmetric Dirichlet of dimension `dim`.
///
/// If every gamma sample underflows to zero (tiny concentrations), the draw
/// collapses onto one uniformly chosen coordinate, which is the limit of the
/// distribution as the concentration goes to zero.
pub fn symmetric_dirichlet<R: Rng + ?Sized>(
    rng: &mut R,
    concentration: f64,
    dim: usize,
) -> Result<Vec<f64>> {
    ensure!(dim > 0, "Dirichlet dimension must be positive");
    let gamma = Gamma::new(concentration, 1.0)
        .map_err(|e| anyhow!("invalid Dirichlet concentration {concentration}: {e}"))?;

    let mut draws: Vec<f64> = (0..dim).map(|_| gamma.sample(rng)).collect();
    let total: f64 = draws.iter().sum();
    if total > 0.0 && total.is_finite() {
        for d in &mut draws {
            *d /= total;
        }
    } else {
        draws.fill(0.0);
        let hot = rng.random_range(0..dim);
        draws[hot] = 1.0;
    }
    Ok(draws)
}

/// Split `n` trials over `probs` (which should sum to ~1).
///
/// The returned counts always sum to exactly `n`.
pub fn multinomial<R: Rng + ?Sized>(rng: &mut R, n: u64, probs: &[f64]) -> Result<Vec<u64>> {
    ensure!(!probs.is_empty(), "multinomial needs at least one category");
    ensure!(
        probs.iter().all(|p| p.is_finite() && *p >= 0.0),
        "multinomial probabilities must be finite and non-negative"
    );

    let last = probs.len() - 1;
    let mut counts = vec![0u64; probs.len()];
    let mut remaining = n;
    let mut mass = 1.0f64;

    for (i, &p) in probs.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if i == last {
            counts[i] = remaining;
            break;
        }
        // Conditional probability of category i given it was not 0..i.
        let q = if p <= 0.0 {
            0.0
        } else if mass <= p {
            1.0
        } else {
            p / mass
        };
        let k = Binomial::new(remaining, q)
            .map_err(|e| anyhow!("binomial({remaining}, {q}): {e}"))?
            .sample(rng);
        counts[i] = k;
        remaining -= k;
        mass -= p;
    }
    Ok(counts)
}

/// Pareto distribution truncated to `[lower, upper]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedPareto {
    shape: f64,
    lower: f64,
    upper: f64,
    lower_pow: f64,
    upper_pow: f64,
}

impl BoundedPareto {
    /// Validate and precompute `lower^shape` / `upper^shape`.
    pub fn new(shape: f64, lower: f64, upper: f64) -> Result<Self> {
        ensure!(
            shape.is_finite() && shape > 0.0,
            "Pareto shape must be positive (got {shape})"
        );
        ensure!(
            lower.is_finite() && lower > 0.0,
            "Pareto lower bound must be positive (got {lower})"
        );
        ensure!(
            upper.is_finite() && lower < upper,
            "Pareto bounds must satisfy lower < upper (got {lower} .. {upper})"
        );
        let lower_pow = lower.powf(shape);
        let upper_pow = upper.powf(shape);
        ensure!(
            upper_pow.is_finite() && lower_pow > 0.0,
            "Pareto bounds overflow at shape {shape}"
        );
        Ok(Self { shape, lower, upper, lower_pow, upper_pow })
    }

    /// Lower bound.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Inverse CDF at `u ∈ [0, 1)`; `u = 0` maps to `lower`, `u → 1` to `upper`.
    #[must_use]
    pub fn quantile(&self, u: f64) -> f64 {
        let (la, ua) = (self.lower_pow, self.upper_pow);
        let base = -(u * ua - u * la - ua) / (ua * la);
        base.powf(-1.0 / self.shape).clamp(self.lower, self.upper)
    }
}

impl Distribution<f64> for BoundedPareto {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.quantile(rng.random::<f64>())
    }
}
