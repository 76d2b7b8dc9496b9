//! Immutable run configuration: model dimensions plus prior constants.
//!
//! A [`Params`] is built once from the command line (and an optional profile)
//! and threaded by reference through every sampler. Construction validates
//! everything up front so the generative phases never see a degenerate value.

use anyhow::{anyhow, ensure, Result};
use serde::Deserialize;

/// Pages per user observed in the reference wiki dump (pages / users).
pub const DEFAULT_PAGES_PER_USER: f64 = 9_784_794.0 / 31_604_659.0;

/// Largest page count a run may derive from `users × pages_per_user`.
pub const MAX_PAGES: u32 = u32::MAX;

/// Namespace column emitted for every revision-stream record.
pub const PAGE_NAMESPACE: u32 = 1234;

/// Prior constants of the hierarchical model.
///
/// `alpha == None` means "derive from the dimensions": `5 / (topics × povs)`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Priors {
    /// Symmetric Dirichlet concentration of each user's topic×POV preference.
    pub alpha: Option<f64>,
    /// Symmetric Dirichlet concentration of each topic's page distribution.
    pub beta: f64,
    /// Beta shape `a` for general and topic-internal revert rates.
    pub gamma_alpha: f64,
    /// Beta shape `b` for general and topic-internal revert rates.
    pub gamma_beta: f64,
    /// Beta shape `a` for POV-transition revert rates.
    pub psi_alpha: f64,
    /// Beta shape `b` for POV-transition revert rates.
    pub psi_beta: f64,
    /// Bounded-Pareto shape of the per-user edit volume.
    pub pareto_shape: f64,
    /// Lower bound of the per-user edit volume.
    pub edits_min: f64,
    /// Upper bound of the per-user edit volume.
    pub edits_max: f64,
    /// Pages generated per user (`pages = floor(users × ratio)`).
    pub pages_per_user: f64,
}

impl Default for Priors {
    fn default() -> Self {
        Self {
            alpha: None,
            beta: 0.1,
            gamma_alpha: 0.2,
            gamma_beta: 0.8,
            psi_alpha: 0.8,
            psi_beta: 0.2,
            pareto_shape: 0.8,
            edits_min: 1.0,
            edits_max: 147_696.0,
            pages_per_user: DEFAULT_PAGES_PER_USER,
        }
    }
}

/// Validated model dimensions and priors.
#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    topics: usize,
    povs_per_topic: usize,
    users: usize,
    pages: usize,
    alpha: f64,
    priors: Priors,
}

impl Params {
    /// Build and validate a parameter set.
    ///
    /// Fails on zero dimensions, non-positive or non-finite prior constants,
    /// degenerate Pareto bounds (`edits_min <= 0` or `edits_min >= edits_max`),
    /// a page count above [`MAX_PAGES`], and dimensions whose sampler tables
    /// would not be addressable.
    pub fn new(topics: usize, povs_per_topic: usize, users: usize, priors: Priors) -> Result<Self> {
        ensure!(topics > 0, "topic count must be positive (got {topics})");
        ensure!(
            povs_per_topic > 0,
            "POVs per topic must be positive (got {povs_per_topic})"
        );
        ensure!(users > 0, "user count must be positive (got {users})");

        let cells = topics
            .checked_mul(povs_per_topic)
            .ok_or_else(|| anyhow!("topics × POVs overflows"))?;
        cells
            .checked_mul(povs_per_topic)
            .ok_or_else(|| anyhow!("POV revert table (topics × POVs × POVs) overflows"))?;
        #[allow(clippy::cast_precision_loss)]
        let alpha = priors.alpha.unwrap_or(5.0 / cells as f64);

        positive("alpha", alpha)?;
        positive("beta", priors.beta)?;
        positive("gamma_alpha", priors.gamma_alpha)?;
        positive("gamma_beta", priors.gamma_beta)?;
        positive("psi_alpha", priors.psi_alpha)?;
        positive("psi_beta", priors.psi_beta)?;
        positive("pareto_shape", priors.pareto_shape)?;
        positive("edits_min", priors.edits_min)?;
        positive("pages_per_user", priors.pages_per_user)?;
        ensure!(
            priors.edits_max.is_finite() && priors.edits_min < priors.edits_max,
            "edit volume bounds must satisfy edits_min < edits_max (got {} .. {})",
            priors.edits_min,
            priors.edits_max
        );

        #[allow(clippy::cast_precision_loss)]
        let raw_pages = (users as f64 * priors.pages_per_user).floor();
        ensure!(
            raw_pages <= f64::from(MAX_PAGES),
            "users × pages_per_user = {raw_pages} exceeds the page limit {MAX_PAGES}"
        );
        // In range after the check above.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pages = usize::try_from(raw_pages as u32)
            .map_err(|_| anyhow!("page count {raw_pages} does not fit in usize"))?
            .max(1);
        topics
            .checked_mul(pages)
            .ok_or_else(|| anyhow!("topics × pages overflows"))?;

        Ok(Self {
            topics,
            povs_per_topic,
            users,
            pages,
            alpha,
            priors,
        })
    }

    /// Parameter set with default priors.
    pub fn with_defaults(topics: usize, povs_per_topic: usize, users: usize) -> Result<Self> {
        Self::new(topics, povs_per_topic, users, Priors::default())
    }

    /// Number of topics.
    #[inline]
    #[must_use]
    pub const fn topics(&self) -> usize {
        self.topics
    }

    /// Number of POVs inside every topic.
    #[inline]
    #[must_use]
    pub const fn povs_per_topic(&self) -> usize {
        self.povs_per_topic
    }

    /// Number of users.
    #[inline]
    #[must_use]
    pub const fn users(&self) -> usize {
        self.users
    }

    /// Number of pages (always ≥ 1).
    #[inline]
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }

    /// Number of topic×POV cells.
    #[inline]
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.topics * self.povs_per_topic
    }

    /// Resolved user preference concentration.
    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Prior constants as configured.
    #[inline]
    #[must_use]
    pub const fn priors(&self) -> &Priors {
        &self.priors
    }

    /// Flat cell index of `(topic, pov)`.
    #[inline]
    #[must_use]
    pub const fn cell_index(&self, topic: usize, pov: usize) -> usize {
        topic * self.povs_per_topic + pov
    }

    /// Inverse of [`Params::cell_index`].
    #[inline]
    #[must_use]
    pub const fn cell_of(&self, cell: usize) -> (usize, usize) {
        (cell / self.povs_per_topic, cell % self.povs_per_topic)
    }
}

fn positive(name: &str, v: f64) -> Result<()> {
    ensure!(
        v.is_finite() && v > 0.0,
        "{name} must be a positive finite number (got {v})"
    );
    Ok(())
}
