//! Revert-rate priors and the per-revision revert decision.
//!
//! Three families of rates exist, selected by how a revision relates to its
//! parent on the same page:
//!
//! | parent vs. current          | rate                                   |
//! |-----------------------------|----------------------------------------|
//! | different topic             | `general[current_topic]`               |
//! | same topic, same POV        | `topic_internal[current_topic]`        |
//! | same topic, different POV   | `pov.rate(topic, current, previous)`   |

use anyhow::{anyhow, ensure, Result};
use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::params::Params;
use crate::sequence::Revision;

/// POV-transition revert rates, one per ordered pair of distinct POVs per topic.
///
/// Stored as a dense `topics × povs × povs` table; diagonal slots are never
/// drawn and never read.
#[derive(Clone, Debug, PartialEq)]
pub struct PovRevertTable {
    povs: usize,
    rates: Vec<f64>,
}

impl PovRevertTable {
    /// Draw `topics × povs × (povs − 1)` rates.
    ///
    /// Draw order is topic-major, then current POV, then previous POV
    /// skipping the diagonal.
    pub fn sample<R: Rng + ?Sized>(
        topics: usize,
        povs: usize,
        beta: &Beta<f64>,
        rng: &mut R,
    ) -> Self {
        let mut rates = vec![f64::NAN; topics * povs * povs];
        for topic in 0..topics {
            for current in 0..povs {
                for previous in (0..povs).filter(|p| *p != current) {
                    rates[(topic * povs + current) * povs + previous] = beta.sample(rng);
                }
            }
        }
        Self { povs, rates }
    }

    /// Rate of reverting a `previous`-POV revision with a `current`-POV one.
    ///
    /// # Panics
    /// Panics if `current == previous`; same-POV transitions use the
    /// topic-internal rate.
    #[must_use]
    pub fn rate(&self, topic: usize, current: usize, previous: usize) -> f64 {
        assert_ne!(
            current, previous,
            "POV transition rate requested for identical POVs"
        );
        self.rates[(topic * self.povs + current) * self.povs + previous]
    }

    /// All drawn rates (diagonal excluded), in draw order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.rates.iter().copied().filter(|r| !r.is_nan())
    }
}

/// The three revert-rate families.
#[derive(Clone, Debug, PartialEq)]
pub struct RevertRates {
    /// Cross-topic revert rate, by the reverting revision's topic.
    pub general: Vec<f64>,
    /// Same-topic, same-POV revert rate.
    pub topic_internal: Vec<f64>,
    /// Same-topic, cross-POV revert rates.
    pub pov: PovRevertTable,
}

impl RevertRates {
    /// Draw `general`, then `topic_internal`, then the POV table.
    pub fn sample<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self> {
        let p = params.priors();
        let gamma = Beta::new(p.gamma_alpha, p.gamma_beta)
            .map_err(|e| anyhow!("invalid revert Beta({}, {}): {e}", p.gamma_alpha, p.gamma_beta))?;
        let psi = Beta::new(p.psi_alpha, p.psi_beta)
            .map_err(|e| anyhow!("invalid POV revert Beta({}, {}): {e}", p.psi_alpha, p.psi_beta))?;

        let general = (0..params.topics()).map(|_| gamma.sample(rng)).collect();
        let topic_internal = (0..params.topics()).map(|_| gamma.sample(rng)).collect();
        let pov = PovRevertTable::sample(params.topics(), params.povs_per_topic(), &psi, rng);
        Ok(Self { general, topic_internal, pov })
    }

    /// Select the rule and probability governing `current` reverting `previous`.
    #[must_use]
    pub fn select(
        &self,
        current: (usize, usize),
        previous: (usize, usize),
    ) -> (RevertRule, f64) {
        let (topic, pov) = current;
        let (prev_topic, prev_pov) = previous;
        if topic != prev_topic {
            (RevertRule::CrossTopic, self.general[topic])
        } else if pov == prev_pov {
            (RevertRule::SameTopicSamePov, self.topic_internal[topic])
        } else {
            (RevertRule::CrossPov, self.pov.rate(topic, pov, prev_pov))
        }
    }
}

/// Which revert-rate family decided a revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevertRule {
    /// Parent is in a different topic.
    CrossTopic,
    /// Parent shares topic and POV.
    SameTopicSamePov,
    /// Parent shares the topic but holds another POV.
    CrossPov,
}

/// Per-rule decision counts from one classification pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevertStats {
    /// Decisions made with the general rate.
    pub cross_topic: u64,
    /// Decisions made with the topic-internal rate.
    pub same_pov: u64,
    /// Decisions made with a POV-transition rate.
    pub cross_pov: u64,
    /// Revisions marked as reverts.
    pub reverts: u64,
}

impl RevertStats {
    fn record(&mut self, rule: RevertRule) {
        match rule {
            RevertRule::CrossTopic => self.cross_topic += 1,
            RevertRule::SameTopicSamePov => self.same_pov += 1,
            RevertRule::CrossPov => self.cross_pov += 1,
        }
    }

    /// Total number of revert decisions (revisions with a parent).
    #[must_use]
    pub const fn decisions(&self) -> u64 {
        self.cross_topic + self.same_pov + self.cross_pov
    }
}

/// Fill `is_revert` for every revision that has a parent.
///
/// `revisions` must be sorted by id (as produced by the sequencer); one
/// uniform draw is consumed per revision with a parent, in id order.
pub fn classify_reverts<R: Rng + ?Sized>(
    revisions: &mut [Revision],
    rates: &RevertRates,
    rng: &mut R,
) -> Result<RevertStats> {
    let mut stats = RevertStats::default();
    for i in 0..revisions.len() {
        let Some(parent_id) = revisions[i].parent else {
            continue;
        };
        let parent = revisions[..i]
            .binary_search_by_key(&parent_id, |r| r.id)
            .map_err(|_| anyhow!("revision {} points at unknown parent {parent_id}", revisions[i].id))?;
        let previous = (revisions[parent].topic, revisions[parent].pov);
        let current = (revisions[i].topic, revisions[i].pov);

        let (rule, p) = rates.select(current, previous);
        ensure!(
            (0.0..=1.0).contains(&p),
            "revert probability {p} outside [0, 1] for revision {}",
            revisions[i].id
        );
        stats.record(rule);

        let reverted = rng.random::<f64>() < p;
        revisions[i].is_revert = reverted;
        if reverted {
            stats.reverts += 1;
        }
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn rev(id: u64, parent: Option<u64>, topic: usize, pov: usize) -> Revision {
        Revision { id, page: 0, topic, pov, user: 0, parent, is_revert: false }
    }

    fn fixed_rates() -> RevertRates {
        let mut rng = StdRng::seed_from_u64(0);
        let psi = Beta::new(0.8, 0.2).unwrap();
        RevertRates {
            general: vec![0.0, 0.0],
            topic_internal: vec![1.0, 1.0],
            pov: PovRevertTable::sample(2, 3, &psi, &mut rng),
        }
    }

    #[test]
    fn pov_table_draw_count() {
        let rates = fixed_rates();
        assert_eq!(rates.pov.iter().count(), 2 * 3 * 2);
        assert!(rates.pov.iter().all(|r| (0.0..=1.0).contains(&r)));
    }

    #[test]
    #[should_panic(expected = "identical POVs")]
    fn pov_table_rejects_diagonal() {
        let _ = fixed_rates().pov.rate(0, 1, 1);
    }

    #[test]
    fn rule_selection() {
        let rates = fixed_rates();
        assert_eq!(rates.select((1, 0), (0, 0)).0, RevertRule::CrossTopic);
        assert_eq!(rates.select((1, 2), (1, 2)).0, RevertRule::SameTopicSamePov);
        let (rule, p) = rates.select((1, 2), (1, 0));
        assert_eq!(rule, RevertRule::CrossPov);
        assert!((p - rates.pov.rate(1, 2, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn classification_uses_extreme_rates() {
        let rates = fixed_rates();
        let mut revs = vec![
            rev(1, None, 0, 0),
            rev(2, Some(1), 0, 0), // same pov -> rate 1.0
            rev(3, Some(2), 1, 0), // cross topic -> rate 0.0
            rev(4, None, 1, 1),
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let stats = classify_reverts(&mut revs, &rates, &mut rng).unwrap();
        assert!(!revs[0].is_revert);
        assert!(revs[1].is_revert);
        assert!(!revs[2].is_revert);
        assert!(!revs[3].is_revert);
        assert_eq!(stats.same_pov, 1);
        assert_eq!(stats.cross_topic, 1);
        assert_eq!(stats.cross_pov, 0);
        assert_eq!(stats.reverts, 1);
    }

    #[test]
    fn dangling_parent_is_an_error() {
        let rates = fixed_rates();
        let mut revs = vec![rev(1, None, 0, 0), rev(2, Some(9), 0, 0)];
        let mut rng = StdRng::seed_from_u64(5);
        assert!(classify_reverts(&mut revs, &rates, &mut rng).is_err());
    }
}
