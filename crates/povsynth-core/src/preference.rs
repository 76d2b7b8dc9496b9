//! User topic×POV preferences and per-topic page popularity.

use anyhow::Result;
use rand::Rng;

use crate::dist::symmetric_dirichlet;
use crate::params::Params;

/// Sampled preference layer of the model.
#[derive(Clone, Debug, PartialEq)]
pub struct Preferences {
    /// `users[u][cell]`: probability that user `u` edits in topic×POV `cell`.
    pub users: Vec<Vec<f64>>,
    /// `pages[t][page]`: probability that an edit in topic `t` lands on `page`.
    pub pages: Vec<Vec<f64>>,
}

impl Preferences {
    /// Draw all user preferences, then all topic page distributions.
    pub fn sample<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self> {
        let users = (0..params.users())
            .map(|_| symmetric_dirichlet(rng, params.alpha(), params.cells()))
            .collect::<Result<Vec<_>>>()?;
        let pages = (0..params.topics())
            .map(|_| symmetric_dirichlet(rng, params.priors().beta, params.pages()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { users, pages })
    }

    /// Highest-preference cell of `user`; ties go to the first maximum.
    #[must_use]
    pub fn favourite_cell(&self, user: usize) -> usize {
        let mut best = 0;
        for (cell, &p) in self.users[user].iter().enumerate() {
            if p > self.users[user][best] {
                best = cell;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn shapes_follow_params() {
        let params = Params::with_defaults(3, 2, 40).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let prefs = Preferences::sample(&params, &mut rng).unwrap();
        assert_eq!(prefs.users.len(), 40);
        assert!(prefs.users.iter().all(|u| u.len() == 6));
        assert_eq!(prefs.pages.len(), 3);
        assert!(prefs.pages.iter().all(|p| p.len() == params.pages()));
    }

    #[test]
    fn favourite_cell_breaks_ties_low() {
        let prefs = Preferences {
            users: vec![vec![0.25, 0.5, 0.25], vec![0.4, 0.2, 0.4]],
            pages: vec![],
        };
        assert_eq!(prefs.favourite_cell(0), 1);
        assert_eq!(prefs.favourite_cell(1), 0);
    }
}
