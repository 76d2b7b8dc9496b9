//! Ground-truth clusterings derived from a generated dataset.

use crate::params::Params;
use crate::preference::Preferences;
use crate::sequence::{Revision, RevisionId};

/// Revision and user clusterings keyed by topic×POV cell.
///
/// Both vectors have exactly `params.cells()` entries, in
/// `cell = topic × povs + pov` order; empty cells are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusteringGroundTruth {
    /// Revision ids per cell, ascending.
    pub revisions: Vec<Vec<RevisionId>>,
    /// User indices (0-based) per favourite cell, ascending.
    pub users: Vec<Vec<usize>>,
}

impl ClusteringGroundTruth {
    /// Group `revisions` by their cell and users by their favourite cell.
    #[must_use]
    pub fn build(params: &Params, prefs: &Preferences, revisions: &[Revision]) -> Self {
        let mut by_rev = vec![Vec::new(); params.cells()];
        for r in revisions {
            by_rev[params.cell_index(r.topic, r.pov)].push(r.id);
        }
        let mut by_user = vec![Vec::new(); params.cells()];
        for user in 0..params.users() {
            by_user[prefs.favourite_cell(user)].push(user);
        }
        Self { revisions: by_rev, users: by_user }
    }

    /// Number of cells that received at least one revision.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.revisions.iter().filter(|c| !c.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_cell() {
        let params = Params::with_defaults(2, 2, 2).unwrap();
        let prefs = Preferences {
            users: vec![vec![0.1, 0.2, 0.6, 0.1], vec![0.7, 0.1, 0.1, 0.1]],
            pages: vec![vec![1.0], vec![1.0]],
        };
        let mk = |id, topic, pov| Revision {
            id,
            page: 0,
            topic,
            pov,
            user: 0,
            parent: None,
            is_revert: false,
        };
        let revs = vec![mk(1, 1, 1), mk(2, 0, 0), mk(3, 1, 1)];
        let gt = ClusteringGroundTruth::build(&params, &prefs, &revs);
        assert_eq!(gt.revisions, vec![vec![2], vec![], vec![], vec![1, 3]]);
        assert_eq!(gt.users, vec![vec![1], vec![], vec![0], vec![]]);
        assert_eq!(gt.occupied_cells(), 2);
    }
}
