//! Turn per-page edit multisets into a linked revision stream.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::allocate::EditsByPage;

/// Globally unique revision identifier (starts at 1).
pub type RevisionId = u64;

/// A sequenced edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revision {
    /// Revision id, increasing in emission order.
    pub id: RevisionId,
    /// Page index (0-based).
    pub page: usize,
    /// Topic index.
    pub topic: usize,
    /// POV index within the topic.
    pub pov: usize,
    /// Author (0-based).
    pub user: usize,
    /// Previous revision on the same page; `None` for a page's first revision.
    pub parent: Option<RevisionId>,
    /// Whether this revision reverts its parent.
    pub is_revert: bool,
}

/// Shuffle every page's edits, then number them page by page.
///
/// All shuffles (ascending page order, empty pages skipped) happen before
/// any id is assigned. Revisions come back sorted by id with `is_revert`
/// cleared.
pub fn sequence_revisions<R: Rng + ?Sized>(mut by_page: EditsByPage, rng: &mut R) -> Vec<Revision> {
    for edits in by_page.iter_mut().filter(|e| !e.is_empty()) {
        edits.shuffle(rng);
    }

    let total = by_page.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    let mut next_id: RevisionId = 1;
    for (page, edits) in by_page.into_iter().enumerate() {
        let mut parent = None;
        for e in edits {
            out.push(Revision {
                id: next_id,
                page,
                topic: e.topic,
                pov: e.pov,
                user: e.user,
                parent,
                is_revert: false,
            });
            parent = Some(next_id);
            next_id += 1;
        }
    }
    out
}
