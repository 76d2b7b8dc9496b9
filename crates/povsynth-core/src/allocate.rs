//! Two-level multinomial allocation of user edit budgets onto pages.
//!
//! Level one splits a user's budget over topic×POV cells using the user's
//! preference vector; level two splits each non-empty cell over pages using
//! the cell topic's page distribution.

use anyhow::{ensure, Context, Result};
use rand::Rng;

use crate::dist::multinomial;
use crate::params::Params;
use crate::preference::Preferences;

/// One unsequenced edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    /// Topic index.
    pub topic: usize,
    /// POV index within the topic.
    pub pov: usize,
    /// Author (0-based).
    pub user: usize,
}

/// Edits grouped by page, indexed by page number.
pub type EditsByPage = Vec<Vec<Edit>>;

/// Allocate `counts[u]` edits for every user `u`.
///
/// Users are processed in order; within a user, cells in order; within a
/// cell, pages in ascending order.
pub fn allocate_edits<R: Rng + ?Sized>(
    params: &Params,
    prefs: &Preferences,
    counts: &[u64],
    rng: &mut R,
) -> Result<EditsByPage> {
    ensure!(
        counts.len() == params.users(),
        "expected {} edit counts, got {}",
        params.users(),
        counts.len()
    );

    let mut by_page: EditsByPage = vec![Vec::new(); params.pages()];
    for (user, &budget) in counts.iter().enumerate() {
        let per_cell = multinomial(rng, budget, &prefs.users[user])?;
        for (cell, &cell_count) in per_cell.iter().enumerate() {
            if cell_count == 0 {
                continue;
            }
            let (topic, pov) = params.cell_of(cell);
            let per_page = multinomial(rng, cell_count, &prefs.pages[topic])?;
            let edit = Edit { topic, pov, user };
            for (page, &n) in per_page.iter().enumerate().filter(|(_, n)| **n > 0) {
                let n = usize::try_from(n).context("edit count exceeds usize")?;
                by_page[page].extend(std::iter::repeat(edit).take(n));
            }
        }
    }
    Ok(by_page)
}
