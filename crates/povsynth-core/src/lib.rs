//! povsynth-core — generative model for synthetic topic/POV edit histories.
//!
//! The model assigns every user a topic×POV preference, draws a heavy-tailed
//! edit volume per user, spreads those edits over pages through nested
//! multinomials, sequences each page's edits into a revision chain and marks
//! reverts with transition-dependent probabilities. The result is a revision
//! stream plus the ground-truth clusterings it was generated from.
//!
//! ```no_run
//! use povsynth_core::{params::Params, pipeline::generate};
//!
//! let params = Params::with_defaults(4, 2, 1_000)?;
//! let data = generate(&params, 42)?;
//! println!("{} revisions", data.revisions.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Edits, multinomial allocation of user budgets onto pages.
pub mod allocate;
/// Dirichlet, multinomial and bounded-Pareto samplers.
pub mod dist;
/// Revision-stream and ground-truth writers.
pub mod emit;
/// Validated run configuration.
pub mod params;
/// Phase ordering and the `Dataset` result.
pub mod pipeline;
/// User and page preference sampling.
pub mod preference;
/// Revert rates and the revert classifier.
pub mod revert;
/// Revision numbering and parent links.
pub mod sequence;
/// Ground-truth clusterings.
pub mod truth;
/// Per-user edit volumes.
pub mod volume;

pub use params::{Params, Priors};
pub use pipeline::{generate, Dataset};
pub use sequence::{Revision, RevisionId};
