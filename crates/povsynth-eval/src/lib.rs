//! povsynth-eval — scoring and reshaping of clustering files.
//!
//! - `clustering`: read one-line-per-cluster files into item labelings.
//! - `ari`: adjusted Rand index from a pair-confusion matrix.
//! - `compare`: the three-score comparison (full, topic-only, POV baseline).
//! - `convert`: group `revisionId topicId povId` records into clusters.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Adjusted Rand index.
pub mod ari;
/// Clustering-file reader and label modes.
pub mod clustering;
/// Truth-vs-estimate comparison.
pub mod compare;
/// Topic/POV records to cluster lines.
pub mod convert;

pub use ari::adjusted_rand_index;
pub use clustering::{read_clustering, LabelMode, Labeling};
pub use compare::{compare_clusterings, AriScores};
pub use convert::{group_by_topic_pov, read_topics_povs, TopicPovRecord};
