//! Clustering files: one line per cluster, whitespace-separated item ids.
//!
//! The line index is the cluster id. When clusters are grouped `P` POVs per
//! topic, `line / P` is the topic id, which is what [`LabelMode::TopicsOnly`]
//! and [`LabelMode::RandomizePov`] reinterpret.

use anyhow::{bail, ensure, Context, Result};
use rand::Rng;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Item id as it appears in a clustering file.
pub type ItemId = u64;

/// How a line index becomes a label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMode {
    /// Label = line index.
    Full,
    /// Label = line index / POVs per cluster.
    TopicsOnly,
    /// Keep the topic block, pick a uniform POV slot inside it.
    RandomizePov,
}

/// Item → label assignment, ordered by item id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Labeling {
    labels: BTreeMap<ItemId, usize>,
}

impl Labeling {
    /// Number of labelled items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no item is labelled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in ascending item-id order.
    #[must_use]
    pub fn labels(&self) -> Vec<usize> {
        self.labels.values().copied().collect()
    }

    /// Item ids in ascending order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.labels.keys().copied()
    }
}

/// Parse a clustering from any buffered reader.
///
/// `povs_per_cluster` must be positive; it only matters for the grouped
/// modes. Non-integer tokens and items listed twice are rejected.
pub fn parse_clustering<B, R>(
    input: B,
    mode: LabelMode,
    povs_per_cluster: usize,
    rng: &mut R,
) -> Result<Labeling>
where
    B: BufRead,
    R: Rng + ?Sized,
{
    ensure!(povs_per_cluster > 0, "POVs per cluster must be positive");

    let mut labels = BTreeMap::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("read clustering line {}", line_no + 1))?;
        for tok in line.split_whitespace() {
            let item: ItemId = tok.parse().with_context(|| {
                format!("clustering line {}: bad item id {tok:?}", line_no + 1)
            })?;
            let label = match mode {
                LabelMode::Full => line_no,
                LabelMode::TopicsOnly => line_no / povs_per_cluster,
                LabelMode::RandomizePov => {
                    line_no - line_no % povs_per_cluster + rng.random_range(0..povs_per_cluster)
                }
            };
            if labels.insert(item, label).is_some() {
                bail!("clustering line {}: item {item} listed twice", line_no + 1);
            }
        }
    }
    Ok(Labeling { labels })
}

/// Read a clustering file.
pub fn read_clustering<P, R>(
    path: P,
    mode: LabelMode,
    povs_per_cluster: usize,
    rng: &mut R,
) -> Result<Labeling>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_clustering(BufReader::new(f), mode, povs_per_cluster, rng)
        .with_context(|| format!("parse clustering {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const SAMPLE: &str = "1 2\n3\n\n4 5 6\n";

    fn parse(mode: LabelMode, p: usize) -> Result<Labeling> {
        let mut rng = StdRng::seed_from_u64(0);
        parse_clustering(SAMPLE.as_bytes(), mode, p, &mut rng)
    }

    #[test]
    fn full_labels_are_line_numbers() {
        let l = parse(LabelMode::Full, 2).unwrap();
        assert_eq!(l.labels(), vec![0, 0, 1, 3, 3, 3]);
        assert_eq!(l.items().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn topics_only_groups_lines() {
        let l = parse(LabelMode::TopicsOnly, 2).unwrap();
        assert_eq!(l.labels(), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn randomized_pov_stays_in_topic_block() {
        let l = parse(LabelMode::RandomizePov, 2).unwrap();
        let labels = l.labels();
        assert!(labels[..3].iter().all(|x| *x < 2));
        assert!(labels[3..].iter().all(|x| (2..4).contains(x)));
    }

    #[test]
    fn rejects_garbage_and_duplicates() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = parse_clustering("1 x\n".as_bytes(), LabelMode::Full, 1, &mut rng).unwrap_err();
        assert!(format!("{err:#}").contains("bad item id"));
        assert!(parse_clustering("1 2\n2\n".as_bytes(), LabelMode::Full, 1, &mut rng).is_err());
        assert!(parse_clustering("1\n".as_bytes(), LabelMode::Full, 0, &mut rng).is_err());
    }
}
