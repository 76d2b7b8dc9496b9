//! `revisionId topicId povId` records → one cluster line per (topic, POV).

use anyhow::{bail, ensure, Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::clustering::ItemId;

/// One line of a topic/POV assignment file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopicPovRecord {
    /// Revision id.
    pub revision: ItemId,
    /// Topic index.
    pub topic: usize,
    /// POV index within the topic.
    pub pov: usize,
}

/// Parse `revisionId topicId povId` lines; blank lines are skipped.
pub fn parse_topics_povs<B: BufRead>(input: B) -> Result<Vec<TopicPovRecord>> {
    let mut out = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", line_no + 1))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [] => continue,
            [rev, topic, pov] => {
                let ctx = || format!("line {}: expected integers, got {line:?}", line_no + 1);
                out.push(TopicPovRecord {
                    revision: rev.parse().with_context(ctx)?,
                    topic: topic.parse().with_context(ctx)?,
                    pov: pov.parse().with_context(ctx)?,
                });
            }
            other => bail!(
                "line {}: expected 3 fields (revision topic pov), got {}",
                line_no + 1,
                other.len()
            ),
        }
    }
    Ok(out)
}

/// Read a topic/POV assignment file.
pub fn read_topics_povs<P: AsRef<Path>>(path: P) -> Result<Vec<TopicPovRecord>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_topics_povs(BufReader::new(f)).with_context(|| format!("parse {}", path.display()))
}

/// Group revision ids by `(topic, pov)`, keeping input order inside a group.
///
/// Without a grid only observed pairs appear, in ascending key order. With
/// `grid = Some((topics, povs))` the result has one entry per cell
/// (`topic × povs + pov`), empty cells included, matching the generator's
/// clustering layout.
pub fn group_by_topic_pov(
    records: &[TopicPovRecord],
    grid: Option<(usize, usize)>,
) -> Result<Vec<Vec<ItemId>>> {
    if let Some((topics, povs)) = grid {
        ensure!(topics > 0 && povs > 0, "grid dimensions must be positive");
        let mut cells = vec![Vec::new(); topics * povs];
        for r in records {
            ensure!(
                r.topic < topics && r.pov < povs,
                "revision {} has (topic {}, pov {}) outside a {topics}×{povs} grid",
                r.revision,
                r.topic,
                r.pov
            );
            cells[r.topic * povs + r.pov].push(r.revision);
        }
        return Ok(cells);
    }

    let mut groups: BTreeMap<(usize, usize), Vec<ItemId>> = BTreeMap::new();
    for r in records {
        groups.entry((r.topic, r.pov)).or_default().push(r.revision);
    }
    Ok(groups.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1 1 0\n2 0 1\n3 1 0\n\n4 0 1\n";

    #[test]
    fn groups_in_key_order() {
        let recs = parse_topics_povs(SAMPLE.as_bytes()).unwrap();
        assert_eq!(recs.len(), 4);
        let g = group_by_topic_pov(&recs, None).unwrap();
        assert_eq!(g, vec![vec![2, 4], vec![1, 3]]);
    }

    #[test]
    fn grid_pads_empty_cells() {
        let recs = parse_topics_povs(SAMPLE.as_bytes()).unwrap();
        let g = group_by_topic_pov(&recs, Some((2, 2))).unwrap();
        assert_eq!(g, vec![vec![], vec![2, 4], vec![1, 3], vec![]]);
        assert!(group_by_topic_pov(&recs, Some((1, 2))).is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_topics_povs("1 2\n".as_bytes()).is_err());
        let err = parse_topics_povs("1 a 0\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("expected integers"));
    }
}
