//! Generated ground truth through the evaluation tools.

use std::collections::BTreeSet;
use std::fs;

use povsynth_core::{emit::write_ground_truth, generate, Params};
use povsynth_eval::{compare_clusterings, group_by_topic_pov, read_topics_povs};
use rand::{rngs::StdRng, SeedableRng};

fn non_empty_groups(groups: &[Vec<u64>]) -> BTreeSet<BTreeSet<u64>> {
    groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| g.iter().copied().collect())
        .collect()
}

fn parse_lines(text: &str) -> Vec<Vec<u64>> {
    text.lines()
        .map(|l| l.split_whitespace().map(|t| t.parse().unwrap()).collect())
        .collect()
}

#[test]
fn converter_reproduces_generated_clustering() {
    let dir = tempfile::tempdir().unwrap();
    let params = Params::with_defaults(3, 2, 150).unwrap();
    let data = generate(&params, 9).unwrap();
    let [topics_povs, clustering, _] =
        write_ground_truth(dir.path(), &data.revisions, &data.truth).unwrap();

    let records = read_topics_povs(&topics_povs).unwrap();
    let converted = group_by_topic_pov(&records, None).unwrap();
    let written = parse_lines(&fs::read_to_string(&clustering).unwrap());
    assert_eq!(non_empty_groups(&converted), non_empty_groups(&written));

    // With the grid the layout matches line for line.
    let padded = group_by_topic_pov(&records, Some((3, 2))).unwrap();
    assert_eq!(padded, written);
}

#[test]
fn identical_files_score_one() {
    let dir = tempfile::tempdir().unwrap();
    let params = Params::with_defaults(2, 2, 80).unwrap();
    let data = generate(&params, 4).unwrap();
    let [_, clustering, _] = write_ground_truth(dir.path(), &data.revisions, &data.truth).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let scores = compare_clusterings(&clustering, &clustering, 1, &mut rng).unwrap();
    assert_eq!(scores.full, 1.0);
    assert_eq!(scores.topics_only, 1.0);
    assert_eq!(scores.randomized_pov, 1.0);

    // Grouping POVs per topic still leaves full and topic-only scores perfect.
    let scores = compare_clusterings(&clustering, &clustering, 2, &mut rng).unwrap();
    assert_eq!(scores.full, 1.0);
    assert_eq!(scores.topics_only, 1.0);
    assert!(scores.randomized_pov <= 1.0);
}

#[test]
fn mismatched_item_sets_fail() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "1 2\n3\n").unwrap();
    fs::write(&b, "1 2\n3 4\n").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(compare_clusterings(&a, &b, 1, &mut rng).is_err());
}
