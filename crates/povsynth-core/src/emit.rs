//! Flat-text writers for the revision stream and the ground-truth files.
//!
//! Record writers are generic over `Write` so the CLI can point the
//! revision stream at stdout. Ground-truth files are written next to their
//! final path and renamed into place once fully flushed, so an aborted run
//! never leaves a truncated file under the final name.

use anyhow::{Context, Result};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::params::PAGE_NAMESPACE;
use crate::sequence::Revision;
use crate::truth::ClusteringGroundTruth;

/// `revisionId topicId povId` per revision.
pub const TOPICS_POVS_FILE: &str = "synthetic_topics_povs.txt";
/// One line of revision ids per topic×POV cell.
pub const CLUSTERING_FILE: &str = "synthetic_clustering.txt";
/// One line of user ids per favourite topic×POV cell.
pub const USER_CLUSTERING_FILE: &str = "synthetic_user_clustering.txt";

/// Write `pageId namespace userId revisionId parentId revert` records.
pub fn write_revision_stream<W: Write>(w: &mut W, revisions: &[Revision]) -> Result<()> {
    for r in revisions {
        writeln!(
            w,
            "{} {} {} {} {} {}",
            r.page + 1,
            PAGE_NAMESPACE,
            r.user + 1,
            r.id,
            ParentId(r.parent),
            if r.is_revert { 't' } else { 'f' }
        )
        .context("write revision record")?;
    }
    Ok(())
}

/// Parent column: the parent id, or `-1` for the first revision of a page.
struct ParentId(Option<u64>);

impl Display for ParentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("-1"),
        }
    }
}

/// Write `revisionId topicId povId` records.
pub fn write_topics_povs<W: Write>(w: &mut W, revisions: &[Revision]) -> Result<()> {
    for r in revisions {
        writeln!(w, "{} {} {}", r.id, r.topic, r.pov).context("write topic/POV record")?;
    }
    Ok(())
}

/// Write one whitespace-separated line per group (empty groups give blank lines).
pub fn write_clusters<W, T>(w: &mut W, groups: &[Vec<T>]) -> Result<()>
where
    W: Write,
    T: Display,
{
    for group in groups {
        let mut first = true;
        for item in group {
            if !first {
                w.write_all(b" ").context("write cluster separator")?;
            }
            write!(w, "{item}").context("write cluster item")?;
            first = false;
        }
        w.write_all(b"\n").context("write cluster newline")?;
    }
    Ok(())
}

/// Write the three ground-truth files into `dir`; returns their paths.
pub fn write_ground_truth(
    dir: &Path,
    revisions: &[Revision],
    truth: &ClusteringGroundTruth,
) -> Result<[PathBuf; 3]> {
    fs::create_dir_all(dir).with_context(|| format!("creating output directory {}", dir.display()))?;

    let topics_povs = dir.join(TOPICS_POVS_FILE);
    write_atomic(&topics_povs, |w| write_topics_povs(w, revisions))?;

    let clustering = dir.join(CLUSTERING_FILE);
    write_atomic(&clustering, |w| write_clusters(w, &truth.revisions))?;

    // User ids are 1-based on the wire.
    let user_groups: Vec<Vec<usize>> = truth
        .users
        .iter()
        .map(|g| g.iter().map(|u| u + 1).collect())
        .collect();
    let user_clustering = dir.join(USER_CLUSTERING_FILE);
    write_atomic(&user_clustering, |w| write_clusters(w, &user_groups))?;

    Ok([topics_povs, clustering, user_clustering])
}

/// Write `path` through a sibling temp file and rename it into place.
pub fn write_atomic<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let tmp = tmp_path(path);
    let f = File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    let mut w = BufWriter::new(f);
    let written = body(&mut w).and_then(|()| w.flush().context("flush writer"));
    if let Err(e) = written {
        drop(w);
        let _ = fs::remove_file(&tmp);
        return Err(e.context(format!("writing {}", path.display())));
    }
    drop(w);
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rev(id: u64, page: usize, user: usize, parent: Option<u64>, is_revert: bool) -> Revision {
        Revision { id, page, topic: 1, pov: 0, user, parent, is_revert }
    }

    #[test]
    fn revision_stream_format() {
        let revs = vec![rev(1, 0, 4, None, false), rev(2, 0, 0, Some(1), true)];
        let mut out = Vec::new();
        write_revision_stream(&mut out, &revs).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1 1234 5 1 -1 f\n1 1234 1 2 1 t\n"
        );
    }

    #[test]
    fn parent_ids_are_written_verbatim() {
        let revs = vec![rev(u64::MAX, 2, 0, Some(u64::MAX - 1), false)];
        let mut out = Vec::new();
        write_revision_stream(&mut out, &revs).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("3 1234 1 {} {} f\n", u64::MAX, u64::MAX - 1)
        );
    }

    #[test]
    fn clusters_keep_blank_lines() {
        let mut out = Vec::new();
        write_clusters(&mut out, &[vec![1u64, 2], vec![], vec![7]]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1 2\n\n7\n");
    }

    #[test]
    fn ground_truth_files_land_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let revs = vec![rev(1, 0, 0, None, false)];
        let truth = ClusteringGroundTruth { revisions: vec![vec![], vec![1]], users: vec![vec![0], vec![]] };
        let [tp, cl, uc] = write_ground_truth(dir.path(), &revs, &truth).unwrap();
        assert_eq!(fs::read_to_string(tp).unwrap(), "1 1 0\n");
        assert_eq!(fs::read_to_string(cl).unwrap(), "\n1\n");
        assert_eq!(fs::read_to_string(uc).unwrap(), "1\n\n");
        assert!(!dir.path().join("synthetic_clustering.txt.tmp").exists());
    }
}
