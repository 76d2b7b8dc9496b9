// crates/povsynth-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use povsynth_core::{
    emit::{write_atomic, write_clusters, write_ground_truth, write_revision_stream},
    pipeline::DEFAULT_SEED,
    Params,
};
use povsynth_eval::{compare_clusterings, group_by_topic_pov, read_topics_povs};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "povsynth",
    about = "Synthetic topic/POV revision histories",
    long_about = "Synthetic topic/POV revision histories.\n\nGenerate wiki-style edit logs with known topic/POV ground truth, and score clusterings against it.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate a revision stream (stdout) plus ground-truth files.
    Generate {
        /// Number of topics (>0)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        topics: u32,

        /// POVs per topic (>0)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        povs_per_topic: u32,

        /// Number of users (>0)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        users: u32,

        /// RNG seed; equal seeds give byte-identical output
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// TOML profile overriding prior constants
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Directory for the ground-truth files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Write the revision stream here instead of stdout
        #[arg(long)]
        revisions: Option<PathBuf>,
    },

    /// Print full, topic-only and randomized-POV adjusted Rand indices.
    Compare {
        /// Truth clustering file
        truth: PathBuf,

        /// Estimated clustering file
        estimate: PathBuf,

        /// Consecutive cluster lines that form one topic (>0)
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        povs_per_cluster: u32,

        /// RNG seed for the randomized-POV baseline
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Convert `revision topic pov` lines into one cluster line per (topic, POV).
    Convert {
        /// Topic/POV assignment file
        input: PathBuf,

        /// Pad to a full grid of this many topics (requires --povs)
        #[arg(long, requires = "povs", value_parser = clap::value_parser!(u32).range(1..))]
        topics: Option<u32>,

        /// Pad to a full grid with this many POVs per topic (requires --topics)
        #[arg(long, requires = "topics", value_parser = clap::value_parser!(u32).range(1..))]
        povs: Option<u32>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Generate {
            topics,
            povs_per_topic,
            users,
            seed,
            profile,
            out_dir,
            revisions,
        } => generate(
            [topics, povs_per_topic, users],
            seed,
            profile.as_deref(),
            &out_dir,
            revisions.as_deref(),
        ),

        Cmd::Compare {
            truth,
            estimate,
            povs_per_cluster,
            seed,
        } => compare(&truth, &estimate, povs_per_cluster, seed),

        Cmd::Convert {
            input,
            topics,
            povs,
        } => convert(&input, topics.zip(povs)),
    }
}

/// Initialize tracing with an env-driven filter (default INFO), on stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", dir.display()))?;
        }
    }
    Ok(())
}

fn generate(
    [topics, povs, users]: [u32; 3],
    seed: u64,
    profile: Option<&Path>,
    out_dir: &Path,
    revisions: Option<&Path>,
) -> Result<()> {
    let priors = config::load_priors(profile)?;
    let params = Params::new(topics as usize, povs as usize, users as usize, priors)
        .context("invalid model parameters")?;

    info!(
        topics,
        povs,
        users,
        pages = params.pages(),
        alpha = params.alpha(),
        seed,
        "generating synthetic revision history"
    );
    let data = povsynth_core::generate(&params, seed)?;

    match revisions {
        Some(path) => {
            ensure_parent_dir(path)?;
            write_atomic(path, |w| write_revision_stream(w, &data.revisions))?;
        }
        None => {
            let mut w = BufWriter::new(io::stdout().lock());
            write_revision_stream(&mut w, &data.revisions)?;
            w.flush().context("flush stdout")?;
        }
    }

    let written = write_ground_truth(out_dir, &data.revisions, &data.truth)
        .with_context(|| format!("writing ground truth to {}", out_dir.display()))?;

    let s = data.revert_stats;
    info!(
        revisions = data.revisions.len(),
        reverts = s.reverts,
        cross_topic = s.cross_topic,
        same_pov = s.same_pov,
        cross_pov = s.cross_pov,
        occupied_cells = data.truth.occupied_cells(),
        "generation complete"
    );
    for path in &written {
        info!(path = %path.display(), "wrote ground truth");
    }
    Ok(())
}

fn compare(truth: &Path, estimate: &Path, povs_per_cluster: u32, seed: u64) -> Result<()> {
    info!(truth = %truth.display(), estimate = %estimate.display(), povs_per_cluster, "comparing clusterings");
    let mut rng = StdRng::seed_from_u64(seed);
    let scores = compare_clusterings(truth, estimate, povs_per_cluster as usize, &mut rng)
        .with_context(|| format!("comparing {} with {}", estimate.display(), truth.display()))?;
    println!("{scores}");
    Ok(())
}

fn convert(input: &Path, grid: Option<(u32, u32)>) -> Result<()> {
    info!(input = %input.display(), ?grid, "converting topic/POV assignments");
    let records = read_topics_povs(input)?;
    let groups = group_by_topic_pov(&records, grid.map(|(t, p)| (t as usize, p as usize)))?;

    let mut w = BufWriter::new(io::stdout().lock());
    write_clusters(&mut w, &groups)?;
    w.flush().context("flush stdout")?;
    Ok(())
}
