use std::path::PathBuf;

use ciq_config::VectorBackend;
use ciq_core::{DistanceMetric, Linkage};
use clap::{Args, Subcommand, ValueEnum};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Cluster a keyword CSV into a pillar/cluster content plan.
    Plan(PlanArgs),
    /// Score a single keyword.
    Score(ScoreArgs),
    /// Print the URL slug for a piece of text.
    Slug(SlugArgs),
    /// Show the effective configuration.
    Config,
    /// Print the JSON Schema of a report type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// Keyword CSV with a `Keyword` (or `Primary Keyword`) column.
    pub input: PathBuf,

    /// Write the report CSV here instead of printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the internal-link graph as JSON.
    #[arg(long)]
    pub graph: Option<PathBuf>,

    /// Print the cluster outline after the report.
    #[arg(long)]
    pub outline: bool,

    /// Linkage distance cut-off; merges at or above it are not applied.
    #[arg(long)]
    pub threshold: Option<f64>,

    /// ward, complete, average, single
    #[arg(long)]
    pub linkage: Option<Linkage>,

    /// euclidean, cosine
    #[arg(long)]
    pub metric: Option<DistanceMetric>,

    /// embedding, ngram
    #[arg(long)]
    pub backend: Option<VectorBackend>,

    /// Fail on malformed Volume / Keyword Difficulty cells.
    #[arg(long)]
    pub strict: bool,

    /// Leave the URL, link target, and anchor columns empty.
    #[arg(long)]
    pub no_links: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    #[arg(long, allow_hyphen_values = true)]
    pub volume: String,

    #[arg(long, allow_hyphen_values = true)]
    pub difficulty: String,

    /// transactional, commercial, informational, navigational
    #[arg(long)]
    pub intent: Option<String>,

    /// Fail on malformed numbers instead of treating them as 0.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SlugArgs {
    pub text: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaKind {
    /// One report row.
    Row,
    /// Link graph export.
    Graph,
    /// Plan summary counts.
    Summary,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub kind: SchemaKind,
}
