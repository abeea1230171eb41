use anyhow::Context;
use ciq_config::ClusterIqConfig;
use ciq_core::{PlanSummary, Strictness};
use ciq_plan::{ContentPlan, ContentPlanner, GraphAnalysis, LinkGraph};
use serde::Serialize;

use crate::cli::root_commands::PlanArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::export;
use crate::ingest::{self, Encoding};
use crate::output::{output, render_plan_table};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct PlanResponse {
    input: String,
    report: Option<String>,
    graph: Option<String>,
    encoding: Encoding,
    skipped_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<GraphAnalysis>,
    #[serde(flatten)]
    summary: PlanSummary,
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(args: &PlanArgs, mut config: ClusterIqConfig) -> anyhow::Result<ClusterIqConfig> {
    if let Some(threshold) = args.threshold {
        config.clustering.threshold = threshold;
    }
    if let Some(linkage) = args.linkage {
        config.clustering.linkage = linkage;
    }
    if let Some(metric) = args.metric {
        config.clustering.metric = metric;
    }
    if let Some(backend) = args.backend {
        config.vectors.backend = backend;
    }
    if args.strict {
        config.scoring.strictness = Strictness::Strict;
    }
    if args.no_links {
        config.output.link_planning = false;
    }
    config.validate().context("invalid plan options")?;
    Ok(config)
}

/// Handle `ciq plan`.
pub async fn handle(
    args: &PlanArgs,
    config: ClusterIqConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut config = apply_overrides(args, config)?;
    if flags.quiet {
        config.vectors.show_download_progress = false;
    }
    let delimiter = config.output.delimiter_byte()?;
    let graph_path = args.graph.clone().or_else(|| {
        args.output
            .as_deref()
            .filter(|_| config.output.graph)
            .map(export::graph_path_for)
    });

    let progress = Progress::spinner("reading keywords");
    let ingested = ingest::read_keywords(&args.input, config.scoring.strictness)
        .with_context(|| format!("failed to ingest {}", args.input.display()))?;
    tracing::info!(
        keywords = ingested.records.len(),
        skipped = ingested.skipped,
        "keywords loaded"
    );

    progress.set_message(&format!(
        "clustering {} keywords ({})",
        ingested.records.len(),
        config.vectors.backend
    ));
    let planner = ContentPlanner::from_config(&config);
    let vectors = config.vectors.clone();
    let records = ingested.records;
    let plan: ContentPlan = tokio::task::spawn_blocking(move || -> anyhow::Result<ContentPlan> {
        let mut source = ciq_vectors::from_config(&vectors)?;
        Ok(planner.plan(&records, source.as_mut())?)
    })
    .await
    .context("planning task panicked")?
    .inspect_err(|_| progress.finish_err("planning failed"))?;
    progress.finish_clear();

    let links = match &graph_path {
        Some(path) => {
            let graph = LinkGraph::from_plan(&plan);
            export::write_graph(path, &graph.export())?;
            let analysis = graph.analyze();
            tracing::info!(
                nodes = analysis.node_count,
                edges = analysis.edge_count,
                components = analysis.components,
                has_cycles = analysis.has_cycles,
                "link graph written"
            );
            Some(analysis)
        }
        None => None,
    };

    match &args.output {
        Some(path) => {
            export::write_report(path, &plan.rows, delimiter)?;
            output(
                &PlanResponse {
                    input: args.input.display().to_string(),
                    report: Some(path.display().to_string()),
                    graph: graph_path.as_ref().map(|p| p.display().to_string()),
                    encoding: ingested.encoding,
                    skipped_rows: ingested.skipped,
                    links,
                    summary: plan.summary.clone(),
                },
                flags.format,
            )?;
        }
        None => match flags.format {
            OutputFormat::Json => output(&plan, OutputFormat::Json)?,
            OutputFormat::Table => println!("{}", render_plan_table(&plan.rows)),
            OutputFormat::Raw => export::write_rows(std::io::stdout().lock(), &plan.rows, delimiter)?,
        },
    }

    if args.outline {
        print!("{}", plan.outline());
    }
    Ok(())
}
