use ciq_config::ClusterIqConfig;
use ciq_core::{Intent, Strictness};
use ciq_plan::{IntentWeights, score_raw};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ScoreResponse {
    intent: Intent,
    score: f64,
    priority: String,
}

/// Handle `ciq score`.
pub fn handle(
    args: &ScoreArgs,
    config: &ClusterIqConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let strictness = if args.strict {
        Strictness::Strict
    } else {
        config.scoring.strictness
    };
    let score = score_raw(
        Some(args.volume.as_str()),
        Some(args.difficulty.as_str()),
        args.intent.as_deref(),
        strictness,
        &IntentWeights::from(&config.scoring),
    )?;

    output(
        &ScoreResponse {
            intent: args
                .intent
                .as_deref()
                .map(Intent::parse_lenient)
                .unwrap_or_default(),
            score: score.rounded(),
            priority: score.tier.label().to_string(),
        },
        flags.format,
    )
}
