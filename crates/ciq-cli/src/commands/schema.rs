use ciq_core::{PlanRow, PlanSummary};
use ciq_plan::GraphExport;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaKind};

/// Handle `ciq schema`. Always prints JSON regardless of `--format`.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.kind {
        SchemaKind::Row => schemars::schema_for!(PlanRow),
        SchemaKind::Graph => schemars::schema_for!(GraphExport),
        SchemaKind::Summary => schemars::schema_for!(PlanSummary),
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
