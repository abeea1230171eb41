use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SlugArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SlugResponse<'a> {
    text: &'a str,
    slug: String,
}

/// Handle `ciq slug`.
pub fn handle(args: &SlugArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &SlugResponse {
            text: &args.text,
            slug: ciq_plan::slugify(&args.text),
        },
        flags.format,
    )
}
