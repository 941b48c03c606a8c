use std::path::PathBuf;

use crate::cli::{ExtractArgs, LoadArgs, RunArgs, TransformArgs};
use crate::error::Error;

/// Run extract -> transform -> load over one workspace directory, each
/// stage starting only after its predecessor succeeded. The stage errors
/// propagate unmodified, so an external scheduler invoking this binary sees
/// the failing stage's message.
pub async fn run(args: RunArgs) -> Result<(), Error> {
    let workspace_dir = PathBuf::from(&args.out);

    let raw_path = workspace_dir.join("raw_data").join("videos.csv");
    let transformed_path = workspace_dir
        .join("transformed_data")
        .join("videos_transformed.csv");
    let dataset_dir = workspace_dir.join("dataset");

    tracing::info!(channel_id = %args.channel_id, out = %workspace_dir.display(), "run: extract");
    crate::extract::run(ExtractArgs {
        channel_id: args.channel_id.clone(),
        out: raw_path.to_string_lossy().to_string(),
        api_base_url: args.api_base_url.clone(),
    })
    .await?;

    tracing::info!("run: transform");
    crate::transform::run(TransformArgs {
        input: raw_path.to_string_lossy().to_string(),
        out: transformed_path.to_string_lossy().to_string(),
    })?;

    tracing::info!("run: load");
    crate::load::run(LoadArgs {
        input: transformed_path.to_string_lossy().to_string(),
        out_dir: dataset_dir.to_string_lossy().to_string(),
        channel_name: args.channel_name.clone(),
    })?;

    Ok(())
}
