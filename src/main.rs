use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tubeline::logging::init().context("init logging")?;

    let cli = tubeline::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        tubeline::cli::Command::Run(args) => {
            tubeline::pipeline::run(args).await.context("run")?;
        }
        tubeline::cli::Command::Extract(args) => {
            tubeline::extract::run(args).await.context("extract")?;
        }
        tubeline::cli::Command::Transform(args) => {
            tubeline::transform::run(args).context("transform")?;
        }
        tubeline::cli::Command::Load(args) => {
            tubeline::load::run(args).context("load")?;
        }
    }

    Ok(())
}
