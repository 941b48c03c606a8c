use clap::{Args, Parser, Subcommand};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Run(RunArgs),
    Extract(ExtractArgs),
    Transform(TransformArgs),
    Load(LoadArgs),
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Channel identifier (`UC…`) whose uploads are collected.
    #[arg(long)]
    pub channel_id: String,

    /// Output file path for the raw video records CSV.
    #[arg(long)]
    pub out: String,

    /// Base URL of the video platform API.
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,
}

#[derive(Debug, Args)]
pub struct TransformArgs {
    /// Input path to the raw video records CSV (created by `extract`).
    #[arg(long)]
    pub input: String,

    /// Output file path for the cleaned CSV.
    #[arg(long)]
    pub out: String,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Input path to the cleaned CSV (created by `transform`).
    #[arg(long)]
    pub input: String,

    /// Destination folder. Replaced in full on every run.
    #[arg(long)]
    pub out_dir: String,

    /// Channel name used in the published file name.
    #[arg(long)]
    pub channel_name: String,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Channel identifier (`UC…`) whose uploads are collected.
    #[arg(long)]
    pub channel_id: String,

    /// Channel name used in the published file name.
    #[arg(long)]
    pub channel_name: String,

    /// Workspace directory (raw_data/transformed_data/dataset).
    #[arg(long)]
    pub out: String,

    /// Base URL of the video platform API.
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,
}
