use anyhow::Result;
use ckanscraper::{
    config::{SourceSpec, TransformOptions},
    fetch::{catalogue, resource},
    output,
    transform::transform,
};
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Fetch a catalogue-published statistical table and rewrite it with a
/// single composite header plus a key-domain info record.
#[derive(Debug, Parser)]
#[command(name = "ckanscraper", version, about)]
struct Args {
    /// Path to the source spec JSON
    #[arg(long, default_value = "data/source.json")]
    source: PathBuf,

    /// Directory for the rewritten file and its info record
    #[arg(long, default_value = "src/data")]
    out: PathBuf,

    /// Disable output of status messages
    #[arg(short, long)]
    quiet: bool,

    /// Skip the delimited-text check on the downloaded body
    #[arg(short = 'u', long = "unsafe")]
    unsafe_download: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if args.quiet { "error" } else { "info" };
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) load + validate the source spec ──────────────────────────
    let spec = SourceSpec::load(&args.source)?;
    let options = TransformOptions {
        skip_validation: args.unsafe_download,
    };

    // ─── 3) resolve the catalogue entry to a CSV resource ────────────
    let client = Client::new();
    let dataset = catalogue::fetch_dataset_info(&client, &spec.url).await?;
    info!(title = %dataset.title, "downloading");

    // ─── 4) download + decode + parse the body ───────────────────────
    let body = resource::download_body(&client, &dataset.data_url).await?;
    let rows = resource::parse_rows(&body, &options)?;

    // ─── 5) one-pass transform ───────────────────────────────────────
    let result = transform(&rows, &spec)?;

    // ─── 6) persist data file + info record ──────────────────────────
    let data_path = output::write_data_file(&args.out, &result)?;
    let record = output::InfoRecord::new(&dataset, &spec, &result);
    output::write_info_record(&args.out, &record)?;

    info!(file = %data_path.display(), "download successful");
    Ok(())
}
