use anyhow::Result;
use clap::Parser;
use status_card::delivery::{self, FileSink};
use status_card::pipeline::RenderPipeline;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "status-card", version, about = "Render a host status dashboard card")]
struct Cli {
    /// Where the file-sink delivery collaborator persists the card.
    #[arg(short, long, env = "STATUS_CARD_OUTPUT", default_value = "status-card.png")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    delivery::sweep_orphans(&delivery::staging_dir(), delivery::ORPHAN_MAX_AGE);

    let pipeline = RenderPipeline::new();
    let sink = FileSink::new(cli.output);
    let request_id = format!("cli-{}", std::process::id());
    pipeline.handle_request(&request_id, &sink).await?;

    Ok(())
}
