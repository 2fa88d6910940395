use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use clap::Parser;
use storybox::raster::cpu::CpuBackend;
use storybox::{StoryBuilder, StoryConfig};

#[derive(Parser, Debug)]
#[command(name = "storybox", version, about = "Build one random story background")]
struct Cli {
    /// TrueType/OpenType font for rendered quote cards; pick a bold face,
    /// the card style expects one.
    #[arg(long)]
    font: PathBuf,

    /// Where to write the story background image.
    #[arg(long, default_value = "story.jpg")]
    out: PathBuf,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run(Cli::parse()).await {
        tracing::error!(%err, "story build failed");
        // generic notice; details stay in the log
        eprintln!("Unable to open the story editor right now. Please try again.");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let font = fs::read(&cli.font)
        .with_context(|| format!("reading font {}", cli.font.display()))?;
    let backend = CpuBackend::from_font_bytes(font)?;
    let mut builder = StoryBuilder::new(StoryConfig::default(), Box::new(backend))?;

    // one build per run; never start a second while one is outstanding
    let payload = builder.build().await?;

    let image = data_url_bytes(&payload.url)?;
    fs::write(&cli.out, image)
        .with_context(|| format!("writing {}", cli.out.display()))?;
    println!("story background written to {}", cli.out.display());
    Ok(())
}

fn data_url_bytes(url: &str) -> Result<Vec<u8>> {
    let (_, encoded) = url
        .split_once(";base64,")
        .context("payload URL is not a base64 data URL")?;
    BASE64
        .decode(encoded)
        .context("payload data URL holds invalid base64")
}
