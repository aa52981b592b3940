use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::runtime::Handle;

use catfetch::catalog::{CatalogService, CatalogState, LoadStatus};
use catfetch::config::Config;
use catfetch::logging::init_tracing;
use catfetch::stats::BreedStatistics;

#[derive(Parser, Debug)]
#[command(
    name = "catfetch",
    version,
    about = "List cat images and breeds from TheCatAPI"
)]
struct Cli {
    /// Config file (default: ~/.config/catfetch/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Breed page to show
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Only show breeds whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    filter: Option<String>,

    /// Override api.base_url from the config file
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Override fetch.timeout_ms from the config file
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.fetch.timeout_ms = Some(timeout_ms);
    }
    config.validate()?;

    let service = CatalogService::from_config(&config, Handle::current())?;

    let Some(initial) = service.set_connected(true) else {
        anyhow::bail!("Catalog was already connected");
    };
    // A later page supersedes page 0; its late response is dropped by the store.
    let breeds = if cli.page == 0 {
        initial.breeds
    } else {
        service.fetch_breeds(cli.page)
    };
    let images_status = initial.images.wait().await;
    let breeds_status = breeds.wait().await;

    if let Some(filter) = cli.filter {
        service.filter(filter);
    }
    let state = service.settled().await;

    print_state(&state, &service.statistics());

    check(images_status).context("Failed to load images")?;
    check(breeds_status).context("Failed to load breeds")?;
    Ok(())
}

fn check(status: LoadStatus) -> anyhow::Result<()> {
    match status {
        LoadStatus::Delivered | LoadStatus::Superseded => Ok(()),
        LoadStatus::Failed(err) => Err(err.into()),
    }
}

fn print_state(state: &CatalogState, statistics: &BreedStatistics) {
    println!(
        "Status: {}",
        if state.connected { "connected" } else { "offline" }
    );
    println!("Images ({}):", state.images.len());
    for image in &state.images {
        println!("  {}  {}", image.id, image.url);
    }

    println!(
        "Breeds page {} ({} visible of {}):",
        state.page,
        state.filtered_breeds.len(),
        state.breeds.len()
    );
    for breed in state.visible_breeds() {
        match breed.image_url() {
            Some(url) => println!("  {}  {}  {}", breed.id, breed.name, url),
            None => println!("  {}  {}", breed.id, breed.name),
        }
    }

    let letters: Vec<String> = statistics
        .top_characters
        .iter()
        .map(|(ch, count)| format!("{}={}", ch, count))
        .collect();
    println!(
        "Statistics: {} visible, top letters: {}",
        statistics.visible_count,
        if letters.is_empty() {
            "-".to_string()
        } else {
            letters.join(", ")
        }
    );
}
