use clap::Parser;
use dw_core::{ArticleRecord, Config, HumanDuration, Result};
use dw_fetcher::cli::{handle_command, FetchArgs};
use dw_fetcher::logging::init_logging;
use dw_fetcher::{DwScraper, FetchManager};
use dw_web::AppState;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch DW articles into a local collection", long_about = None)]
pub struct Cli {
    /// JSON config file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Page fetch timeout (e.g. 30s, 1m), overrides the config value
    #[arg(long)]
    timeout: Option<HumanDuration>,
    /// Storage backend: json or memory
    #[arg(long, default_value = "json")]
    storage: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    Fetch(FetchArgs),
    /// List stored articles, newest first
    List,
    /// Print one stored article
    Get { id: String },
    /// Search stored articles by keyword
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Listen address, overrides the config value
        #[arg(long)]
        addr: Option<String>,
    },
}

fn print_summary(records: &[ArticleRecord]) {
    for record in records {
        println!("{}  {}  {}", record.publication_date(), record.id(), record.title());
    }
    info!("📚 {} articles", records.len());
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let storage = dw_storage::create_storage(&cli.storage, &config)?;
    debug!(backend = %cli.storage, "💾 storage ready");

    let mut scraper = DwScraper::with_http(&config.site);
    if let Some(HumanDuration(timeout)) = cli.timeout {
        scraper = scraper.with_timeout(timeout);
    }
    let manager = FetchManager::new(storage.clone(), scraper);

    match cli.command {
        Commands::Fetch(args) => handle_command(args, &manager).await?,
        Commands::List => print_summary(&storage.list().await?),
        Commands::Get { id } => println!("{}", storage.get(&id).await?.content()),
        Commands::Search { keywords } => print_summary(&storage.search(&keywords).await?),
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.site.addr.clone());
            dw_web::serve(&addr, AppState::new(manager)).await?;
        }
    }

    Ok(())
}
