use clap::{Args, Subcommand};
use dw_core::{ArticleStatus, Result};
use tracing::warn;

use crate::manager::{FetchManager, FetchOutcome};

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[command(subcommand)]
    pub command: FetchCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FetchCommands {
    /// Fetch articles by URL and store them
    Url {
        /// Article URLs, e.g. https://www.dw.com/zh/.../a-57821645
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Fetch and print one article without storing it
    Show {
        url: String,
    },
}

fn status_emoji(status: ArticleStatus) -> &'static str {
    match status {
        ArticleStatus::New => "🆕",
        ArticleStatus::Updated => "📝",
        ArticleStatus::Unchanged => "⏭️",
    }
}

/// One line per URL: status emoji and title, or the failure.
pub fn describe(outcome: &FetchOutcome) -> String {
    match &outcome.result {
        Ok((record, status)) => format!("{} {} - {}", status_emoji(*status), record.title(), outcome.url),
        Err(e) => format!("❌ {} - {}", outcome.url, e),
    }
}

pub async fn handle_command(args: FetchArgs, manager: &FetchManager) -> Result<()> {
    match args.command {
        FetchCommands::Url { urls } => {
            for url in urls.iter().filter(|u| !manager.scraper().can_handle(u)) {
                warn!("{} is not a {} article URL", url, manager.scraper().site().domain);
            }
            let outcomes = manager.fetch_all(&urls).await?;
            for outcome in &outcomes {
                if outcome.result.is_ok() {
                    println!("{}", describe(outcome));
                } else {
                    eprintln!("{}", describe(outcome));
                }
            }
        }
        FetchCommands::Show { url } => {
            let record = manager.scrape_url(&url).await?;
            println!("{}", record.content());
        }
    }
    Ok(())
}
