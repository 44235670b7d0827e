//! ReadMore command-line client
//!
//! Search, rate, shelve and get recommendations from the terminal. State
//! lives in the configured data directory and carries over between runs.

mod listing;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use readmore_core::client::{ApiClient, ApiError};
use readmore_core::config::ReadMoreConfig;
use readmore_core::domain::{BookSummary, WorkId};
use readmore_core::engine::Engine;
use readmore_core::state::{CardStatus, RatingControl};
use readmore_core::store::StateStore;
use readmore_core::views::{
    DetailPanel, RecommendationContent, RecommendationPanel, SearchContent, SearchPanel,
    ShelfView,
};
use readmore_core::{ReadMoreError, Result};

use listing::ListingCache;

#[derive(Parser)]
#[command(name = "readmore", version, about = "Discover books that match your taste")]
struct Cli {
    /// Config file (defaults to <config dir>/readmore/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the catalogue
    Search {
        #[arg(required = true)]
        query: Vec<String>,
        /// Number of results (1-50)
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Like a book, or cancel an existing like
    Like { work_id: String },
    /// Dislike a book, or cancel an existing dislike
    Dislike { work_id: String },
    /// Put a book on your shelf
    Save { work_id: String },
    /// Take a book off your shelf
    Remove { work_id: String },
    /// List the books on your shelf
    Shelf,
    /// Show how you rated a book
    Status { work_id: String },
    /// Show your taste profile
    Profile {
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Get recommendations from your profile
    Recommend {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show everything known about a book
    Detail { work_id: String },
    /// Print the effective configuration
    Config,
}

struct Context {
    config: ReadMoreConfig,
    engine: Engine<Box<dyn StateStore>>,
    listing: ListingCache,
}

impl Context {
    fn open(cli: &Cli) -> Result<Self> {
        let mut config = ReadMoreConfig::load(cli.config.as_deref())?;
        if let Some(api) = &cli.api {
            config.api.base_url = api.clone();
            config.validate()?;
        }
        let data_dir = config.storage.resolved_data_dir();
        tracing::debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            engine: Engine::new(config.storage.open_store()),
            listing: ListingCache::new(&data_dir),
            config,
        })
    }

    fn client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(&self.config.api)?)
    }

    /// Find the summary for `raw`: last listing, then shelf, then the
    /// work-detail backend.
    async fn resolve(&self, raw: &str) -> Result<BookSummary> {
        let id = WorkId::try_from(raw.to_string())?;
        if let Some(book) = self.listing.find(&id) {
            return Ok(book);
        }
        if let Some(saved) = self.engine.state().saved_book(&id) {
            return Ok(saved.to_summary());
        }

        match self.client()?.work_detail(id.as_str()).await {
            Ok(detail) => Ok(detail.into_summary(id.as_str())),
            Err(e) => {
                tracing::warn!("Could not look up {}: {}", id, e);
                Err(ReadMoreError::UnknownBook(id.to_string()))
            }
        }
    }

    fn remember(&self, books: &[BookSummary]) {
        if let Err(e) = self.listing.store(books) {
            tracing::warn!("Could not record listing: {}", e);
        }
    }
}

/// Click the like or dislike control of a book
async fn rate(ctx: &mut Context, work_id: &str, control: RatingControl) -> Result<()> {
    let book = ctx.resolve(work_id).await?;
    let state = ctx.engine.toggle(book.clone(), control)?;
    if let Some(id) = book.work_id() {
        output::print_card_status(id.as_str(), &CardStatus::derive(&state, &id));
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::open(&cli)?;

    match cli.command {
        Command::Search { query, limit } => {
            if let Some(limit) = limit {
                ctx.config.override_search_limit(limit)?;
            }
            let query = query.join(" ");
            let mut panel = SearchPanel::new();
            let ticket = panel.begin(&query).ok_or(ApiError::EmptyQuery)?;
            let outcome = ctx.client()?.search(&query).await;
            panel.complete(ticket, outcome);

            match &panel.content {
                SearchContent::Results(books) => {
                    ctx.remember(books);
                    output::print_cards(books, &ctx.engine.state());
                }
                SearchContent::Empty(message) => println!("{}", message),
                SearchContent::Failed(message) => eprintln!("{}", message),
                SearchContent::Idle | SearchContent::Searching => {}
            }
        }
        Command::Like { work_id } => rate(&mut ctx, &work_id, RatingControl::Like).await?,
        Command::Dislike { work_id } => rate(&mut ctx, &work_id, RatingControl::Dislike).await?,
        Command::Save { work_id } => {
            let book = ctx.resolve(&work_id).await?;
            let id = WorkId::try_from(work_id)?;
            if ctx.engine.state().is_saved(&id) {
                println!("{} is already on your shelf.", book.display_title());
            } else {
                ctx.engine.save(book.clone())?;
                println!("Saved {}.", book.display_title());
            }
        }
        Command::Remove { work_id } => {
            let state = ctx.engine.remove_from_shelf(&work_id)?;
            output::print_shelf(&ShelfView::derive(&state), &state);
        }
        Command::Shelf => {
            let state = ctx.engine.state();
            output::print_shelf(&ShelfView::derive(&state), &state);
        }
        Command::Status { work_id } => {
            let id = WorkId::try_from(work_id)?;
            let card = CardStatus::derive(&ctx.engine.state(), &id);
            output::print_card_status(id.as_str(), &card);
        }
        Command::Profile { top } => {
            output::print_profile(&ctx.engine.state().profile, top);
        }
        Command::Recommend { page } => {
            let state = ctx.engine.state();
            let mut panel = RecommendationPanel::new(ctx.config.view.recommend_page_size);
            if let Some((ticket, _)) = panel.begin(&state) {
                let outcome = ctx.client()?.recommend(&state).await;
                panel.complete(ticket, outcome);
            }
            if let Some(pager) = panel.pager_mut() {
                pager.set_page(page);
            }

            match &panel.content {
                RecommendationContent::Loaded(pager) if pager.is_empty() => {
                    println!("No recommendations yet.");
                }
                RecommendationContent::Loaded(pager) => {
                    let page = pager.current();
                    let books: Vec<BookSummary> =
                        page.items.iter().map(|rec| rec.book.clone()).collect();
                    ctx.remember(&books);
                    output::print_recommendations(&page, &state);
                }
                RecommendationContent::Message(message) => println!("{}", message),
                RecommendationContent::Failed(message) => eprintln!("{}", message),
                RecommendationContent::Idle | RecommendationContent::Loading => {}
            }
        }
        Command::Detail { work_id } => {
            let book = ctx.resolve(&work_id).await?;
            let mut panel = DetailPanel::new();
            if let Some(ticket) = panel.open(&book) {
                let outcome = ctx.client()?.work_detail(&book.work_id).await;
                panel.complete(ticket, outcome);
            }
            if let (Some(view), Some(id)) = (&panel.view, book.work_id()) {
                output::print_detail(view, &CardStatus::derive(&ctx.engine.state(), &id));
            }
        }
        Command::Config => {
            print!("{}", ctx.config.to_toml()?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
