use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use gfinder::api::create_router;
use gfinder::config::CONFIG;
use gfinder::data_models::{DateRange, FileCategory, FileTypeFilter, SITE_SHORTCUTS, SearchOutcome};
use gfinder::search_client::CseClient;
use gfinder::session::SearchSession;

#[derive(Parser)]
#[command(name = "gfinder", about = "Build advanced Google queries and run them through Custom Search")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the generated query
    Preview(FormArgs),
    /// Run the query against the Custom Search API
    Search(FormArgs),
    /// Copy the generated query to the clipboard
    Copy(FormArgs),
    /// Open the generated query on google.com
    Open(FormArgs),
    /// Serve the JSON API
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
    /// List file-type and site shortcuts
    FileTypes,
}

#[derive(Args)]
struct FormArgs {
    /// Free-text search terms
    #[arg(short, long, default_value = "")]
    text: String,
    #[arg(short = 'f', long, value_enum, conflicts_with_all = ["extensions", "directory_listing"])]
    file_type: Option<FileCategory>,
    /// Custom extension alternation, e.g. "pdf|epub"
    #[arg(long, conflicts_with = "directory_listing")]
    extensions: Option<String>,
    /// Only look for open directory listings
    #[arg(long)]
    directory_listing: bool,
    #[arg(short, long, default_value = "")]
    phrase: String,
    /// Comma separated words to exclude
    #[arg(short, long, default_value = "")]
    exclude: String,
    /// Site to restrict to; repeat to toggle several
    #[arg(short, long = "site")]
    sites: Vec<String>,
    #[arg(long, default_value = "")]
    custom_site: String,
    #[arg(short, long, value_enum)]
    date_range: Option<DateRange>,
}

impl FormArgs {
    fn into_session(self, client: Arc<CseClient>) -> SearchSession {
        let mut session = SearchSession::new(client);
        session.set_free_text(self.text);
        if let Some(category) = self.file_type {
            session.select_file_type(category);
        } else if let Some(exts) = self.extensions {
            session.set_file_type(Some(FileTypeFilter::Extensions(exts)));
        } else if self.directory_listing {
            session.set_file_type(Some(FileTypeFilter::DirectoryListing));
        }
        session.set_exact_phrase(self.phrase);
        session.set_exclude_terms(self.exclude);
        for site in &self.sites {
            session.toggle_site(site);
        }
        session.set_custom_site(self.custom_site);
        session.set_date_range(self.date_range);
        session
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber (handles both tracing and log crate)
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let client = Arc::new(CseClient::from_config(&CONFIG));

    match cli.command {
        Command::Preview(form) => {
            println!("{}", form.into_session(client).preview());
        }
        Command::Search(form) => {
            let session = form.into_session(client);
            let query = session.preview();
            println!("{query}\n");
            match session.search().await {
                Some(outcome) => print_outcome(&outcome),
                None => println!("Enter a search query to see results."),
            }
        }
        Command::Copy(form) => {
            let session = form.into_session(client);
            if !session.copy_query() {
                // clipboard failures are only logged; still hand the query over
                println!("{}", session.preview());
            }
        }
        Command::Open(form) => {
            form.into_session(client).open_in_browser();
        }
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| CONFIG.bind_addr.clone());
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!("listening on {addr}");
            axum::serve(listener, create_router(client))
                .await
                .context("server error")?;
        }
        Command::FileTypes => {
            for category in FileCategory::ALL {
                println!(
                    "{:<10} {:<24} {}",
                    category.id(),
                    category.label(),
                    category.extensions().unwrap_or("-")
                );
            }
            println!();
            for site in SITE_SHORTCUTS {
                println!("{:<10} {}", site.value, site.label);
            }
        }
    }
    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Success(results) => {
            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   {}", result.link);
                println!("   {}", result.display_link);
                if !result.snippet.is_empty() {
                    println!("   {}", result.snippet.replace('\n', " "));
                }
                println!();
            }
        }
        SearchOutcome::Empty => println!("No results found for your search query"),
        SearchOutcome::Failure(message) => eprintln!("{message}"),
        SearchOutcome::Idle | SearchOutcome::Loading => {}
    }
}
