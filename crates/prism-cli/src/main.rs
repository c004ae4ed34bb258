mod probe;
mod view;

use clap::{Parser, Subcommand};
use prism_client::{ProxyClient, SearchController, SearchState};
use prism_core::{sample_products, SortOrder};
use prism_serp::SerpClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "Shopping search from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search through a running proxy and print product cards.
    Search {
        /// Free-text query; multiple words are joined with spaces.
        #[arg(required = true)]
        query: Vec<String>,
        #[arg(long, env = "PRISM_PROXY_URL", default_value = "http://127.0.0.1:3000")]
        proxy_url: String,
        /// price-asc, price-desc, rating, reviews or delivery.
        #[arg(long)]
        sort: Option<SortOrder>,
        /// Print normalized products as JSON instead of cards.
        #[arg(long)]
        json: bool,
        #[arg(long, default_value_t = 15)]
        timeout_secs: u64,
    },
    /// Call the provider directly to check the credential and connectivity.
    Probe {
        #[arg(default_value = "iphone 15 pro")]
        query: String,
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Print the sample deals shown before any search.
    Deals {
        #[arg(long)]
        sort: Option<SortOrder>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            query,
            proxy_url,
            sort,
            json,
            timeout_secs,
        } => run_search(&query.join(" "), &proxy_url, sort, json, timeout_secs).await,
        Commands::Probe { query, limit } => run_probe(&query, limit).await,
        Commands::Deals { sort } => {
            let mut products = sample_products();
            if let Some(order) = sort {
                order.sort(&mut products);
            }
            print!("{}", view::render_cards(&products));
            Ok(())
        }
    }
}

async fn run_search(
    query: &str,
    proxy_url: &str,
    sort: Option<SortOrder>,
    json: bool,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let client = ProxyClient::new(proxy_url, timeout_secs, "prism-cli/0.1")?;
    let controller = SearchController::new(client);
    tracing::debug!(%proxy_url, %query, "submitting search");

    match controller.search(query).await {
        SearchState::Idle => {
            eprintln!("Nothing to search for.");
            Ok(())
        }
        SearchState::Searching { .. } => anyhow::bail!("search did not settle"),
        SearchState::Results {
            query,
            mut products,
        } => {
            if let Some(order) = sort {
                order.sort(&mut products);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                println!("{} results for \"{query}\"\n", products.len());
                print!("{}", view::render_cards(&products));
            }
            Ok(())
        }
        SearchState::Empty { query } => {
            if json {
                println!("[]");
            } else {
                println!("No results for \"{query}\". Try a different search.");
            }
            Ok(())
        }
        SearchState::Errored { message, .. } => anyhow::bail!(message),
    }
}

async fn run_probe(query: &str, limit: u32) -> anyhow::Result<()> {
    let config = prism_core::load_app_config()?;
    if config.upstream_mode == prism_core::UpstreamMode::Mock {
        tracing::warn!("probe always calls the live provider; PRISM_UPSTREAM_MODE=mock is ignored here");
    }
    let Some(api_key) = config.serpapi_api_key.as_deref() else {
        anyhow::bail!("SERPAPI_API_KEY must be set to probe the provider");
    };
    let client = SerpClient::with_base_url(
        api_key,
        config.upstream_timeout_secs,
        &config.user_agent,
        &config.upstream_base_url,
    )?;

    println!("Testing shopping search provider...");
    match client.search_value(query, limit).await {
        Ok(payload) => {
            println!("{}", probe::summarize(&payload));
            Ok(())
        }
        Err(e) => {
            if let Some(summary) = probe::summarize_error(&e) {
                println!("{}", client.redact(&summary.to_string()));
            }
            anyhow::bail!(client.redact(&e.describe()))
        }
    }
}
