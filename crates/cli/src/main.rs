use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use docsearch_index::{Category, IndexStore, SearchQuery};
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod output;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Query generated documentation search indexes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Index file (search_index.js or JSON); overrides DOCSEARCH_INDEX and the config file
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Config file (defaults to ./docsearch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find entries whose title or text contains the query (case-insensitive)
    Search(SearchArgs),

    /// Show every entry at an anchor
    Show(ShowArgs),

    /// List page names in index order
    Pages(JsonArgs),

    /// Show entry counts by category
    Stats(JsonArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Substring to look for; omit to list every entry
    query: Option<String>,

    /// Only entries of this category (repeatable)
    #[arg(long = "category", short = 'c', value_parser = parse_category)]
    categories: Vec<Category>,

    /// Only entries on this page
    #[arg(long)]
    page: Option<String>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    limit: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Anchor to look up, e.g. "#Pkg.func"; "" is the page root
    location: String,

    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct JsonArgs {
    /// Output results as JSON
    #[arg(long)]
    json: bool,
}

fn parse_category(raw: &str) -> std::result::Result<Category, String> {
    raw.parse::<Category>().map_err(|err| err.to_string())
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let json_output = match &cli.command {
        Commands::Search(args) => args.json,
        Commands::Show(args) => args.json,
        Commands::Pages(args) | Commands::Stats(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let index_path = config.resolve_index(cli.index.clone())?;
    let store = IndexStore::open(&index_path)
        .with_context(|| format!("Failed to load index {}", index_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search(args) => {
            let query = SearchQuery {
                text: args.query.unwrap_or_default(),
                categories: args.categories,
                page: args.page,
                limit: args.limit.or(config.limit),
            };
            let hits = store.query(&query);
            log::info!("{} of {} entries match", hits.len(), store.len());
            if args.json {
                output::write_json(&mut out, &hits)?;
            } else {
                output::write_entries(&mut out, &hits)?;
            }
        }
        Commands::Show(args) => {
            let hits = store.by_location(&args.location);
            if hits.is_empty() {
                bail!("No entries at location `{}`", args.location);
            }
            if args.json {
                output::write_json(&mut out, &hits)?;
            } else {
                output::write_entries(&mut out, &hits)?;
            }
        }
        Commands::Pages(args) => {
            let pages = store.pages();
            if args.json {
                output::write_json(&mut out, &pages)?;
            } else {
                output::write_pages(&mut out, &pages)?;
            }
        }
        Commands::Stats(args) => {
            let stats = store.stats();
            if args.json {
                output::write_json(&mut out, &stats)?;
            } else {
                output::write_stats(&mut out, &stats)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
