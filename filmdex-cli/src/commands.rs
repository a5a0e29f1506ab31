//! CLI command implementations

use anyhow::{Context, anyhow};
use clap::Subcommand;
use filmdex_core::config::FilmdexConfig;
use filmdex_search::aggregator::MovieSearch;
use filmdex_search::providers::{MovieProvider, OmdbClient};
use filmdex_search::types::{DetailRecord, EnrichedResult, SearchQuery, TitleKind};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for movies or series by title
    Search {
        /// Title text to search for
        title: String,
        /// Release year filter
        #[arg(short, long)]
        year: Option<String>,
        /// Title kind filter: movie, series, or episode
        #[arg(short, long)]
        kind: Option<String>,
        /// Inclusive lower bound for the IMDb rating filter
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        /// Inclusive upper bound for the IMDb rating filter
        #[arg(long, default_value_t = 10.0)]
        max_rating: f64,
    },
    /// Show the full record for one IMDb id
    Details {
        /// IMDb identifier, e.g. tt0372784
        imdb_id: String,
    },
    /// Look up a single title and show its ratings breakdown
    Info {
        /// Exact title to look up
        title: String,
        /// Release year filter
        #[arg(short, long)]
        year: Option<String>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(config: &FilmdexConfig, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Search {
            title,
            year,
            kind,
            min_rating,
            max_rating,
        } => run_search(config, title, year, kind, min_rating, max_rating).await,
        Commands::Details { imdb_id } => show_details(config, imdb_id).await,
        Commands::Info { title, year } => show_info(config, title, year).await,
    }
}

/// Run an aggregated search and print the result list
async fn run_search(
    config: &FilmdexConfig,
    title: String,
    year: Option<String>,
    kind: Option<String>,
    min_rating: f64,
    max_rating: f64,
) -> anyhow::Result<()> {
    if min_rating > max_rating {
        return Err(anyhow!("--min-rating must not exceed --max-rating"));
    }

    let mut query = SearchQuery::new(title).rating_range(min_rating, max_rating);
    if let Some(year) = year {
        query = query.year(year);
    }
    if let Some(kind) = kind {
        let kind: TitleKind = kind.parse().map_err(|e: String| anyhow!(e))?;
        query = query.kind(kind);
    }

    let search = MovieSearch::from_config(config).context("Failed to set up search pipeline")?;
    let results = search
        .search(&query)
        .await
        .context("Search did not complete")?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    for (index, result) in results.iter().enumerate() {
        print_result(index + 1, result);
    }

    Ok(())
}

/// Fetch and print one record by IMDb id
async fn show_details(config: &FilmdexConfig, imdb_id: String) -> anyhow::Result<()> {
    let client =
        OmdbClient::new(config.provider.clone()).context("Failed to set up OMDb client")?;

    match client.movie_by_id(&imdb_id).await {
        Some(record) => print_record(&record),
        None => println!("No record found for {imdb_id}."),
    }

    Ok(())
}

/// Fetch and print one record by exact title, full plot included
async fn show_info(
    config: &FilmdexConfig,
    title: String,
    year: Option<String>,
) -> anyhow::Result<()> {
    let client =
        OmdbClient::new(config.provider.clone()).context("Failed to set up OMDb client")?;

    match client.find_by_title(&title, year.as_deref()).await? {
        Some(record) => print_record(&record),
        None => println!("No record found for '{title}'."),
    }

    Ok(())
}

fn print_result(position: usize, result: &EnrichedResult) {
    let rating = result
        .rating_display
        .as_deref()
        .map(|r| format!("  rating {r}"))
        .unwrap_or_default();

    println!(
        "{position:2}. {} ({}) [{}]{rating}",
        result.title, result.year, result.kind
    );

    if let Some(plot) = &result.plot {
        println!("     {plot}");
    }
}

fn print_record(record: &DetailRecord) {
    println!("Title:    {}", field(&record.title));
    println!("Year:     {}", field(&record.year));
    println!("Kind:     {}", field(&record.kind));
    println!("Runtime:  {}", field(&record.runtime));
    println!("Genre:    {}", field(&record.genre));
    println!("Director: {}", field(&record.director));
    println!("Actors:   {}", field(&record.actors));
    println!("Rating:   {}", field(&record.imdb_rating));
    if let Some(plot) = &record.plot {
        println!("Plot:     {plot}");
    }

    let ratings = record.transformed_ratings();
    if !ratings.is_empty() {
        println!("Ratings:");
        let mut sources: Vec<_> = ratings.iter().collect();
        sources.sort();
        for (source, value) in sources {
            println!("  {source}: {value}");
        }
    }
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}
