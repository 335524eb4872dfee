//! Command-line front end.
//!
//! Drives the same event handler a graphical front end would and prints the
//! resulting view models as text.

use clap::{Parser, Subcommand};
use moviescorn::app::{BrowseView, MovieCard, NotificationKind};
use moviescorn::catalog::filter::{year_options, GENRES};
use moviescorn::infrastructure::default_config_file;
use moviescorn::share::{social_share_url, Platform, StdoutClipboard};
use moviescorn::{initialize, AppState, Config, Event, Movie, MoviesError, Result, Runner, Section};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

/// MoviesCorn - browse movies and keep a watchlist
#[derive(Parser)]
#[command(name = "moviescorn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override a configuration value, e.g. `--set source=tmdb`
    #[arg(long = "set", value_name = "KEY=VALUE", global = true, value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the browse page: carousels and filtered results
    #[command(alias = "b")]
    Browse {
        /// Match title, overview, director or cast
        #[arg(long, short, default_value = "")]
        search: String,
        /// Genre, or "all"
        #[arg(long, short, default_value = "all")]
        genre: String,
        /// Release year (substring of the date), or "all"
        #[arg(long, short, default_value = "all")]
        year: String,
        /// popularity, rating, year or title
        #[arg(long, default_value = "popularity")]
        sort: String,
        /// Only list watchlist members
        #[arg(long, short)]
        watchlist: bool,
    },

    /// Show details of one movie
    Show {
        id: u64,
    },

    /// Open a share link such as `http://localhost:8080/?movie=3`
    Open {
        link: String,
    },

    /// Manage the watchlist
    #[command(alias = "wl")]
    Watchlist {
        #[command(subcommand)]
        command: WatchlistCommands,
    },

    /// Share a movie, or print a social share link with --platform
    Share {
        id: u64,
        /// twitter, facebook or reddit
        #[arg(long, short)]
        platform: Option<String>,
    },

    /// List the genre and year filter options
    Filters,
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List watchlist entries in insertion order
    #[command(alias = "ls")]
    List,
    /// Add a movie
    Add { id: u64 },
    /// Remove a movie
    #[command(alias = "rm")]
    Remove { id: u64 },
    /// Add the movie if absent, remove it otherwise
    Toggle { id: u64 },
    /// Remove every entry
    Clear,
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(default_config_file);
    let mut config = Config::load(&config_path)?;
    let rejected = config.apply_overrides(&cli.overrides.into_iter().collect::<BTreeMap<_, _>>());

    moviescorn::observability::init_tracing(&config);
    for key in rejected {
        tracing::warn!(key = %key, "ignoring unknown or invalid --set override");
    }
    tracing::debug!(source = ?config.source, max_pages = config.max_pages, "configuration resolved");

    let mut state = initialize(&config)?;
    let mut runner = Runner::new(config.build_source()?, config.max_pages, Box::new(StdoutClipboard));

    match cli.command {
        Commands::Browse {
            search,
            genre,
            year,
            sort,
            watchlist,
        } => {
            load_catalog(&mut runner, &mut state).await?;
            for event in [
                Event::SearchChanged(search),
                Event::GenreSelected(genre),
                Event::YearSelected(year),
                Event::SortSelected(sort),
                Event::ShowSection(if watchlist { Section::Watchlist } else { Section::All }),
            ] {
                runner.dispatch(&mut state, event).await?;
            }
            print_browse(&state.compute_viewmodel());
        }
        Commands::Show { id } => {
            load_catalog(&mut runner, &mut state).await?;
            runner.dispatch(&mut state, Event::OpenMovie(id)).await?;
            print_selected(&state, &format!("no movie with id {id}"));
        }
        Commands::Open { link } => {
            runner.dispatch(&mut state, Event::DeepLink(link.clone())).await?;
            load_catalog(&mut runner, &mut state).await?;
            print_selected(&state, &format!("link does not name a known movie: {link}"));
        }
        Commands::Watchlist { command } => watchlist_command(&mut runner, &mut state, command).await?,
        Commands::Share { id, platform } => {
            load_catalog(&mut runner, &mut state).await?;
            let movie = state
                .find_movie(id)
                .ok_or_else(|| MoviesError::Share(format!("no movie with id {id}")))?;

            if let Some(platform) = platform {
                let platform: Platform = platform.parse()?;
                println!("{}", social_share_url(movie, &state.share_origin, platform));
            } else {
                runner.dispatch(&mut state, Event::ShareMovie(id)).await?;
                print_notifications(&state);
            }
        }
        Commands::Filters => {
            println!("Genres: {}", GENRES.join(", "));
            let latest = chrono::Datelike::year(&chrono::Local::now());
            let years: Vec<String> = year_options(latest).iter().map(i32::to_string).collect();
            println!("Years:  {}", years.join(", "));
        }
    }

    Ok(())
}

async fn load_catalog(runner: &mut Runner, state: &mut AppState) -> Result<()> {
    runner.dispatch(state, Event::Load).await?;
    runner.wait_for_load(state).await?;

    match state.catalog.error() {
        Some(message) => Err(MoviesError::Source(message.to_string())),
        None => Ok(()),
    }
}

async fn watchlist_command(runner: &mut Runner, state: &mut AppState, command: WatchlistCommands) -> Result<()> {
    let id = match command {
        WatchlistCommands::List => {
            if state.watchlist.is_empty() {
                println!("Your watchlist is empty. Start adding some movies!");
            }
            for movie in state.watchlist.entries() {
                println!("{}", card_line(movie, None, true));
            }
            return Ok(());
        }
        WatchlistCommands::Clear => {
            let count = state.watchlist.len();
            state.watchlist.clear()?;
            println!("Removed {count} movies from your watchlist.");
            return Ok(());
        }
        WatchlistCommands::Add { id } if state.watchlist.is_member(id) => {
            println!("Already in your watchlist.");
            return Ok(());
        }
        WatchlistCommands::Remove { id } if !state.watchlist.is_member(id) => {
            println!("Not in your watchlist.");
            return Ok(());
        }
        WatchlistCommands::Add { id } | WatchlistCommands::Remove { id } | WatchlistCommands::Toggle { id } => id,
    };

    // Removal works from the stored record alone; adding needs the catalog.
    if !state.watchlist.is_member(id) {
        load_catalog(runner, state).await?;
        if state.find_movie(id).is_none() {
            return Err(MoviesError::Source(format!("no movie with id {id}")));
        }
    }
    runner.dispatch(state, Event::ToggleWatchlist(id)).await?;
    print_notifications(state);
    Ok(())
}

fn card_line(movie: &Movie, rank: Option<usize>, in_watchlist: bool) -> String {
    let rank = rank.map(|r| format!("#{r:<2} ")).unwrap_or_default();
    let year = movie.release_year().map(|y| format!(" ({y})")).unwrap_or_default();
    let stars = movie.star_rating().map(|s| format!("  ★ {s:.1}")).unwrap_or_default();
    let marker = if in_watchlist { "♥" } else { " " };
    format!("{marker} {rank}[{:>4}] {}{year}{stars}", movie.id, movie.title)
}

fn print_cards(heading: &str, cards: &[MovieCard<'_>]) {
    if cards.is_empty() {
        return;
    }
    println!("\n{heading}");
    for card in cards {
        println!("  {}", card_line(card.movie, card.rank, card.in_watchlist));
    }
}

fn print_browse(view: &BrowseView<'_>) {
    if let Some(error) = view.error {
        println!("Oops! Something went wrong\n{error}");
        return;
    }

    println!("My Watchlist ({})", view.watchlist_count);
    if let Some(featured) = view.featured {
        println!("\nFeatured: {}", card_line(featured.movie, None, featured.in_watchlist));
    }
    print_cards("Trending Now", &view.trending);
    print_cards("Top Rated", &view.top_rated);
    print_cards("Popular Movies", &view.popular);

    println!("\n{} ({})", view.heading, view.results.len());
    for card in &view.results {
        println!("  {}", card_line(card.movie, None, card.in_watchlist));
    }
    if let Some(empty) = view.empty_state {
        println!("  {}  [{}]", empty.message, empty.action);
    }
}

fn print_selected(state: &AppState, missing: &str) {
    let Some(movie) = state.selected_movie() else {
        println!("{missing}");
        return;
    };

    println!("{}", movie.title);
    let mut facts = Vec::new();
    if let Some(year) = movie.release_year() {
        facts.push(year.to_string());
    }
    if let Some(runtime) = movie.formatted_runtime() {
        facts.push(runtime);
    }
    if let Some(stars) = movie.star_rating() {
        facts.push(format!("★ {stars:.1}"));
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" · "));
    }
    if !movie.genres.is_empty() {
        println!("Genres: {}", movie.genres.join(", "));
    }
    if let Some(overview) = &movie.overview {
        println!("\n{overview}\n");
    }
    if let Some(director) = &movie.director {
        println!("Director: {director}");
    }
    if !movie.cast.is_empty() {
        println!("Cast: {}", movie.cast.join(", "));
    }
    if !movie.production_companies.is_empty() {
        println!("Production: {}", movie.production_companies.join(", "));
    }
    if let Some(poster) = movie.poster_url() {
        println!("Poster: {poster}");
    }
    let status = if state.watchlist.is_member(movie.id) { "in your watchlist" } else { "not in your watchlist" };
    println!("Watchlist: {status}");
}

fn print_notifications(state: &AppState) {
    for notification in &state.notifications {
        let prefix = match notification.kind {
            NotificationKind::Info => "",
            NotificationKind::Error => "error: ",
        };
        println!("{prefix}{}: {}", notification.title, notification.description);
    }
}
