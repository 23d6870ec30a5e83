use clap::{Parser, Subcommand};
use driveflix::catalog::{Movie, OpensheetSource, Series, SnapshotSource};
use driveflix::config::Config;
use driveflix::filter::{FilterQuery, collect_genres, collect_languages, filter_movies};
use driveflix::store::{UserStateStore, resolve_favorites, resolve_recently_played};
use driveflix::{Catalog, DriveflixError, ProgressEvent, load_catalog, playback};
use std::process;

/// Number of titles shown in the "newly added" banner.
const NEWLY_ADDED_COUNT: usize = 3;

#[derive(Parser)]
#[command(
    name = "driveflix",
    version,
    about = "Browse, search and play a spreadsheet-backed movie and web-series catalog"
)]
struct Cli {
    /// Override the movies endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    movies_url: Option<String>,

    /// Override the web-series endpoint URL
    #[arg(long, global = true, value_name = "URL")]
    series_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List movies, optionally searched and filtered
    Movies {
        /// Case-insensitive text matched against title or description
        #[arg(long)]
        search: Option<String>,

        /// Keep only movies carrying this exact genre tag
        #[arg(long)]
        genre: Option<String>,

        /// Keep only movies carrying this exact language tag
        #[arg(long)]
        language: Option<String>,
    },

    /// Browse web series with their seasons and episodes
    Series,

    /// Print playback URLs for a file id and record the play
    Play {
        /// File id of the movie or episode to play
        file_id: String,
    },

    /// Toggle a movie's favorite state
    Favorite {
        /// File id of the movie to toggle
        file_id: String,
    },

    /// List favorite movies
    Favorites,

    /// List recently played movies
    Recent,

    /// List all genres present in the movie catalog
    Genres,

    /// List all languages present in the movie catalog
    Languages,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DriveflixError> {
    let mut config = Config::load();
    if let Some(url) = cli.movies_url {
        config.movies_url = url;
    }
    if let Some(url) = cli.series_url {
        config.series_url = url;
    }

    match cli.command {
        Command::Movies {
            search,
            genre,
            language,
        } => cmd_movies(&config, search, genre, language),
        Command::Series => cmd_series(&config),
        Command::Play { file_id } => cmd_play(&config, &file_id),
        Command::Favorite { file_id } => cmd_favorite(&file_id),
        Command::Favorites => cmd_favorites(&config),
        Command::Recent => cmd_recent(&config),
        Command::Genres => cmd_genres(&config),
        Command::Languages => cmd_languages(&config),
    }
}

/// Loads the catalog through the snapshot layer. If no cache directory
/// is available the catalog still loads, just without offline fallback.
fn load(config: &Config) -> Catalog {
    match SnapshotSource::open(OpensheetSource::new(config)) {
        Ok(source) => load_catalog(&source, handle_progress_event),
        Err(_) => load_catalog(&OpensheetSource::new(config), handle_progress_event),
    }
}

/// Handles progress events and prints status lines to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::FetchingMovies => println!("Fetching movies..."),
        ProgressEvent::MoviesLoaded { count } => println!("Loaded {count} movie(s)"),
        ProgressEvent::FetchingSeries => println!("Fetching web series..."),
        ProgressEvent::SeriesLoaded { count } => println!("Loaded {count} series\n"),
    }
}

fn cmd_movies(
    config: &Config,
    search: Option<String>,
    genre: Option<String>,
    language: Option<String>,
) -> Result<(), DriveflixError> {
    let catalog = load(config);
    let store = UserStateStore::open()?;
    let unfiltered = search.is_none() && genre.is_none() && language.is_none();

    match &catalog.movies {
        Err(e) => println!("Error loading movies: {e}"),
        Ok(movies) => {
            if unfiltered {
                print_newly_added(catalog.latest_movies(NEWLY_ADDED_COUNT));
            }

            let query = FilterQuery {
                text: search.unwrap_or_default(),
                genre,
                language,
            };
            let results = filter_movies(movies, &query);

            if results.is_empty() {
                println!("No movies found. Try a different search.");
            } else {
                for movie in results {
                    print_movie(movie, &store);
                }
            }
        }
    }

    Ok(())
}

fn cmd_series(config: &Config) -> Result<(), DriveflixError> {
    let catalog = load(config);

    match &catalog.series {
        Err(e) => println!("Error loading webseries: {e}"),
        Ok(series) if series.is_empty() => println!("No webseries found."),
        Ok(series) => {
            for entry in series {
                print_series(entry);
            }
        }
    }

    Ok(())
}

fn cmd_play(config: &Config, file_id: &str) -> Result<(), DriveflixError> {
    let catalog = load(config);
    let mut store = UserStateStore::open()?;

    // Only movies enter the recently-played list; episodes play without
    // being recorded.
    if let Some(movie) = catalog.find_movie(file_id) {
        println!("Playing {}", movie.title);
        store.record_play(file_id)?;
    } else if let Some(episode) = catalog.find_episode(file_id) {
        println!("Playing {}", episode.title);
    }

    println!("Preview:  {}", playback::preview_url(file_id));
    println!("Download: {}", playback::download_url(file_id));

    Ok(())
}

fn cmd_favorite(file_id: &str) -> Result<(), DriveflixError> {
    let mut store = UserStateStore::open()?;

    if store.toggle_favorite(file_id)? {
        println!("Added {file_id} to favorites");
    } else {
        println!("Removed {file_id} from favorites");
    }

    Ok(())
}

fn cmd_favorites(config: &Config) -> Result<(), DriveflixError> {
    let catalog = load(config);
    let store = UserStateStore::open()?;

    match &catalog.movies {
        Err(e) => println!("Error loading movies: {e}"),
        Ok(movies) => {
            let favorites = resolve_favorites(&store, movies);
            if favorites.is_empty() {
                println!("No favorites yet.");
            } else {
                for movie in favorites {
                    print_movie(movie, &store);
                }
            }
        }
    }

    Ok(())
}

fn cmd_recent(config: &Config) -> Result<(), DriveflixError> {
    let catalog = load(config);
    let store = UserStateStore::open()?;

    match &catalog.movies {
        Err(e) => println!("Error loading movies: {e}"),
        Ok(movies) => {
            let recent = resolve_recently_played(&store, movies);
            if recent.is_empty() {
                println!("Nothing played recently.");
            } else {
                for movie in recent {
                    print_movie(movie, &store);
                }
            }
        }
    }

    Ok(())
}

fn cmd_genres(config: &Config) -> Result<(), DriveflixError> {
    let catalog = load(config);

    match &catalog.movies {
        Err(e) => println!("Error loading movies: {e}"),
        Ok(movies) => {
            for genre in collect_genres(movies) {
                println!("{genre}");
            }
        }
    }

    Ok(())
}

fn cmd_languages(config: &Config) -> Result<(), DriveflixError> {
    let catalog = load(config);

    match &catalog.movies {
        Err(e) => println!("Error loading movies: {e}"),
        Ok(movies) => {
            for language in collect_languages(movies) {
                println!("{language}");
            }
        }
    }

    Ok(())
}

fn print_newly_added(latest: &[Movie]) {
    if latest.is_empty() {
        return;
    }

    let titles: Vec<&str> = latest.iter().map(|movie| movie.title.as_str()).collect();
    println!("Newly added: {}\n", titles.join(", "));
}

fn print_movie(movie: &Movie, store: &UserStateStore) {
    let marker = if store.is_favorite(&movie.file_id) {
        "♥"
    } else {
        " "
    };
    println!("{marker} {} [{}]", movie.title, movie.file_id);

    if !movie.genres.is_empty() {
        println!("    Genre: {}", movie.genres.join(", "));
    }
    if !movie.languages.is_empty() {
        println!("    Language: {}", movie.languages.join(", "));
    }
    if movie.description.is_empty() {
        println!("    No description available");
    } else {
        println!("    {}", movie.description);
    }
    println!();
}

fn print_series(series: &Series) {
    println!("{}", series.title);

    if !series.genres.is_empty() {
        println!("    Genre: {}", series.genres.join(", "));
    }
    if !series.languages.is_empty() {
        println!("    Language: {}", series.languages.join(", "));
    }
    if series.description.is_empty() {
        println!("    No description available");
    } else {
        println!("    {}", series.description);
    }

    for season in &series.seasons {
        println!("    Season {}", season.number);
        for episode in &season.episodes {
            println!("      {} [{}]", episode.title, episode.file_id);
        }
    }
    println!();
}
