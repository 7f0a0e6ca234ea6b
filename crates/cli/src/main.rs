use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use service::{FilmService, SharedFilmStore, SharedUserStore, UserService};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use store::{FilmId, InMemoryFilmStore, InMemoryUserStore, NewFilm, NewUser, User, UserId};

/// ReelRate - Film Rating Service
#[derive(Parser)]
#[command(name = "reel-rate")]
#[command(about = "Film popularity ranking and friendship queries", long_about = None)]
struct Cli {
    /// Path to a JSON seed file with films, users, likes and friend requests
    #[arg(short, long, default_value = "data/seed.json")]
    seed: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the most popular films
    Top {
        /// Number of films to show
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// List every film in the catalog
    Films,

    /// List every registered user
    Users,

    /// Show a user's friends (outgoing requests)
    Friends {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,

        /// Only show mutually-confirmed friendships
        #[arg(long)]
        confirmed: bool,
    },

    /// Show the common friends of two users
    Common {
        /// First user ID
        #[arg(long)]
        user_id: UserId,

        /// Second user ID
        #[arg(long)]
        other_id: UserId,
    },
}

/// Seed file shape. Likes and requests refer to entities by their position
/// in the arrays: the stores allocate ids 1..n in creation order.
#[derive(Deserialize)]
struct Seed {
    films: Vec<NewFilm>,
    users: Vec<NewUser>,
    #[serde(default)]
    likes: Vec<(FilmId, UserId)>,
    #[serde(default)]
    friend_requests: Vec<(UserId, UserId)>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let (films, users) = load_seed(&cli.seed)?;
    println!(
        "{} Seeded {} films and {} users from {}",
        "✓".green(),
        films.get_all().len(),
        users.get_all().len(),
        cli.seed.display()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Top { count } => handle_top(&films, count),
        Commands::Films => handle_films(&films),
        Commands::Users => handle_users(&users),
        Commands::Friends { user_id, confirmed } => handle_friends(&users, user_id, confirmed)?,
        Commands::Common { user_id, other_id } => handle_common(&users, user_id, other_id)?,
    }

    Ok(())
}

/// Build the services and replay the seed file into them
fn load_seed(path: &PathBuf) -> Result<(FilmService, UserService)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed: Seed = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    let film_store: SharedFilmStore = Arc::new(RwLock::new(InMemoryFilmStore::new()));
    let user_store: SharedUserStore = Arc::new(RwLock::new(InMemoryUserStore::new()));
    let films = FilmService::new(film_store, user_store.clone());
    let users = UserService::new(user_store);

    for new_user in seed.users {
        users.create(new_user);
    }
    for new_film in seed.films {
        films.create(new_film).context("Failed to seed film")?;
    }
    for (film_id, user_id) in seed.likes {
        films
            .add_like(film_id, user_id)
            .with_context(|| format!("Failed to seed like ({film_id}, {user_id})"))?;
    }
    for (from, to) in seed.friend_requests {
        users
            .add_friend(from, to)
            .with_context(|| format!("Failed to seed friend request ({from}, {to})"))?;
    }

    Ok((films, users))
}

/// Handle the 'top' command
fn handle_top(films: &FilmService, count: usize) {
    let ranked = films.top_popular(count);
    if ranked.is_empty() {
        println!("{}", "No films tracked".yellow());
        return;
    }

    println!("\n{}", format!("Top {} films by likes", ranked.len()).bold());
    for (i, film) in ranked.iter().enumerate() {
        let likes = films.like_count(film.id).unwrap_or(0);
        println!(
            "{:>3}. {} ({}) - {} {}",
            i + 1,
            film.title.cyan(),
            film.release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "????".to_string()),
            likes,
            if likes == 1 { "like" } else { "likes" }
        );
    }
}

/// Handle the 'films' command
fn handle_films(films: &FilmService) {
    for film in films.get_all() {
        println!(
            "{:>3}  {} ({} min)",
            film.id,
            film.title.cyan(),
            film.duration_min
        );
        if !film.description.is_empty() {
            println!("     {}", film.description.dimmed());
        }
    }
}

/// Handle the 'users' command
fn handle_users(users: &UserService) {
    for user in users.get_all() {
        println!(
            "{:>3}  {} <{}>",
            user.id,
            user.name.cyan(),
            user.email.dimmed()
        );
    }
}

/// Handle the 'friends' command
fn handle_friends(users: &UserService, user_id: UserId, confirmed: bool) -> Result<()> {
    let user = users.get(user_id)?;
    let friends = if confirmed {
        users.confirmed_friends(user_id)?
    } else {
        users.friends(user_id)?
    };

    let label = if confirmed { "confirmed friends" } else { "friends" };
    println!("\n{}", format!("{} of {}:", label, user.name).bold());
    print_user_list(&friends);
    Ok(())
}

/// Handle the 'common' command
fn handle_common(users: &UserService, user_id: UserId, other_id: UserId) -> Result<()> {
    let first = users.get(user_id)?;
    let second = users.get(other_id)?;
    let common = users.common_friends(user_id, other_id)?;

    println!(
        "\n{}",
        format!("Common friends of {} and {}:", first.name, second.name).bold()
    );
    print_user_list(&common);
    Ok(())
}

fn print_user_list(list: &[User]) {
    if list.is_empty() {
        println!("  {}", "(none)".yellow());
        return;
    }
    for user in list {
        println!("  {:>3}  {}", user.id, user.name.cyan());
    }
}
