//! folio - themed GitHub profile dashboard generator

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use log::{debug, info};

mod app;
mod auth;
mod cache;
mod cli;
mod config;
mod error;
mod github;
mod markdown;
mod theme;
mod view;

use app::{App, DataOrigin, RenderOptions};
use auth::{TokenSource, TokenStore};
use cache::{CACHE_KEY, FileStore, ProfileCache};
use cli::{BuildArgs, CacheCommands, Cli, Commands, ThemeCommands, TokenCommands};
use config::Config;
use error::{FolioError, Result};
use github::{GitHubClient, GitHubSource};
use theme::ThemeStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "folio=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn open_store(store_dir: Option<PathBuf>) -> Result<FileStore> {
    let dir = match store_dir {
        Some(dir) => dir,
        None => cache::paths::store_dir()
            .ok_or_else(|| FolioError::Storage("Could not determine data directory".to_string()))?,
    };
    Ok(FileStore::new(dir))
}

async fn run(cli: Cli) -> Result<()> {
    let store = open_store(cli.store_dir)?;

    match cli.command {
        Commands::Build(args) => {
            let config = Config::load(cli.config.as_deref())?;
            build(&store, &config, args).await
        }
        Commands::Theme(cmd) => theme_command(&store, cmd),
        Commands::Token(cmd) => token_command(&store, cmd),
        Commands::Cache(cmd) => cache_command(&store, cmd),
        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn build(store: &FileStore, config: &Config, args: BuildArgs) -> Result<()> {
    let username = args
        .username
        .unwrap_or_else(|| config.username().to_string());
    let mode = args.markdown.unwrap_or_else(|| config.markdown());
    let output = args.output.unwrap_or_else(|| config.output());
    let api_base = args
        .api_base
        .unwrap_or_else(|| config.api_base().to_string());

    if args.refresh {
        info!("Refresh requested, dropping cached data");
        ProfileCache::new(store).clear();
    }

    let token = TokenStore::new(store).resolve().map(|(token, _)| token);
    let client = GitHubClient::new(&api_base, token.as_deref())?;
    let source = GitHubSource::new(client, username.clone(), mode);

    let options = RenderOptions {
        username,
        api_base,
        sort: args.sort,
        mode,
    };
    let mut app = App::new(store, &source);
    let build = app.run(&options).await;
    debug!("Build phases: {:?}", app.phases());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, &build.html)?;

    let origin = match build.origin {
        DataOrigin::Cache => "cache",
        DataOrigin::Network => "GitHub",
    };
    println!(
        "Wrote {} ({} theme, {} repositories from {}, fetched {})",
        output.display(),
        build.theme,
        build.data.repositories.len(),
        origin,
        build.fetched_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

fn theme_command(store: &FileStore, cmd: ThemeCommands) -> Result<()> {
    let themes = ThemeStore::new(store);
    let theme = match cmd {
        ThemeCommands::Show => themes.load(),
        ThemeCommands::Toggle => themes.toggle()?,
        ThemeCommands::Set { theme } => {
            themes.save(theme)?;
            theme
        }
    };
    println!("{}", theme);
    Ok(())
}

fn token_command(store: &FileStore, cmd: TokenCommands) -> Result<()> {
    let tokens = TokenStore::new(store);
    match cmd {
        TokenCommands::Set { token } => {
            tokens.save(&token)?;
            println!("Token saved");
        }
        TokenCommands::Clear => {
            tokens.clear()?;
            println!("Token cleared");
        }
        TokenCommands::Show => match tokens.resolve() {
            Some((token, TokenSource::Stored)) => println!("{} (saved)", auth::mask(&token)),
            Some((token, TokenSource::BuildTime)) => {
                println!("{} (built in)", auth::mask(&token))
            }
            None => println!("No token configured"),
        },
    }
    Ok(())
}

fn cache_command(store: &FileStore, cmd: CacheCommands) -> Result<()> {
    let cache = ProfileCache::new(store);
    match cmd {
        CacheCommands::Show => match cache.read() {
            Some(entry) => {
                let age = entry.age(Utc::now());
                println!("Cached at: {}", entry.timestamp.to_rfc3339());
                println!("Age: {} min", age.num_minutes());
                if let Some(scope) = &entry.scope {
                    println!("Fetched for: {} ({})", scope.username, scope.api_base);
                }
                println!(
                    "Profile: {}",
                    entry
                        .data
                        .profile
                        .as_ref()
                        .map(|p| p.login.as_str())
                        .unwrap_or("missing")
                );
                println!("Repositories: {}", entry.data.repositories.len());
                println!(
                    "README: {}",
                    if entry.data.document.is_some() {
                        "present"
                    } else {
                        "missing"
                    }
                );
                println!("Store: {} (slot {})", store.dir().display(), CACHE_KEY);
            }
            None => println!("No cached data"),
        },
        CacheCommands::Clear => {
            cache.clear();
            println!("Cache cleared");
        }
    }
    Ok(())
}
