//! vidbox - headless front end for the player core
//!
//! Classifies links, runs the upload cooldown and drives a persistent
//! playback session from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use vidbox::database::{initialize_database, SqliteStore};
use vidbox::throttle::UploadThrottle;
use vidbox::utils::{get_settings_path, AppSettings};
use vidbox::{classifier, LocalMediaHost, MediaFile, PlaybackContext, RenderMode};

#[derive(Parser)]
#[command(name = "vidbox", version, about = "Video source classifier and player session")]
struct Args {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Preference database, overrides the settings file
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the provider kind of a source
    Classify { url: String },
    /// Print the URL a player should load
    Embed { url: String },
    /// Check whether a link is accepted for playback
    Validate { url: String },
    /// Run an upload cooldown and print every tick
    Countdown {
        #[arg(long)]
        seconds: Option<u32>,
    },
    /// Open a file or link in the persistent session
    Open { source: String },
    /// Show the persisted session
    Status,
    /// Forget the session and return to the default video
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config_path = args.config.clone().unwrap_or_else(get_settings_path);
    let mut settings = AppSettings::load(&config_path).await?;
    if let Some(db) = args.db {
        settings.database_path = db;
    }

    match args.command {
        Command::Classify { url } => {
            let resolved = classifier::ProviderRegistry::global().resolve(&url);
            match resolved.video_id {
                Some(id) => println!("{} {}", resolved.kind, id),
                None => println!("{}", resolved.kind),
            }
        }
        Command::Embed { url } => println!("{}", classifier::to_embed_url(&url)),
        Command::Validate { url } => {
            let valid = classifier::is_valid_video_reference(&url);
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                std::process::exit(1);
            }
        }
        Command::Countdown { seconds } => {
            let throttle = UploadThrottle::new(settings.tick_interval());
            let mut handle = throttle.start_cooldown(seconds.unwrap_or(settings.cooldown_secs));
            println!("{}", handle.remaining());
            while let Some(remaining) = handle.changed().await {
                println!("{}", remaining);
                if remaining == 0 {
                    break;
                }
            }
        }
        Command::Open { source } => {
            let context = open_session(&settings).await?;
            let result = if Path::new(&source).exists() {
                let file = MediaFile::from_path(Path::new(&source))?;
                context.upload_file(Some(file)).await
            } else {
                context.submit_link(&source).await
            };

            match result {
                Ok(outcome) => {
                    println!("{} {}", outcome.kind, outcome.embed_url);
                    print_render_mode(&context.render_mode().await);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(2);
                }
            }
            context.shutdown();
        }
        Command::Status => {
            let context = open_session(&settings).await?;
            let state = context.snapshot().await;
            println!("source:   {}", state.source);
            println!("kind:     {}", state.kind);
            if let Some(file) = &state.file {
                println!("file:     {}", file.name);
            }
            println!("volume:   {:.1}", state.volume);
            if let Some(at) = state.last_upload {
                println!("uploaded: {}", at.to_rfc3339());
            }
            println!("cooldown: {}s", state.cooldown_remaining);
            print_render_mode(&context.render_mode().await);
            context.shutdown();
        }
        Command::Reset => {
            let context = open_session(&settings).await?;
            context.reset_to_default().await;
            println!("{}", context.snapshot().await.source);
            context.shutdown();
        }
    }

    Ok(())
}

async fn open_session(settings: &AppSettings) -> Result<PlaybackContext> {
    let pool = initialize_database(&settings.database_path).await?;
    let store = Arc::new(SqliteStore::new(pool));
    let host = Arc::new(LocalMediaHost::new(settings.download_dir.clone()));
    PlaybackContext::load(settings.clone(), store, host).await
}

fn print_render_mode(mode: &RenderMode) {
    match mode {
        RenderMode::Error => println!("render:   error"),
        RenderMode::Embed { url, kind } => println!("render:   {} iframe {}", kind, url),
        RenderMode::Native { src } => println!("render:   native {}", src),
    }
}
