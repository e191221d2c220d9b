//! Journal Sync CLI
//!
//! # Commands
//!
//! - `pull` - Merge the remote collection into the local journal
//! - `list` - Show local journal entries
//! - `add` - Create an entry locally and push it
//! - `push` - Push a stored entry
//! - `delete` - Delete an entry remotely and locally

use clap::{Parser, Subcommand};
use journal_engine::{LocalStore, Mood, Record};
use journal_sync::{Config, FileStore, HttpTransport, SyncController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sync a local journal with a remote document store.
#[derive(Parser)]
#[command(name = "journal-sync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge the remote collection into the local journal
    Pull,

    /// Show local journal entries
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an entry locally and push it
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        body: String,

        #[arg(short, long, default_value = "neutral")]
        mood: String,
    },

    /// Push a stored entry to the remote store
    Push {
        /// Entry identifier
        identifier: String,
    },

    /// Delete an entry remotely, then locally
    Delete {
        /// Entry identifier
        identifier: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let store = FileStore::open(&config.store_path)?;
    let transport = HttpTransport::new(config.http_timeout)?;
    let (controller, _foreground) = SyncController::new(config.endpoint, transport, store);
    let store = controller.store();

    match cli.command {
        Commands::Pull => {
            let report = controller.initialize().await?;
            println!(
                "created {}, updated {}, unchanged {}, skipped {}",
                report.created.len(),
                report.updated.len(),
                report.unchanged.len(),
                report.skipped
            );
        }
        Commands::List { json } => {
            let store = store.lock().await;
            if json {
                println!("{}", serde_json::to_string_pretty(store.records())?);
            } else {
                for record in store.records() {
                    println!(
                        "{}  {}  [{}]  {}",
                        record.identifier().unwrap_or("-"),
                        record
                            .timestamp
                            .map(|ts| ts.to_rfc3339())
                            .unwrap_or_default(),
                        record.mood,
                        record.title.as_deref().unwrap_or("")
                    );
                }
            }
        }
        Commands::Add { title, body, mood } => {
            let record = Record::new(title, body, Mood::from(mood));
            {
                let mut store = store.lock().await;
                store.upsert(record.clone());
                store.commit()?;
            }
            controller.push(&record).await?;
            println!("{}", record.identifier().unwrap_or_default());
        }
        Commands::Push { identifier } => {
            let record = store
                .lock()
                .await
                .get(&identifier)
                .cloned()
                .ok_or_else(|| format!("No local entry {identifier}"))?;
            controller.push(&record).await?;
        }
        Commands::Delete { identifier } => {
            let record = store
                .lock()
                .await
                .get(&identifier)
                .cloned()
                .ok_or_else(|| format!("No local entry {identifier}"))?;
            controller.delete(&record).await?;

            let mut store = store.lock().await;
            store.remove(&identifier);
            store.commit()?;
        }
    }

    Ok(())
}
