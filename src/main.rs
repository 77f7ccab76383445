use clap::Parser;
use handcricket::application::engine::GameEngine;
use handcricket::config::GameConfig;
use handcricket::domain::ports::{RandomSourceBox, SessionStoreBox};
use handcricket::domain::session::PlayerId;
use handcricket::error::GameError;
use handcricket::infrastructure::in_memory::InMemorySessionStore;
use handcricket::infrastructure::local_ledger::LocalLedger;
use handcricket::infrastructure::random::StdRandomSource;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

/// Plays a hand-cricket game against an in-process ledger that settles the
/// entry fee instantly.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Moves to play in order (numbers 1-6)
    moves: Vec<String>,

    /// Player address
    #[arg(long, default_value = "DemoBatsman1111111111111111111111")]
    account: String,

    /// Seed for the computer opponent. Omit for entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to persistent session database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let account = PlayerId::parse(&cli.account).into_diagnostic()?;

    let sessions = open_store(cli.db_path.as_deref())?;
    let random: RandomSourceBox = match cli.seed {
        Some(seed) => Box::new(StdRandomSource::seeded(seed)),
        None => Box::new(StdRandomSource::from_entropy()),
    };

    let ledger = LocalLedger::auto_settling();
    let engine = GameEngine::new(
        GameConfig::default(),
        sessions,
        Box::new(ledger.clone()),
        Box::new(ledger),
        random,
    );

    match engine.start(&account).await {
        Ok(receipt) => {
            println!("{}", receipt.message);
            let fee = &receipt.transfer_request;
            println!("Entry fee transfer: {} -> {} ({})", fee.from, fee.to, fee.amount);
        }
        // A persisted session from a previous run is still open.
        Err(GameError::GameAlreadyInProgress) => println!("Resuming game in progress."),
        Err(e) => return Err(e).into_diagnostic(),
    }

    for mv in &cli.moves {
        let reply = engine.play(&account, mv).await.into_diagnostic()?;
        println!("{}", reply.outcome_message);
        if reply.game_over {
            if let Some(transfer) = reply.transfer_request {
                println!(
                    "Payout transfer: {} -> {} ({})",
                    transfer.from, transfer.to, transfer.amount
                );
            }
            return Ok(());
        }
    }

    println!("Innings still open. Play more moves to finish the game.");
    Ok(())
}

fn open_store(db_path: Option<&Path>) -> Result<SessionStoreBox> {
    #[cfg(feature = "storage-rocksdb")]
    if let Some(path) = db_path {
        let store = handcricket::infrastructure::rocksdb::RocksDbSessionStore::open(path)
            .into_diagnostic()?;
        return Ok(Box::new(store));
    }

    #[cfg(not(feature = "storage-rocksdb"))]
    if db_path.is_some() {
        tracing::warn!("--db-path ignored: built without the storage-rocksdb feature");
    }

    Ok(Box::new(InMemorySessionStore::new()))
}
