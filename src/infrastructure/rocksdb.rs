use crate::domain::ports::SessionStore;
use crate::domain::session::{PlayerId, PlayerSession};
use crate::error::{GameError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for storing player sessions.
pub const CF_SESSIONS: &str = "sessions";

/// A persistent session store using RocksDB.
///
/// Keeps paid sessions across restarts so a process bounce does not forfeit a
/// confirmed entry fee. Sessions are stored as JSON values keyed by the
/// player address.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbSessionStore {
    db: Arc<DB>,
}

impl RocksDbSessionStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the sessions column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_sessions = ColumnFamilyDescriptor::new(CF_SESSIONS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_sessions])
            .map_err(|e| GameError::InternalError(Box::new(e)))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_SESSIONS).ok_or_else(|| {
            GameError::InternalError(Box::new(std::io::Error::other(
                "sessions column family not found",
            )))
        })
    }
}

#[async_trait]
impl SessionStore for RocksDbSessionStore {
    async fn get(&self, player: &PlayerId) -> Result<Option<PlayerSession>> {
        let cf = self.cf()?;
        let result = self
            .db
            .get_cf(&cf, player.as_str())
            .map_err(|e| GameError::InternalError(Box::new(e)))?;

        match result {
            Some(bytes) => {
                let session = serde_json::from_slice(&bytes)
                    .map_err(|e| GameError::InternalError(Box::new(e)))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, session: PlayerSession) -> Result<()> {
        let cf = self.cf()?;
        let value = serde_json::to_vec(&session)
            .map_err(|e| GameError::InternalError(Box::new(e)))?;
        self.db
            .put_cf(&cf, session.player.as_str(), value)
            .map_err(|e| GameError::InternalError(Box::new(e)))?;
        Ok(())
    }

    async fn remove(&self, player: &PlayerId) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .delete_cf(&cf, player.as_str())
            .map_err(|e| GameError::InternalError(Box::new(e)))?;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<PlayerSession>> {
        let cf = self.cf()?;
        let mut sessions = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item.map_err(|e| GameError::InternalError(Box::new(e)))?;
            let session: PlayerSession = serde_json::from_slice(&value)
                .map_err(|e| GameError::InternalError(Box::new(e)))?;
            sessions.push(session);
        }
        Ok(sessions)
    }
}
