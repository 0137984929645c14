//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full todo collection as one serialized snapshot under a
//!   fixed slot key.
//! - Recover from missing or malformed persisted data by yielding an empty
//!   collection.
//!
//! # Invariants
//! - Writes are whole-snapshot, last-writer-wins; there is no merge.
//! - A malformed stored value never propagates past `load`.

use crate::db::{migrations::latest_version, DbError};
use crate::model::todo::Todo;
use log::warn;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed, versioned slot key for the todo snapshot. The version lives in
/// the key name; the payload itself carries no schema marker.
pub const SNAPSHOT_KEY: &str = "todos-dayplan-v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage adapter error for snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Persistence contract for the todo snapshot.
pub trait SnapshotRepository {
    /// Reads the stored collection. Missing or malformed data yields an
    /// empty collection; only transport failures surface as errors.
    fn load(&self) -> RepoResult<Vec<Todo>>;

    /// Overwrites the stored collection with `todos`, in order.
    fn save(&self, todos: &[Todo]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository over a bootstrapped connection.
    ///
    /// # Errors
    /// - `RepoError::UninitializedConnection` when the connection's schema
    ///   version does not match this binary's latest migration, which means
    ///   it was not opened through `db::open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> RepoResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM slots WHERE key = ?1;")?;
        let mut rows = stmt.query([SNAPSHOT_KEY])?;

        let Some(row) = rows.next()? else {
            return Ok(Vec::new());
        };
        let raw: String = row.get(0)?;

        match serde_json::from_str::<Vec<Todo>>(&raw) {
            Ok(todos) => Ok(todos),
            Err(err) => {
                warn!(
                    "event=snapshot_load module=repo status=recovered key={SNAPSHOT_KEY} error={err}"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, todos: &[Todo]) -> RepoResult<()> {
        let payload = serde_json::to_string(todos)?;
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![SNAPSHOT_KEY, payload],
        )?;
        Ok(())
    }
}
