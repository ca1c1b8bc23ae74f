use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY: &str = ":memory:";

/// Applied to every connection the pool opens.
///
/// Writers wait on each other through `busy_timeout` instead of failing with
/// `database is locked`, and WAL lets readers proceed during a write.
#[derive(Debug, Clone, Copy)]
pub struct SqliteConnectionOptions {
    pub busy_timeout_ms: u32,
    pub wal: bool,
}

impl Default for SqliteConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
            wal: true,
        }
    }
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        // busy_timeout first so switching journal mode also waits on locks
        let mut pragmas = format!("PRAGMA busy_timeout = {};", self.busy_timeout_ms);
        if self.wal {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }

        conn.batch_execute(&pragmas).map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the SQLite database at `database_path` and make sure
    /// the contents table exists.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);

        // Every connection to ":memory:" is its own database, so keep exactly one alive.
        let builder = if database_path == IN_MEMORY {
            r2d2::Pool::builder()
                .max_size(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connection_customizer(Box::new(SqliteConnectionOptions {
                    wal: false,
                    ..SqliteConnectionOptions::default()
                }))
        } else {
            r2d2::Pool::builder().connection_customizer(Box::new(SqliteConnectionOptions::default()))
        };

        let pool = builder
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(format!("Failed to create SQLite connection pool: {}", e)))?;

        let database = Database { pool };
        database.initialize()?;

        info!(path = database_path, "SQLite database ready");
        Ok(database)
    }

    pub fn initialize(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        diesel::sql_query(CREATE_CONTENTS_TABLE)
            .execute(&mut conn)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(())
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
