//! SQLite connection pool for drafts, clients and profiles.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// How long a writer waits on a locked database before failing. Draft
/// autosaves from several tabs of one user can overlap.
const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Pragmas run on every pooled connection.
#[derive(Debug)]
struct SqlitePragmas {
    busy_timeout: Duration,
}

impl SqlitePragmas {
    fn statements(&self) -> String {
        format!(
            "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        )
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.statements())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout: BUSY_TIMEOUT,
        }))
        .build(manager)
}
