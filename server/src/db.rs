use diesel::connection::{Instrumentation, InstrumentationEvent, SimpleConnection};
use diesel::prelude::*;
use diesel::define_sql_function;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Error, Debug)]
pub enum PoolSetupError {
    #[error("Failed to create database pool: {0}")]
    Pool(#[from] r2d2::PoolError),

    #[error("Failed to run database migrations: {0}")]
    Migrations(String),
}

/// Per-connection setup applied whenever the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    echo: bool,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        prepare_connection(conn, self.echo).map_err(r2d2::Error::QueryError)
    }
}

define_sql_function! {
    /// Unicode lowercase. SQLite's own `lower` and `LIKE` only fold ASCII.
    fn unicode_lower(text: Text) -> Text;
}

/// SQLite leaves foreign keys off unless asked, per connection.
fn prepare_connection(conn: &mut SqliteConnection, echo: bool) -> QueryResult<()> {
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")?;
    unicode_lower_utils::register_impl(conn, |text: String| text.to_lowercase())?;
    if echo {
        conn.set_instrumentation(SqlEcho);
    }
    Ok(())
}

/// Logs every statement at debug level under the `sql` target.
struct SqlEcho;

impl Instrumentation for SqlEcho {
    fn on_connection_event(&mut self, event: InstrumentationEvent<'_>) {
        if let InstrumentationEvent::StartQuery { query, .. } = event {
            tracing::debug!(target: "sql", "{}", query);
        }
    }
}

pub fn create_pool(
    database_url: &str,
    max_size: u32,
    echo: bool,
) -> Result<DbPool, PoolSetupError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let mut builder = r2d2::Pool::builder()
        .max_size(max_size.max(1))
        .connection_customizer(Box::new(ConnectionOptions { echo }));

    // Every `:memory:` connection is its own database, so keep exactly one alive.
    if database_url == ":memory:" {
        builder = builder.max_size(1).idle_timeout(None).max_lifetime(None);
    }

    let pool = builder.build(manager)?;

    // Run pending migrations on startup
    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PoolSetupError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PoolSetupError::Migrations(e.to_string()))?;
    if !applied.is_empty() {
        tracing::info!(count = applied.len(), "applied database migrations");
    }
    Ok(())
}

/// Fresh in-memory database with the schema applied.
#[cfg(test)]
pub fn test_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    prepare_connection(&mut conn, false).unwrap();
    run_migrations(&mut conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::sql_types::Integer;

    #[derive(QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    #[test]
    fn pooled_connections_enforce_foreign_keys() {
        let pool = create_pool(":memory:", 4, false).unwrap();
        let mut conn = pool.get().unwrap();
        let row: Pragma = diesel::sql_query("PRAGMA foreign_keys")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(row.foreign_keys, 1);
    }

    #[test]
    fn unicode_lower_is_registered_on_pooled_connections() {
        let pool = create_pool(":memory:", 1, false).unwrap();
        let mut conn = pool.get().unwrap();
        let lowered: String = diesel::select(unicode_lower("БОРЩ Ünïcode"))
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(lowered, "борщ ünïcode");
    }

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = test_connection();
        run_migrations(&mut conn).unwrap();
    }
}
