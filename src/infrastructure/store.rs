//! # SQLite Event Store
//!
//! Implements the `EventStore` trait on top of an `sqlx` SQLite pool.
//! Every write runs in its own transaction; a failed statement rolls the transaction back
//! and hands the original error to the caller.

use crate::domain::config::DatabaseConfig;
use crate::domain::errors::StoreError;
use crate::domain::traits::EventStore;
use crate::domain::types::{Event, EventColumn, EventId, NewEvent, NewRsvp, Rsvp, RsvpStatus};
use crate::strings::logs;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{AssertSqlSafe, Sqlite, Transaction};
use std::str::FromStr;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        location TEXT NOT NULL,
        event_date TEXT NOT NULL,
        event_time TEXT NOT NULL,
        creator TEXT NOT NULL,
        creator_id TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS rsvps (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_id INTEGER NOT NULL,
        username TEXT NOT NULL,
        user_id TEXT NOT NULL,
        status TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS rsvps_event_user ON rsvps (event_id, user_id)",
];

const EVENT_COLUMNS: &str =
    "id, name, description, location, event_date, event_time, creator, creator_id";
const RSVP_COLUMNS: &str = "id, event_id, username, user_id, status";

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database named by the config and ensure the schema.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;
        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    /// Private in-memory database. Pinned to one connection, since every
    /// SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    async fn bootstrap(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

/// Roll back after a failed statement, returning the statement's error.
async fn abort(tx: Transaction<'static, Sqlite>, err: StoreError) -> StoreError {
    if let Err(rollback) = tx.rollback().await {
        tracing::warn!("{}", logs::rollback_failed(&err.to_string(), &rollback.to_string()));
    }
    err
}

/// A row whose text no longer decodes (e.g. an unknown rsvp status) is corrupt, not a
/// connectivity problem.
fn decode_failure(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { index, source } => {
            StoreError::Corrupt(format!("column {index}: {source}"))
        }
        other => StoreError::Database(other),
    }
}

/// Unicode-aware, case-insensitive substring test on event names.
fn name_matches(name: &str, folded_fragment: &str) -> bool {
    name.to_lowercase().contains(folded_fragment)
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn create_event(&self, event: NewEvent) -> Result<Event, StoreError> {
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            "INSERT INTO events (name, description, location, event_date, event_time, creator, creator_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(&event.location)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.creator)
        .bind(&event.creator_id)
        .execute(&mut *tx)
        .await;

        let done = match inserted {
            Ok(done) => done,
            Err(e) => return Err(abort(tx, e.into()).await),
        };
        tx.commit().await?;

        Ok(Event {
            id: done.last_insert_rowid(),
            name: event.name,
            description: event.description,
            location: event.location,
            date: event.date,
            time: event.time,
            creator: event.creator,
            creator_id: event.creator_id,
        })
    }

    async fn get_event(&self, id: EventId) -> Result<Event, StoreError> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
        sqlx::query_as::<_, Event>(AssertSqlSafe(sql))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(decode_failure)?
            .ok_or(StoreError::NotFound)
    }

    async fn find_events_by_name(&self, fragment: &str) -> Result<Vec<Event>, StoreError> {
        // SQLite's LIKE only folds ASCII, so matching happens here.
        let folded = fragment.to_lowercase();
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id");
        let events = sqlx::query_as::<_, Event>(AssertSqlSafe(sql))
            .fetch_all(&self.pool)
            .await
            .map_err(decode_failure)?;
        Ok(events
            .into_iter()
            .filter(|event| name_matches(&event.name, &folded))
            .collect())
    }

    async fn update_event_field(
        &self,
        id: EventId,
        column: EventColumn,
        value: &str,
    ) -> Result<(), StoreError> {
        // The column name comes from a closed enum, never from user input.
        let statement = format!("UPDATE events SET {} = ? WHERE id = ?", column.column_name());

        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query(AssertSqlSafe(statement))
            .bind(value)
            .bind(id)
            .execute(&mut *tx)
            .await;

        match updated {
            Ok(done) if done.rows_affected() == 0 => Err(abort(tx, StoreError::NotFound).await),
            Ok(_) => Ok(tx.commit().await?),
            Err(e) => Err(abort(tx, e.into()).await),
        }
    }

    async fn delete_event(&self, id: EventId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        if let Err(e) = sqlx::query("DELETE FROM rsvps WHERE event_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
        {
            return Err(abort(tx, e.into()).await);
        }

        let deleted = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await;

        match deleted {
            Ok(done) if done.rows_affected() == 0 => Err(abort(tx, StoreError::NotFound).await),
            Ok(_) => Ok(tx.commit().await?),
            Err(e) => Err(abort(tx, e.into()).await),
        }
    }

    async fn responses_for_event(&self, event_id: EventId) -> Result<Vec<Rsvp>, StoreError> {
        let sql = format!("SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = ? ORDER BY id");
        sqlx::query_as::<_, Rsvp>(AssertSqlSafe(sql))
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(decode_failure)
    }

    async fn find_response(
        &self,
        event_id: EventId,
        user_id: &str,
    ) -> Result<Option<Rsvp>, StoreError> {
        let sql = format!(
            "SELECT {RSVP_COLUMNS} FROM rsvps WHERE event_id = ? AND user_id = ? ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Rsvp>(AssertSqlSafe(sql))
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(decode_failure)
    }

    async fn create_response(&self, rsvp: NewRsvp) -> Result<Rsvp, StoreError> {
        let mut tx = self.pool.begin().await?;
        let inserted = sqlx::query(
            "INSERT INTO rsvps (event_id, username, user_id, status) VALUES (?, ?, ?, ?)",
        )
        .bind(rsvp.event_id)
        .bind(&rsvp.username)
        .bind(&rsvp.user_id)
        .bind(rsvp.status)
        .execute(&mut *tx)
        .await;

        let done = match inserted {
            Ok(done) => done,
            Err(e) => return Err(abort(tx, e.into()).await),
        };
        tx.commit().await?;

        Ok(Rsvp {
            id: done.last_insert_rowid(),
            event_id: rsvp.event_id,
            username: rsvp.username,
            user_id: rsvp.user_id,
            status: rsvp.status,
        })
    }

    async fn update_response_status(&self, id: i64, status: RsvpStatus) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query("UPDATE rsvps SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&mut *tx)
            .await;

        match updated {
            Ok(done) if done.rows_affected() == 0 => Err(abort(tx, StoreError::NotFound).await),
            Ok(_) => Ok(tx.commit().await?),
            Err(e) => Err(abort(tx, e.into()).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_games() -> NewEvent {
        NewEvent {
            name: "Board Game Night".to_string(),
            description: "Bring a game".to_string(),
            location: "Community room".to_string(),
            date: "2024-05-01".to_string(),
            time: "19:00".to_string(),
            creator: "alice".to_string(),
            creator_id: "@alice:example.org".to_string(),
        }
    }

    fn named(name: &str) -> NewEvent {
        NewEvent {
            name: name.to_string(),
            ..board_games()
        }
    }

    fn going(event_id: EventId, user: &str) -> NewRsvp {
        NewRsvp {
            event_id,
            username: user.to_string(),
            user_id: format!("@{user}:example.org"),
            status: RsvpStatus::Going,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = SqliteStore::in_memory().await.unwrap();
        let first = store.create_event(board_games()).await.unwrap();
        let second = store.create_event(named("Picnic")).await.unwrap();
        assert!(second.id > first.id);

        let fetched = store.get_event(first.id).await.unwrap();
        assert_eq!(fetched, first);
        assert_eq!(fetched.description, "Bring a game");
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(matches!(store.get_event(42).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_name_search_is_case_insensitive_substring() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.create_event(named("Board Game Night")).await.unwrap();
        store.create_event(named("Video game marathon")).await.unwrap();
        store.create_event(named("Picnic")).await.unwrap();

        let found = store.find_events_by_name("GAME").await.unwrap();
        let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Board Game Night", "Video game marathon"]);

        assert!(store.find_events_by_name("concert").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_name_search_treats_wildcards_literally() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.create_event(named("100% fun")).await.unwrap();
        store.create_event(named("1000 fun")).await.unwrap();

        let found = store.find_events_by_name("0%").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "100% fun");
        assert!(store.find_events_by_name("_").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_field_touches_only_that_column() {
        let store = SqliteStore::in_memory().await.unwrap();
        let event = store.create_event(board_games()).await.unwrap();

        store
            .update_event_field(event.id, EventColumn::Location, "Library")
            .await
            .unwrap();
        store
            .update_event_field(event.id, EventColumn::Time, "20:00")
            .await
            .unwrap();

        let fetched = store.get_event(event.id).await.unwrap();
        assert_eq!(fetched.location, "Library");
        assert_eq!(fetched.time, "20:00");
        assert_eq!(fetched.date, "2024-05-01");
        assert_eq!(fetched.name, "Board Game Night");
    }

    #[tokio::test]
    async fn test_update_missing_event_is_not_found() {
        let store = SqliteStore::in_memory().await.unwrap();
        let result = store.update_event_field(7, EventColumn::Date, "tomorrow").await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_removes_event_and_its_responses() {
        let store = SqliteStore::in_memory().await.unwrap();
        let event = store.create_event(board_games()).await.unwrap();
        let other = store.create_event(named("Picnic")).await.unwrap();
        store.create_response(going(event.id, "bob")).await.unwrap();
        store.create_response(going(other.id, "bob")).await.unwrap();

        store.delete_event(event.id).await.unwrap();

        assert!(matches!(store.get_event(event.id).await, Err(StoreError::NotFound)));
        assert!(store.responses_for_event(event.id).await.unwrap().is_empty());
        assert_eq!(store.responses_for_event(other.id).await.unwrap().len(), 1);
        assert!(matches!(store.delete_event(event.id).await, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_responses_round_trip() {
        let store = SqliteStore::in_memory().await.unwrap();
        let event = store.create_event(board_games()).await.unwrap();

        let bob = store.create_response(going(event.id, "bob")).await.unwrap();
        assert_eq!(
            store.find_response(event.id, "@bob:example.org").await.unwrap(),
            Some(bob.clone())
        );
        assert_eq!(store.find_response(event.id, "@carol:example.org").await.unwrap(), None);

        store
            .update_response_status(bob.id, RsvpStatus::NotGoing)
            .await
            .unwrap();
        let responses = store.responses_for_event(event.id).await.unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].status, RsvpStatus::NotGoing);
    }

    #[tokio::test]
    async fn test_corrupt_status_is_reported() {
        let store = SqliteStore::in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO rsvps (event_id, username, user_id, status) VALUES (1, 'x', 'x', 'Sure')",
        )
        .execute(&store.pool)
        .await
        .unwrap();
        assert!(matches!(
            store.responses_for_event(1).await,
            Err(StoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("events.db").display()),
            max_connections: 2,
        };

        let id = {
            let store = SqliteStore::connect(&config).await.unwrap();
            store.create_event(board_games()).await.unwrap().id
        };

        let reopened = SqliteStore::connect(&config).await.unwrap();
        assert_eq!(reopened.get_event(id).await.unwrap().name, "Board Game Night");
    }

    #[tokio::test]
    async fn test_name_search_folds_non_ascii_case() {
        let store = SqliteStore::in_memory().await.unwrap();
        let fest = store.create_event(named("Ölfest Über Alles")).await.unwrap();
        let cafe = store.create_event(named("Café Night")).await.unwrap();

        for (fragment, expected) in [("ÖLFEST", &fest), ("über", &fest), ("CAFÉ", &cafe)] {
            let found = store.find_events_by_name(fragment).await.unwrap();
            assert_eq!(found, vec![expected.clone()], "searching {fragment}");
        }
    }

    #[tokio::test]
    async fn test_failed_delete_rolls_back_earlier_statements() {
        let store = SqliteStore::in_memory().await.unwrap();
        // Responses for an event id that has no row: the second DELETE affects nothing.
        store.create_response(going(99, "bob")).await.unwrap();
        store.create_response(going(99, "carol")).await.unwrap();

        assert!(matches!(store.delete_event(99).await, Err(StoreError::NotFound)));
        assert_eq!(store.responses_for_event(99).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_database_error_mid_transaction_commits_nothing() {
        let store = SqliteStore::in_memory().await.unwrap();
        let event = store.create_event(board_games()).await.unwrap();
        store.create_response(going(event.id, "bob")).await.unwrap();
        sqlx::query("DROP TABLE events")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.delete_event(event.id).await;

        assert!(matches!(result, Err(StoreError::Database(_))));
        assert_eq!(store.responses_for_event(event.id).await.unwrap().len(), 1);
    }
}
