//! # Database Module (Record Store)
//!
//! Owns the SQLite connection and maps every Person operation onto exactly
//! one parameterized statement. No caching and no multi-statement
//! transactions: the table is the only source of truth.

use crate::error::{PeopleError, PeopleResult};
use crate::model::{Person, PersonFields};
use rusqlite::functions::FunctionFlags;
use rusqlite::params;
use std::path::Path;
use tokio_rusqlite::Connection;
use tracing::{debug, info};
use uuid::Uuid;

/// SQL function used by search to lower-case beyond ASCII
const UNICODE_LOWER_FN: &str = "unicode_lower";

const SELECT_ALL_SQL: &str = "SELECT id, name, age, sex, occupation FROM people";

const SELECT_SEARCH_SQL: &str = "SELECT id, name, age, sex, occupation FROM people
     WHERE instr(unicode_lower(name), unicode_lower(?1)) > 0";

const INSERT_SQL: &str = "INSERT INTO people (id, name, age, sex, occupation)
     VALUES (?1, ?2, ?3, ?4, ?5)";

const UPDATE_SQL: &str = "UPDATE people
     SET name = ?1, age = ?2, sex = ?3, occupation = ?4
     WHERE id = ?5";

const DELETE_SQL: &str = "DELETE FROM people WHERE id = ?1";

/// The record store: manages the database connection and the `people` statements
pub struct PeopleStore {
    conn: Connection,
}

impl PeopleStore {
    /// Opens (or creates) the SQLite database file at `path`
    pub async fn new<P: AsRef<Path>>(path: P) -> PeopleResult<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        info!("Opening people database at: {}", path_str);

        let conn = Connection::open(&path_str)
            .await
            .map_err(|e| PeopleError::Storage(format!("Failed to open database: {}", e)))?;

        Self::configure_connection(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (useful for testing)
    pub async fn in_memory() -> PeopleResult<Self> {
        info!("Opening in-memory people database");

        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| PeopleError::Storage(format!("Failed to create database: {}", e)))?;

        Self::configure_connection(&conn).await?;

        Ok(Self { conn })
    }

    /// Applies pragmas and registers the search helper function
    async fn configure_connection(conn: &Connection) -> PeopleResult<()> {
        debug!("Configuring database connection...");

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode=WAL;
                 PRAGMA synchronous=NORMAL;",
            )?;
            conn.create_scalar_function(
                UNICODE_LOWER_FN,
                1,
                FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
                |ctx| {
                    let text: Option<String> = ctx.get(0)?;
                    Ok(text.map(|t| t.to_lowercase()))
                },
            )?;
            Ok(())
        })
        .await
        .map_err(|e| PeopleError::Storage(format!("Failed to configure connection: {}", e)))?;

        Ok(())
    }

    /// Get the connection
    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute batch SQL
    pub async fn execute_batch(&self, sql: String) -> PeopleResult<()> {
        self.conn
            .call(move |conn| {
                conn.execute_batch(&sql)?;
                Ok(())
            })
            .await
            .map_err(|e| PeopleError::Storage(format!("Batch execution failed: {}", e)))
    }

    /// Lists every person, or only those whose name contains `search`
    /// (case-insensitive). An empty search term is the same as none.
    pub async fn list(&self, search: Option<String>) -> PeopleResult<Vec<Person>> {
        let search = search.filter(|term| !term.is_empty());
        debug!("Listing people (search: {:?})", search);

        self.conn
            .call(move |conn| {
                let people = match search {
                    Some(term) => {
                        let mut stmt = conn.prepare(SELECT_SEARCH_SQL)?;
                        let rows = stmt
                            .query_map(params![term], Person::from_row)?
                            .collect::<Result<Vec<_>, _>>()?;
                        rows
                    }
                    None => {
                        let mut stmt = conn.prepare(SELECT_ALL_SQL)?;
                        let rows = stmt
                            .query_map([], Person::from_row)?
                            .collect::<Result<Vec<_>, _>>()?;
                        rows
                    }
                };
                Ok(people)
            })
            .await
            .map_err(|e| PeopleError::Storage(format!("Query failed: {}", e)))
    }

    /// Inserts a new row under a freshly generated id and returns that id.
    /// `fields.sex` must already be normalized.
    pub async fn create(&self, fields: PersonFields) -> PeopleResult<String> {
        let id = Uuid::new_v4().to_string();
        let row_id = id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    INSERT_SQL,
                    params![row_id, fields.name, fields.age, fields.sex, fields.occupation],
                )?;
                Ok(())
            })
            .await
            .map_err(|e| PeopleError::Storage(format!("Insert failed: {}", e)))?;

        Ok(id)
    }

    /// Overwrites all four mutable columns of the row matching `id`.
    /// Returns the number of rows touched; zero is not an error.
    pub async fn update(&self, id: String, fields: PersonFields) -> PeopleResult<u64> {
        self.conn
            .call(move |conn| {
                let affected = conn.execute(
                    UPDATE_SQL,
                    params![fields.name, fields.age, fields.sex, fields.occupation, id],
                )?;
                Ok(affected as u64)
            })
            .await
            .map_err(|e| PeopleError::Storage(format!("Update failed: {}", e)))
    }

    /// Hard-deletes the row matching `id`. Zero rows affected is not an error.
    pub async fn delete(&self, id: String) -> PeopleResult<u64> {
        self.conn
            .call(move |conn| {
                let affected = conn.execute(DELETE_SQL, params![id])?;
                Ok(affected as u64)
            })
            .await
            .map_err(|e| PeopleError::Storage(format!("Delete failed: {}", e)))
    }
}
