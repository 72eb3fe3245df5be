//! # Table Initializer
//!
//! Creates the `people` table on startup. Safe to run any number of times:
//! an existing table is left exactly as it is.

use crate::db::PeopleStore;
use crate::error::PeopleResult;
use tracing::info;

/// Name of the only table this service owns
pub const PEOPLE_TABLE: &str = "people";

const CREATE_PEOPLE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS people (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER,
    sex CHAR(1) CHECK (sex IN ('F', 'M')),
    occupation TEXT
)";

/// Ensures the `people` table exists with its declared columns and check
/// constraint
pub async fn ensure_people_table(store: &PeopleStore) -> PeopleResult<()> {
    store
        .execute_batch(CREATE_PEOPLE_TABLE_SQL.to_string())
        .await?;
    info!("✨ Table '{}' is ready", PEOPLE_TABLE);
    Ok(())
}
