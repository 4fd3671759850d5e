//! Cook repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `cooks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the payload before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `list_cooks` is ordered by `last_cooked ASC, id ASC`.

use crate::db::DbError;
use crate::model::cook::{Cook, CookValidationError, NewCook};
use crate::model::record::{EpochMillis, RecordId, TimestampOutOfRange};
use crate::model::sleep_night::SleepValidationError;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const COOK_SELECT_SQL: &str = "SELECT id, name, last_cooked FROM cooks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all record stores.
#[derive(Debug)]
pub enum RepoError {
    Validation(String),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<CookValidationError> for RepoError {
    fn from(value: CookValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<SleepValidationError> for RepoError {
    fn from(value: SleepValidationError) -> Self {
        Self::Validation(value.to_string())
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

impl From<TimestampOutOfRange> for RepoError {
    fn from(value: TimestampOutOfRange) -> Self {
        Self::Validation(value.to_string())
    }
}

/// Repository interface for cooking reminders.
pub trait CookRepository {
    fn insert_cook(&self, cook: &NewCook) -> RepoResult<RecordId>;
    fn update_cook(&self, cook: &Cook) -> RepoResult<()>;
    fn delete_cook(&self, id: RecordId) -> RepoResult<()>;
    fn get_cook(&self, id: RecordId) -> RepoResult<Option<Cook>>;
    fn find_by_last_cooked(&self, last_cooked: EpochMillis) -> RepoResult<Option<Cook>>;
    fn list_cooks(&self) -> RepoResult<Vec<Cook>>;
    /// Removes every cook; returns the number of deleted rows.
    fn delete_all(&self) -> RepoResult<usize>;
}

/// SQLite-backed cook repository.
pub struct SqliteCookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCookRepository<'conn> {
    /// Expects a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CookRepository for SqliteCookRepository<'_> {
    fn insert_cook(&self, cook: &NewCook) -> RepoResult<RecordId> {
        cook.validate()?;
        let last_cooked = i64::try_from(cook.last_cooked)?;

        self.conn.execute(
            "INSERT INTO cooks (name, last_cooked) VALUES (?1, ?2);",
            params![cook.name.as_str(), last_cooked],
        )?;

        Ok(RecordId(self.conn.last_insert_rowid()))
    }

    fn update_cook(&self, cook: &Cook) -> RepoResult<()> {
        cook.validate()?;
        let last_cooked = i64::try_from(cook.last_cooked)?;

        let changed = self.conn.execute(
            "UPDATE cooks SET name = ?1, last_cooked = ?2 WHERE id = ?3;",
            params![cook.name.as_str(), last_cooked, cook.id.0],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(cook.id));
        }

        Ok(())
    }

    fn delete_cook(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM cooks WHERE id = ?1;", [id.0])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_cook(&self, id: RecordId) -> RepoResult<Option<Cook>> {
        let row = self
            .conn
            .query_row(
                &format!("{COOK_SELECT_SQL} WHERE id = ?1;"),
                [id.0],
                read_cook_row,
            )
            .optional()?;

        row.map(parse_cook_row).transpose()
    }

    fn find_by_last_cooked(&self, last_cooked: EpochMillis) -> RepoResult<Option<Cook>> {
        // Nothing past i64::MAX can have been stored.
        let Ok(last_cooked) = i64::try_from(last_cooked) else {
            return Ok(None);
        };
        let row = self
            .conn
            .query_row(
                &format!("{COOK_SELECT_SQL} WHERE last_cooked = ?1 ORDER BY id ASC LIMIT 1;"),
                [last_cooked],
                read_cook_row,
            )
            .optional()?;

        row.map(parse_cook_row).transpose()
    }

    fn list_cooks(&self) -> RepoResult<Vec<Cook>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COOK_SELECT_SQL} ORDER BY last_cooked ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut cooks = Vec::new();

        while let Some(row) = rows.next()? {
            cooks.push(parse_cook_row(read_cook_row(row)?)?);
        }

        Ok(cooks)
    }

    fn delete_all(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM cooks;", [])?)
    }
}

type RawCookRow = (i64, String, i64);

fn read_cook_row(row: &Row<'_>) -> rusqlite::Result<RawCookRow> {
    Ok((row.get("id")?, row.get("name")?, row.get("last_cooked")?))
}

fn parse_cook_row((id, name, last_cooked): RawCookRow) -> RepoResult<Cook> {
    let last_cooked = EpochMillis::try_from(last_cooked).map_err(|err| {
        RepoError::InvalidData(format!("cooks.last_cooked for id {id}: {err}"))
    })?;

    let cook = Cook {
        id: RecordId(id),
        name,
        last_cooked,
    };
    cook.validate()
        .map_err(|err| RepoError::InvalidData(format!("cooks.name for id {id}: {err}")))?;
    Ok(cook)
}
