//! Sleep night repository contracts and SQLite implementation.
//!
//! # Invariants
//! - New nights start in progress (`end_ms = start_ms`, quality `-1`).
//! - `latest_night` is the row with the highest id.
//! - `list_nights` is ordered by `id DESC`.

use crate::model::record::{EpochMillis, RecordId};
use crate::model::sleep_night::{SleepNight, SleepQuality};
use crate::repo::cook_repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const NIGHT_SELECT_SQL: &str = "SELECT id, start_ms, end_ms, quality FROM sleep_nights";

/// Repository interface for tracked nights.
pub trait SleepNightRepository {
    fn insert_night(&self, start: EpochMillis) -> RepoResult<RecordId>;
    fn update_night(&self, night: &SleepNight) -> RepoResult<()>;
    fn get_night(&self, id: RecordId) -> RepoResult<Option<SleepNight>>;
    fn latest_night(&self) -> RepoResult<Option<SleepNight>>;
    fn list_nights(&self) -> RepoResult<Vec<SleepNight>>;
    /// Removes every night; returns the number of deleted rows.
    fn clear(&self) -> RepoResult<usize>;
}

/// SQLite-backed sleep night repository.
pub struct SqliteSleepNightRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSleepNightRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_one(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Option<SleepNight>> {
        let row = self
            .conn
            .query_row(sql, params, read_night_row)
            .optional()?;
        row.map(parse_night_row).transpose()
    }
}

impl SleepNightRepository for SqliteSleepNightRepository<'_> {
    fn insert_night(&self, start: EpochMillis) -> RepoResult<RecordId> {
        let start = i64::try_from(start)?;
        self.conn.execute(
            "INSERT INTO sleep_nights (start_ms, end_ms, quality) VALUES (?1, ?1, ?2);",
            params![start, SleepQuality::UNRATED.value()],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid()))
    }

    fn update_night(&self, night: &SleepNight) -> RepoResult<()> {
        night.validate()?;
        let start = i64::try_from(night.start)?;
        let end = i64::try_from(night.end)?;

        let changed = self.conn.execute(
            "UPDATE sleep_nights SET start_ms = ?1, end_ms = ?2, quality = ?3 WHERE id = ?4;",
            params![start, end, night.quality.value(), night.id.0],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(night.id));
        }

        Ok(())
    }

    fn get_night(&self, id: RecordId) -> RepoResult<Option<SleepNight>> {
        self.query_one(&format!("{NIGHT_SELECT_SQL} WHERE id = ?1;"), [id.0])
    }

    fn latest_night(&self) -> RepoResult<Option<SleepNight>> {
        self.query_one(&format!("{NIGHT_SELECT_SQL} ORDER BY id DESC LIMIT 1;"), [])
    }

    fn list_nights(&self) -> RepoResult<Vec<SleepNight>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NIGHT_SELECT_SQL} ORDER BY id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut nights = Vec::new();

        while let Some(row) = rows.next()? {
            nights.push(parse_night_row(read_night_row(row)?)?);
        }

        Ok(nights)
    }

    fn clear(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM sleep_nights;", [])?)
    }
}

type RawNightRow = (i64, i64, i64, i64);

fn read_night_row(row: &Row<'_>) -> rusqlite::Result<RawNightRow> {
    Ok((
        row.get("id")?,
        row.get("start_ms")?,
        row.get("end_ms")?,
        row.get("quality")?,
    ))
}

fn parse_night_row((id, start, end, quality): RawNightRow) -> RepoResult<SleepNight> {
    let invalid = |column: &str, err: &dyn std::fmt::Display| {
        RepoError::InvalidData(format!("sleep_nights.{column} for id {id}: {err}"))
    };

    let night = SleepNight {
        id: RecordId(id),
        start: EpochMillis::try_from(start).map_err(|err| invalid("start_ms", &err))?,
        end: EpochMillis::try_from(end).map_err(|err| invalid("end_ms", &err))?,
        quality: SleepQuality::new(quality).map_err(|err| invalid("quality", &err))?,
    };
    night.validate().map_err(|err| invalid("end_ms", &err))?;
    Ok(night)
}
