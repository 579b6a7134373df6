use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use jp_core::{CivilDate, Category, ContentRecord, DayRecord, DayStatus, build_timeline};

use crate::error::{Result, StoreError};
use crate::schema;

/// The external data service as the journey screens see it: a keyed lookup of
/// day timelines plus the content catalog.
pub trait DataService {
    /// Days for one user, ordered by day number.
    fn fetch_days(&self, user_id: &str) -> Result<Vec<DayRecord>>;

    fn fetch_content(&self) -> Result<Vec<ContentRecord>>;
}

/// Where a user's journey begins and how long it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JourneyPlan {
    pub start: CivilDate,
    pub length: u32,
}

/// SQLite-backed [`DataService`].
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        tracing::debug!("opened store at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM metadata WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        set_metadata_on(&self.conn, key, value)
    }

    // --- Journey plans ---

    pub fn plan(&self, user_id: &str) -> Result<Option<JourneyPlan>> {
        let Some(start) = self.get_metadata(&format!("journey_start:{user_id}"))? else {
            return Ok(None);
        };
        let start: CivilDate = start
            .parse()
            .map_err(|e| StoreError::InvalidData(format!("journey start for {user_id}: {e}")))?;
        let length = self
            .get_metadata(&format!("journey_length:{user_id}"))?
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| StoreError::InvalidData(format!("journey length for {user_id}")))?;
        Ok(Some(JourneyPlan { start, length }))
    }

    /// Begin (or restart) a user's journey. Existing logs on dates inside the
    /// new window are kept.
    pub fn start_journey(&self, user_id: &str, plan: JourneyPlan, today: CivilDate) -> Result<()> {
        let logs = self.logged_dates(user_id)?;
        let tx = self.conn.unchecked_transaction()?;
        set_metadata_on(&tx, &format!("journey_start:{user_id}"), &plan.start.to_string())?;
        set_metadata_on(&tx, &format!("journey_length:{user_id}"), &plan.length.to_string())?;
        tx.execute("DELETE FROM days WHERE user_id = ?1", [user_id])?;
        let days = build_timeline(user_id, plan.start, today, plan.length, &logs);
        for day in &days {
            upsert_day_on(&tx, user_id, day)?;
        }
        tx.commit()?;
        tracing::info!(
            "started {}-day journey for {user_id} on {}",
            plan.length,
            plan.start
        );
        Ok(())
    }

    /// Re-derive statuses for the current date. Days move from `Today` to
    /// `Missed` and from `Locked` to `Today` as the calendar advances.
    pub fn refresh(&self, user_id: &str, today: CivilDate) -> Result<Vec<DayRecord>> {
        let Some(plan) = self.plan(user_id)? else {
            return self.fetch_days(user_id);
        };
        let logs = self.logged_dates(user_id)?;
        let days = build_timeline(user_id, plan.start, today, plan.length, &logs);
        self.upsert_days(user_id, &days)?;
        Ok(days)
    }

    fn logged_dates(&self, user_id: &str) -> Result<HashMap<CivilDate, Option<String>>> {
        Ok(self
            .fetch_days(user_id)?
            .into_iter()
            .filter(|d| d.status == DayStatus::Logged)
            .map(|d| (d.date, d.photo_ref))
            .collect())
    }

    // --- Days ---

    pub fn upsert_days(&self, user_id: &str, days: &[DayRecord]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for day in days {
            upsert_day_on(&tx, user_id, day)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Mark the day on `date` as logged. Only the current day (status `Today`)
    /// or an already logged day can be logged. A repeat log replaces the photo
    /// when one is given and keeps the stored one otherwise.
    pub fn log_day(
        &self,
        user_id: &str,
        date: CivilDate,
        photo_ref: Option<&str>,
    ) -> Result<DayRecord> {
        let mut day = self
            .fetch_days(user_id)?
            .into_iter()
            .find(|d| d.date == date)
            .ok_or_else(|| {
                StoreError::InvalidData(format!("{user_id} has no journey day on {date}"))
            })?;

        match day.status {
            DayStatus::Today | DayStatus::Logged => {}
            other => {
                return Err(StoreError::InvalidData(format!(
                    "day {} is {} and cannot be logged",
                    day.day_number,
                    other.as_str()
                )));
            }
        }

        day.status = DayStatus::Logged;
        if let Some(photo_ref) = photo_ref {
            day.photo_ref = Some(photo_ref.to_string());
        }
        upsert_day_on(&self.conn, user_id, &day)?;
        tracing::info!("{user_id} logged day {}", day.day_number);
        Ok(day)
    }

    pub fn list_users(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT user_id FROM days ORDER BY user_id")?;
        let users = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;
        Ok(users)
    }

    // --- Content ---

    /// Insert or replace catalog items. Items without an id get a fresh one.
    pub fn upsert_content(&self, records: &[ContentRecord]) -> Result<Vec<String>> {
        let tx = self.conn.unchecked_transaction()?;
        let ids = upsert_content_on(&tx, records)?;
        tx.commit()?;
        Ok(ids)
    }
}

impl DataService for Store {
    fn fetch_days(&self, user_id: &str) -> Result<Vec<DayRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day_number, date, status, photo_ref
             FROM days WHERE user_id = ?1 ORDER BY day_number",
        )?;

        let rows: Vec<(String, u32, String, String, Option<String>)> = stmt
            .query_map([user_id], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                ))
            })?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(id, day_number, date, status, photo_ref)| {
                let date = date
                    .parse()
                    .map_err(|e| StoreError::InvalidData(format!("day {id}: {e}")))?;
                let status = DayStatus::parse(&status).ok_or_else(|| {
                    StoreError::InvalidData(format!("day {id}: unknown status {status:?}"))
                })?;
                Ok(DayRecord {
                    id,
                    day_number,
                    date,
                    status,
                    photo_ref,
                })
            })
            .collect()
    }

    fn fetch_content(&self) -> Result<Vec<ContentRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, category, tags FROM content ORDER BY rowid")?;

        let rows: Vec<(String, String, Option<String>, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))?
            .collect::<std::result::Result<_, _>>()?;

        rows.into_iter()
            .map(|(id, title, category, tags)| {
                let tags: Vec<String> = serde_json::from_str(&tags)
                    .map_err(|e| StoreError::InvalidData(format!("tags for {id}: {e}")))?;
                Ok(ContentRecord {
                    category: category.as_deref().map(category_from_str),
                    id,
                    title,
                    tags,
                })
            })
            .collect()
    }
}

fn set_metadata_on(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

pub(crate) fn delete_plan_on(conn: &Connection, user_id: &str) -> Result<()> {
    conn.execute(
        "DELETE FROM metadata WHERE key IN (?1, ?2)",
        params![
            format!("journey_start:{user_id}"),
            format!("journey_length:{user_id}")
        ],
    )?;
    Ok(())
}

pub(crate) fn upsert_day_on(conn: &Connection, user_id: &str, day: &DayRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO days (user_id, day_number, id, date, status, photo_ref)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            day.day_number,
            day.id,
            day.date.to_string(),
            day.status.as_str(),
            day.photo_ref,
        ],
    )?;
    Ok(())
}

pub(crate) fn upsert_content_on(
    conn: &Connection,
    records: &[ContentRecord],
) -> Result<Vec<String>> {
    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let id = if record.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            record.id.clone()
        };
        let category = record.category.map(category_to_str).transpose()?;
        let tags = serde_json::to_string(&record.tags)
            .map_err(|e| StoreError::InvalidData(format!("tags for {id}: {e}")))?;
        conn.execute(
            "INSERT OR REPLACE INTO content (id, title, category, tags) VALUES (?1, ?2, ?3, ?4)",
            params![id, record.title, category, tags],
        )?;
        ids.push(id);
    }
    Ok(ids)
}

fn category_to_str(category: Category) -> Result<String> {
    match serde_json::to_value(category) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        _ => Err(StoreError::InvalidData(format!(
            "category {category:?} has no string form"
        ))),
    }
}

fn category_from_str(s: &str) -> Category {
    serde_json::from_value(serde_json::Value::String(s.to_string())).unwrap_or(Category::Other)
}
