use std::fs;
use std::path::Path;

use jp_core::{Snapshot, export_snapshot, import_snapshot};

use crate::error::{Result, StoreError};
use crate::store::{DataService, Store, delete_plan_on, upsert_content_on, upsert_day_on};

impl Store {
    /// Snapshot one user's days together with the whole content catalog.
    pub fn snapshot(&self, user_id: &str) -> Result<Snapshot> {
        Ok(Snapshot::new(
            user_id,
            self.fetch_days(user_id)?,
            self.fetch_content()?,
        ))
    }

    pub fn export_json_string(&self, user_id: &str) -> Result<String> {
        Ok(export_snapshot(&self.snapshot(user_id)?)?)
    }

    pub fn export_json_file(&self, user_id: &str, path: &Path) -> Result<()> {
        let json = self.export_json_string(user_id)?;
        fs::write(path, json).map_err(|e| {
            StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
        })
    }

    /// Load a snapshot, replacing the user's days and merging its content.
    /// Any stored plan for the user is dropped, so the imported days are served
    /// as-is until the next `start_journey`. All-or-nothing: on error the store
    /// is left untouched. Returns the snapshot's user id.
    pub fn import_json_str(&self, json: &str) -> Result<String> {
        let snapshot = import_snapshot(json)?;
        let user_id = snapshot.user_id.as_str();

        let tx = self.conn().unchecked_transaction()?;
        tx.execute("DELETE FROM days WHERE user_id = ?1", [user_id])?;
        delete_plan_on(&tx, user_id)?;
        for day in &snapshot.days {
            upsert_day_on(&tx, user_id, day)?;
        }
        upsert_content_on(&tx, &snapshot.content)?;
        tx.commit()?;

        tracing::info!(
            "imported {} days and {} content items for {}",
            snapshot.days.len(),
            snapshot.content.len(),
            snapshot.user_id
        );
        Ok(snapshot.user_id)
    }

    pub fn import_json_file(&self, path: &Path) -> Result<String> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        self.import_json_str(&json)
    }
}
