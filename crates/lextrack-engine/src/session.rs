//! Active-case session store
//!
//! The "active case" is an explicit, injected dependency: features that want
//! to attach work to the user's current case ask this store, there is no
//! process-global pointer. The SQLite implementation survives restarts; the
//! in-memory one backs tests and single-shot CLI use.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use lextrack_core::errors::{ErrorKind, LexError};
use lextrack_store::artifacts;
use lextrack_store::errors::Result;

/// Per-user pointer to the case the user is currently working
pub trait ActiveCaseStore: Send + Sync {
    fn set_active(&self, user_id: &str, case_id: &str) -> Result<()>;
    fn active(&self, user_id: &str) -> Result<Option<String>>;
    fn clear(&self, user_id: &str) -> Result<()>;
}

/// SQLite-backed implementation (shares the app's connection)
pub struct SqliteActiveCaseStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteActiveCaseStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| LexError::new(ErrorKind::Internal).with_message("connection lock poisoned"))
    }
}

impl ActiveCaseStore for SqliteActiveCaseStore {
    fn set_active(&self, user_id: &str, case_id: &str) -> Result<()> {
        let conn = self.lock()?;
        artifacts::set_active_case(&conn, user_id, case_id)
    }

    fn active(&self, user_id: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        artifacts::active_case(&conn, user_id)
    }

    fn clear(&self, user_id: &str) -> Result<()> {
        let conn = self.lock()?;
        artifacts::clear_active_case(&conn, user_id)
    }
}

/// In-memory implementation for tests and single-shot CLI commands
#[derive(Default)]
pub struct InMemoryActiveCaseStore {
    map: Mutex<HashMap<String, String>>,
}

impl InMemoryActiveCaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.map
            .lock()
            .map_err(|_| LexError::new(ErrorKind::Internal).with_message("session lock poisoned"))
    }
}

impl ActiveCaseStore for InMemoryActiveCaseStore {
    fn set_active(&self, user_id: &str, case_id: &str) -> Result<()> {
        self.lock()?.insert(user_id.to_string(), case_id.to_string());
        Ok(())
    }

    fn active(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    fn clear(&self, user_id: &str) -> Result<()> {
        self.lock()?.remove(user_id);
        Ok(())
    }
}
