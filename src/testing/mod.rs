use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::database::models::{DefaultHome, Home, Homeowner, LegacyUser, NewHome};
use crate::database::{DatabaseError, HomeStore};

/// In-process [`HomeStore`] that mirrors the MySQL schema rules: tables
/// must exist, homeowner ids are unique, homes need an existing owner.
/// Counts every call so tests can assert that nothing touched the store.
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    calls: AtomicUsize,
    reachable: bool,
    legacy_table_fails: bool,
}

#[derive(Default)]
struct MemoryState {
    users_table: bool,
    home_tables: bool,
    users: Vec<LegacyUser>,
    homeowners: Vec<Homeowner>,
    homes: Vec<Home>,
    next_home_id: i32,
}

impl MemoryStore {
    /// Store with no tables yet
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            calls: AtomicUsize::new(0),
            reachable: true,
            legacy_table_fails: false,
        }
    }

    /// Store whose every call fails as if the database were down
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new()
        }
    }

    /// Store where only creating the legacy `Users` table fails
    pub fn without_legacy_table() -> Self {
        Self {
            legacy_table_fails: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(DatabaseError::Query("Can't connect to MySQL server".into()));
        }
        self.state
            .lock()
            .map_err(|_| DatabaseError::Query("memory store poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    fn require_users(&self) -> Result<(), DatabaseError> {
        if self.users_table {
            Ok(())
        } else {
            Err(DatabaseError::Query("Table 'Users' doesn't exist".into()))
        }
    }

    fn require_homes(&self) -> Result<(), DatabaseError> {
        if self.home_tables {
            Ok(())
        } else {
            Err(DatabaseError::Query("Table 'Homeowner' doesn't exist".into()))
        }
    }
}

#[async_trait]
impl HomeStore for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        self.enter().map(|_| ())
    }

    async fn ensure_legacy_schema(&self) -> Result<(), DatabaseError> {
        let mut state = self.enter()?;
        if self.legacy_table_fails {
            return Err(DatabaseError::Query(
                "CREATE command denied to user for table 'Users'".into(),
            ));
        }
        state.users_table = true;
        Ok(())
    }

    async fn reset_schema(&self) -> Result<(), DatabaseError> {
        let mut state = self.enter()?;
        state.homes.clear();
        state.homeowners.clear();
        state.next_home_id = 0;
        state.home_tables = true;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<LegacyUser>, DatabaseError> {
        let state = self.enter()?;
        state.require_users()?;
        Ok(state.users.clone())
    }

    async fn add_user(&self, user: &LegacyUser) -> Result<(), DatabaseError> {
        let mut state = self.enter()?;
        state.require_users()?;
        if state.users.iter().any(|u| u.id == user.id) {
            return Err(DatabaseError::Query(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                user.id
            )));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn list_homeowners(&self) -> Result<Vec<Homeowner>, DatabaseError> {
        let state = self.enter()?;
        state.require_homes()?;
        Ok(state.homeowners.clone())
    }

    async fn get_homeowner(&self, homeowner_id: &str) -> Result<Option<Homeowner>, DatabaseError> {
        let state = self.enter()?;
        state.require_homes()?;
        Ok(state
            .homeowners
            .iter()
            .find(|h| h.homeowner_id == homeowner_id)
            .cloned())
    }

    async fn add_homeowner(&self, homeowner: &Homeowner) -> Result<(), DatabaseError> {
        let mut state = self.enter()?;
        state.require_homes()?;
        if state
            .homeowners
            .iter()
            .any(|h| h.homeowner_id == homeowner.homeowner_id)
        {
            return Err(DatabaseError::Query(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                homeowner.homeowner_id
            )));
        }
        state.homeowners.push(homeowner.clone());
        Ok(())
    }

    async fn list_homes(&self) -> Result<Vec<Home>, DatabaseError> {
        let state = self.enter()?;
        state.require_homes()?;
        Ok(state.homes.clone())
    }

    async fn list_homes_for_owner(&self, homeowner_id: &str) -> Result<Vec<Home>, DatabaseError> {
        let state = self.enter()?;
        state.require_homes()?;
        Ok(state
            .homes
            .iter()
            .filter(|h| h.homeowner_id == homeowner_id)
            .cloned()
            .collect())
    }

    async fn add_home(&self, home: &NewHome) -> Result<u64, DatabaseError> {
        let mut state = self.enter()?;
        state.require_homes()?;

        if !state
            .homeowners
            .iter()
            .any(|h| h.homeowner_id == home.homeowner_id)
        {
            return Err(DatabaseError::Query(
                "Cannot add or update a child row: a foreign key constraint fails".into(),
            ));
        }

        if home.is_default {
            for existing in state
                .homes
                .iter_mut()
                .filter(|h| h.homeowner_id == home.homeowner_id)
            {
                existing.is_default = false;
            }
        }

        state.next_home_id += 1;
        let home_id = state.next_home_id;
        state.homes.push(Home {
            home_id,
            homeowner_id: home.homeowner_id.clone(),
            home_name: home.home_name.clone(),
            house_age: home.house_age,
            house_use: home.house_use.clone(),
            renovations: home.renovations.clone(),
            construction_type: home.construction_type.clone(),
            floor_count: home.floor_count,
            lot_area: home.lot_area,
            floor_area: home.floor_area,
            selected_materials: home.selected_materials.clone(),
            latitude: home.latitude,
            longitude: home.longitude,
            is_default: home.is_default,
            created_at: Utc::now(),
        });

        Ok(home_id as u64)
    }

    async fn default_home(&self, homeowner_id: &str) -> Result<Option<DefaultHome>, DatabaseError> {
        let state = self.enter()?;
        state.require_homes()?;
        Ok(state
            .homes
            .iter()
            .rev()
            .find(|h| h.homeowner_id == homeowner_id && h.is_default)
            .map(|h| DefaultHome {
                home_name: h.home_name.clone(),
                latitude: h.latitude,
                longitude: h.longitude,
            }))
    }
}
