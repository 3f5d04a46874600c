use async_trait::async_trait;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use tracing::info;

use crate::database::manager::{release, ConnectionFactory, DatabaseError};
use crate::database::models::{DefaultHome, Home, Homeowner, LegacyUser, NewHome};
use crate::database::schema;
use crate::database::store::HomeStore;

const HOME_COLUMNS: &str = "home_id, homeowner_id, home_name, house_age, house_use, renovations, \
    construction_type, floor_count, lot_area, floor_area, selected_materials, latitude, longitude, \
    is_default, created_at";

/// [`HomeStore`] over MySQL. Every method opens its own connection, runs its
/// statement(s), and releases the connection before returning, whether the
/// statement succeeded or not.
#[derive(Clone)]
pub struct MySqlStore {
    factory: ConnectionFactory,
}

impl MySqlStore {
    pub fn new(factory: ConnectionFactory) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl HomeStore for MySqlStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query("SELECT 1").execute(&mut conn).await;
        release(conn).await;
        result?;
        Ok(())
    }

    async fn ensure_legacy_schema(&self) -> Result<(), DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query(schema::CREATE_USERS).execute(&mut conn).await;
        release(conn).await;
        result?;
        Ok(())
    }

    async fn reset_schema(&self) -> Result<(), DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = run_reset(&mut conn).await;
        release(conn).await;
        result?;
        info!("dropped and recreated Home and Homeowner tables");
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<LegacyUser>, DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, LegacyUser>("SELECT id, name FROM Users")
            .fetch_all(&mut conn)
            .await;
        release(conn).await;
        Ok(result?)
    }

    async fn add_user(&self, user: &LegacyUser) -> Result<(), DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query("INSERT INTO Users (id, name) VALUES (?, ?)")
            .bind(user.id)
            .bind(&user.name)
            .execute(&mut conn)
            .await;
        release(conn).await;
        result?;
        Ok(())
    }

    async fn list_homeowners(&self) -> Result<Vec<Homeowner>, DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, Homeowner>("SELECT homeowner_id FROM Homeowner")
            .fetch_all(&mut conn)
            .await;
        release(conn).await;
        Ok(result?)
    }

    async fn get_homeowner(&self, homeowner_id: &str) -> Result<Option<Homeowner>, DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, Homeowner>(
            "SELECT homeowner_id FROM Homeowner WHERE homeowner_id = ?",
        )
        .bind(homeowner_id)
        .fetch_optional(&mut conn)
        .await;
        release(conn).await;
        Ok(result?)
    }

    async fn add_homeowner(&self, homeowner: &Homeowner) -> Result<(), DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query("INSERT INTO Homeowner (homeowner_id) VALUES (?)")
            .bind(&homeowner.homeowner_id)
            .execute(&mut conn)
            .await;
        release(conn).await;
        result?;
        Ok(())
    }

    async fn list_homes(&self) -> Result<Vec<Home>, DatabaseError> {
        let sql = format!("SELECT {} FROM Home ORDER BY home_id", HOME_COLUMNS);
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, Home>(&sql).fetch_all(&mut conn).await;
        release(conn).await;
        Ok(result?)
    }

    async fn list_homes_for_owner(&self, homeowner_id: &str) -> Result<Vec<Home>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM Home WHERE homeowner_id = ? ORDER BY home_id",
            HOME_COLUMNS
        );
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, Home>(&sql)
            .bind(homeowner_id)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;
        Ok(result?)
    }

    async fn add_home(&self, home: &NewHome) -> Result<u64, DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = insert_home(&mut conn, home).await;
        release(conn).await;
        Ok(result?)
    }

    async fn default_home(&self, homeowner_id: &str) -> Result<Option<DefaultHome>, DatabaseError> {
        let mut conn = self.factory.open().await?;
        let result = sqlx::query_as::<_, DefaultHome>(
            "SELECT home_name, latitude, longitude FROM Home \
             WHERE homeowner_id = ? AND is_default = TRUE \
             ORDER BY home_id DESC LIMIT 1",
        )
        .bind(homeowner_id)
        .fetch_optional(&mut conn)
        .await;
        release(conn).await;
        Ok(result?)
    }
}

async fn run_reset(conn: &mut MySqlConnection) -> Result<(), sqlx::Error> {
    for statement in schema::RESET_STATEMENTS {
        sqlx::query(statement).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Clear-then-insert inside one transaction. If the insert fails (for
/// example on the homeowner foreign key) the transaction is rolled back on
/// drop, undoing the clear as well.
async fn insert_home(conn: &mut MySqlConnection, home: &NewHome) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;

    if home.is_default {
        sqlx::query("UPDATE Home SET is_default = FALSE WHERE homeowner_id = ?")
            .bind(&home.homeowner_id)
            .execute(&mut *tx)
            .await?;
    }

    let inserted = sqlx::query(
        "INSERT INTO Home (homeowner_id, home_name, house_age, house_use, renovations, \
         construction_type, floor_count, lot_area, floor_area, selected_materials, \
         latitude, longitude, is_default) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&home.homeowner_id)
    .bind(&home.home_name)
    .bind(home.house_age)
    .bind(&home.house_use)
    .bind(&home.renovations)
    .bind(&home.construction_type)
    .bind(home.floor_count)
    .bind(home.lot_area)
    .bind(home.floor_area)
    .bind(&home.selected_materials)
    .bind(home.latitude)
    .bind(home.longitude)
    .bind(home.is_default)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(inserted.last_insert_id())
}
