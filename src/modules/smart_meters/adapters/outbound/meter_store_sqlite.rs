// SQLite implementation of the MeterStore port.
//
// Purpose
// - Durable meters and readings for the running service.
//
// Responsibilities
// - Create the schema if it is missing and seed empty tables, each in its own transaction.
// - Aggregate usage inside the database with SUM, never by loading readings.
// - Acquire a pooled connection per operation; it goes back to the pool when dropped,
//   including on every error path.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::modules::smart_meters::core::meter::Meter;
use crate::modules::smart_meters::core::ports::{MeterStore, MeterStoreError};
use crate::modules::smart_meters::core::seed::{generate_readings, seed_meters};

#[derive(Clone)]
pub struct SqliteMeterStore {
    pool: SqlitePool,
}

impl SqliteMeterStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(&self) -> Result<(), MeterStoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meters (
                id     INTEGER PRIMARY KEY,
                name   TEXT    NOT NULL,
                status TEXT    NOT NULL
            );
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meter_readings (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                meter_id  INTEGER NOT NULL REFERENCES meters (id),
                kwh       REAL    NOT NULL,
                timestamp TEXT    NOT NULL
            );
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_meter_readings_meter_id
                ON meter_readings (meter_id);
            "#,
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn seed_meters_if_empty(&self) -> Result<(), MeterStoreError> {
        let mut tx = self.pool.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meters")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            info!(count, "meter table already seeded");
            return Ok(());
        }

        info!("seeding meters");
        let mut builder = QueryBuilder::<Sqlite>::new("INSERT INTO meters (id, name, status) ");
        builder.push_values(seed_meters(), |mut b, meter| {
            b.push_bind(meter.id).push_bind(meter.name).push_bind(meter.status);
        });
        builder.build().execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn seed_readings_if_empty(&self) -> Result<(), MeterStoreError> {
        let mut tx = self.pool.begin().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM meter_readings")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            info!(count, "meter readings already exist");
            return Ok(());
        }

        let meter_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM meters ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        let readings = generate_readings(&mut rand::thread_rng(), &meter_ids, Utc::now());
        if readings.is_empty() {
            return Ok(());
        }

        info!(meters = meter_ids.len(), readings = readings.len(), "seeding meter readings");
        let mut builder =
            QueryBuilder::<Sqlite>::new("INSERT INTO meter_readings (meter_id, kwh, timestamp) ");
        builder.push_values(readings, |mut b, reading| {
            b.push_bind(reading.meter_id)
                .push_bind(reading.kwh)
                .push_bind(reading.timestamp);
        });
        builder.build().execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl MeterStore for SqliteMeterStore {
    async fn initialize(&self) -> Result<(), MeterStoreError> {
        self.create_schema().await?;
        self.seed_meters_if_empty().await?;
        self.seed_readings_if_empty().await?;
        info!("database ready");
        Ok(())
    }

    async fn find_meter(&self, meter_id: i64) -> Result<Option<Meter>, MeterStoreError> {
        let mut conn = self.pool.acquire().await?;
        let meter = sqlx::query_as::<_, Meter>("SELECT id, name, status FROM meters WHERE id = ?")
            .bind(meter_id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(meter)
    }

    async fn sum_usage(&self, meter_id: i64) -> Result<f64, MeterStoreError> {
        let mut conn = self.pool.acquire().await?;
        let total: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(kwh), 0.0) AS REAL) FROM meter_readings WHERE meter_id = ?",
        )
        .bind(meter_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(total)
    }

    async fn list_meters(&self) -> Result<Vec<Meter>, MeterStoreError> {
        let mut conn = self.pool.acquire().await?;
        let meters = sqlx::query_as::<_, Meter>("SELECT id, name, status FROM meters ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;
        Ok(meters)
    }
}
