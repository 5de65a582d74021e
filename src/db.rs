use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

pub struct Database {
    pub pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Apply the embedded migrations.
    ///
    /// Runs over `direct_url` when given (poolers such as PgBouncer in
    /// transaction mode cannot hold the migration lock), otherwise over the
    /// application pool.
    pub async fn migrate(&self, direct_url: Option<&str>) -> anyhow::Result<()> {
        match direct_url {
            Some(url) => {
                let direct = PgPoolOptions::new().max_connections(1).connect(url).await?;
                sqlx::migrate!("./migrations").run(&direct).await?;
                direct.close().await;
            }
            None => sqlx::migrate!("./migrations").run(&self.pool).await?,
        }

        tracing::info!("Database migrations applied");
        Ok(())
    }
}
