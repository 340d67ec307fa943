use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{Mutex, MutexGuard};

use crate::{
    code_image::CodeImageGenerator,
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn, create_pool, run_migrations},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub codes: CodeImageGenerator,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Connect, migrate and build the state shared by every handler.
    pub async fn init(config: &AppConfig) -> Result<Self> {
        let pool = create_pool(&config.database_url).await?;
        run_migrations(&pool).await?;
        let orm = create_orm_conn(pool.clone());
        Ok(Self {
            pool,
            orm,
            codes: CodeImageGenerator::new(&config.static_dir),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Swap the code-image generator, keeping the same database handles.
    pub fn with_codes(self, codes: CodeImageGenerator) -> Self {
        Self { codes, ..self }
    }

    /// SQLite allows one writer at a time, and a deferred transaction that
    /// reads before it writes fails with `SQLITE_BUSY` instead of waiting.
    /// Every write path holds this guard for the length of its statement or
    /// transaction.
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}
