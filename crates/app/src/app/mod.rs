use std::path::PathBuf;

use crate::error::Result;
use crate::services::AppServices;
use billing_db::Db;

/// Paths needed to run the billing service.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub db_path: PathBuf,
}

/// Application state shared by frontend backends (HTTP, CLI).
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        let config = AppConfig { db_path };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn is_fresh_db(&self) -> bool {
        !self.config.db_path.exists()
    }

    pub fn setup_db(&self) -> Result<()> {
        setup_db(&self.config.db_path)
    }
}

pub fn setup_db(path: &std::path::Path) -> Result<()> {
    let mut db = Db::open(path)?;
    db.migrate()?;
    Ok(())
}
