mod bills;
mod customers;
mod reports;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use billing_db::Db;

pub use bills::{BillingService, NewRecord};
pub use customers::{CustomersService, NewCustomer};
pub use reports::ReportsService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub bills: BillingService,
    pub reports: ReportsService,
    pub customers: CustomersService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            bills: BillingService::new(shared.clone()),
            reports: ReportsService::new(shared.clone()),
            customers: CustomersService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}
