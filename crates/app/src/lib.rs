pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::{CustomerMonthParams, RecordQueryParams};
pub use error::{ApiError, AppError, Result};
pub use services::{AppServices, NewCustomer, NewRecord};
pub use util::time::reference_month;
