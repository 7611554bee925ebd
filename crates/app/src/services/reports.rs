use chrono::{Datelike, Utc};

use crate::config::CustomerMonthParams;
use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use crate::util::time::reference_month;
use billing_core::{
    CustomerMonthSummary, PeriodSummary, TimeRange, summarize_customer_month, summarize_period,
};
use billing_db::{Db, month_bounds};

pub const CUSTOMER_ROLE: &str = "customer";

#[derive(Clone)]
pub struct ReportsService {
    config: SharedConfig,
}

impl ReportsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    /// Dashboard totals: current-calendar-month payment and consumption,
    /// customer count, and the rolling 12-month record histogram over the
    /// whole record population.
    pub fn dashboard(&self) -> Result<PeriodSummary> {
        let db = self.db()?;
        let today = Utc::now().date_naive();
        let (start, end) = month_bounds(today.year(), today.month());
        let records = db.records_in_range(&TimeRange { start, end })?;
        let population = db.all_records()?;
        let customer_count = db.count_customers(Some(CUSTOMER_ROLE))?;
        Ok(summarize_period(
            &records,
            &population,
            customer_count,
            today,
        )?)
    }

    /// Current-versus-previous month usage for one customer, looked up by
    /// email. Fails with `NotFound` before touching any record.
    pub fn customer_month(&self, params: &CustomerMonthParams) -> Result<CustomerMonthSummary> {
        let db = self.db()?;
        let customer = db
            .get_customer_by_email(&params.email)?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", params.email)))?;
        let today = Utc::now().date_naive();
        let reference = reference_month(params.year, today)?;
        let records = db.records_for_customer(customer.id)?;
        let summary = summarize_customer_month(&records, customer.id, reference)?;
        if summary.current_month_records > 1 || summary.previous_month_records > 1 {
            eprintln!(
                "data integrity: customer {} has multiple records in a month window ({} current, {} previous)",
                customer.id, summary.current_month_records, summary.previous_month_records
            );
        }
        Ok(summary)
    }
}
