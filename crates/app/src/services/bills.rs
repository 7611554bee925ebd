use chrono::{Datelike, Utc};
use rust_decimal::Decimal;

use crate::config::RecordQueryParams;
use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use billing_core::{BillWithCost, bill_with_cost, bills_with_cost, compute_cost};
use billing_db::{Db, RecordFilter, RecordInput};

/// Fields accepted when a customer submits a reading.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub customer_id: i64,
    pub start_reading: Decimal,
    pub end_reading: Decimal,
    pub consumption: Decimal,
    pub status: Option<String>,
    pub proof: Option<String>,
}

#[derive(Clone)]
pub struct BillingService {
    config: SharedConfig,
}

impl BillingService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list(&self, params: &RecordQueryParams) -> Result<Vec<BillWithCost>> {
        let db = self.db()?;
        let filter = RecordFilter {
            email_contains: params.email.clone(),
            year: params.year,
            month: params.month,
        };
        let rows = db.list_records(&filter)?;
        Ok(bills_with_cost(&rows)?)
    }

    pub fn invoice(&self, id: i64) -> Result<BillWithCost> {
        let db = self.db()?;
        let row = db
            .get_record(id)?
            .ok_or_else(|| AppError::NotFound(format!("record {} not found", id)))?;
        Ok(bill_with_cost(&row)?)
    }

    pub fn create(&self, input: &NewRecord) -> Result<BillWithCost> {
        // Prices the consumption up front so malformed input is rejected
        // before anything is written.
        compute_cost(input.consumption)?;
        let db = self.db()?;
        db.get_customer_by_id(input.customer_id)?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", input.customer_id)))?;
        let today = Utc::now().date_naive();
        let existing = db.count_records_in_month(input.customer_id, today.year(), today.month())?;
        if existing > 0 {
            return Err(AppError::InvalidInput(format!(
                "customer {} already has a record for {:04}-{:02}",
                input.customer_id,
                today.year(),
                today.month()
            )));
        }
        let record = RecordInput {
            customer_id: input.customer_id,
            start_reading: input.start_reading,
            end_reading: input.end_reading,
            consumption: input.consumption,
            status: input.status.clone().unwrap_or_else(|| "pending".to_string()),
            proof: input.proof.clone(),
        };
        let row = db.insert_record(&record)?;
        Ok(bill_with_cost(&row)?)
    }

    pub fn update_status(&self, id: i64, status: &str) -> Result<()> {
        if status.trim().is_empty() {
            return Err(AppError::InvalidInput("status must not be empty".to_string()));
        }
        let db = self.db()?;
        let updated = db.update_record_status(id, status)?;
        if updated == 0 {
            return Err(AppError::NotFound(format!("record {} not found", id)));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let db = self.db()?;
        let deleted = db.delete_record(id)?;
        if deleted == 0 {
            return Err(AppError::NotFound(format!("record {} not found", id)));
        }
        Ok(())
    }
}
