mod aggregate;
mod tariff;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use aggregate::{
    bill_with_cost, bills_with_cost, monthly_histogram, summarize_customer_month, summarize_period,
};
pub use tariff::{
    BASE_CHARGE, TIER_ONE_CAP, TIER_ONE_RATE, TIER_THREE_RATE, TIER_TWO_CAP, TIER_TWO_RATE,
    compute_cost,
};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("negative consumption {0}")]
    NegativeConsumption(Decimal),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// One customer's meter reading for a billing period. Timestamps are RFC3339
/// strings in UTC; the store assigns `id` and `created_at` on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteringRecord {
    pub id: i64,
    pub customer_id: i64,
    pub start_reading: Decimal,
    pub end_reading: Decimal,
    pub consumption: Decimal,
    pub status: String,
    pub proof: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: String,
}

/// Itemized output of the tariff calculator for a single consumption value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub usage_0_to_10: Decimal,
    pub usage_11_to_20: Decimal,
    pub usage_above_20: Decimal,
    pub base_charge: Decimal,
    pub cost_0_to_10: Decimal,
    pub cost_11_to_20: Decimal,
    pub cost_above_20: Decimal,
    pub total_payment: Decimal,
}

/// A metering record joined with its customer, as the store returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordWithCustomer {
    pub record: MeteringRecord,
    pub customer_name: String,
}

/// A single calculated bill in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillWithCost {
    pub id: i64,
    pub customer_name: String,
    pub start_reading: Decimal,
    pub end_reading: Decimal,
    pub usage: Decimal,
    pub usage_0_to_10: Decimal,
    pub usage_11_to_20: Decimal,
    pub usage_above_20: Decimal,
    pub base_charge: Decimal,
    pub cost_0_to_10: Decimal,
    pub cost_11_to_20: Decimal,
    pub cost_above_20: Decimal,
    pub total_payment: Decimal,
    pub status: String,
    pub proof: Option<String>,
    pub created_at: String,
}

/// One calendar-month bucket of the rolling 12-month histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub year: i32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub customer_count: u64,
    pub total_payment: Decimal,
    pub total_consumption: Decimal,
    pub monthly_counts: Vec<MonthBucket>,
}

/// Current-versus-previous month usage for one customer. The record counts
/// expose uniqueness violations (more than one record per window) without
/// failing the aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMonthSummary {
    pub current_month_total: Decimal,
    pub previous_month_total: Decimal,
    pub cost_current_month: Decimal,
    pub cost_previous_month: Decimal,
    pub delta: Decimal,
    pub current_month_records: u64,
    pub previous_month_records: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}
