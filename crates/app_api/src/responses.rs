use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
}

#[derive(Serialize)]
pub struct UpdatedResponse {
    pub updated: i64,
}

/// Per-customer month report, keyed back to the request so mobile clients
/// can render it without extra lookups.
#[derive(Serialize)]
pub struct CustomerMonthResponse {
    pub email: String,
    pub year: i32,
    pub current_month_total: Decimal,
    pub cost_current_month: Decimal,
    pub previous_month_total: Decimal,
    pub cost_previous_month: Decimal,
    pub delta: Decimal,
    pub current_month_records: u64,
    pub previous_month_records: u64,
}
