use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::tariff::compute_cost;
use crate::{
    BillWithCost, CoreError, CustomerMonthSummary, MeteringRecord, MonthBucket, PeriodSummary,
    RecordWithCustomer, Result,
};

/// Attaches a cost breakdown to a single record.
pub fn bill_with_cost(row: &RecordWithCustomer) -> Result<BillWithCost> {
    let cost = compute_cost(row.record.consumption)?;
    Ok(BillWithCost {
        id: row.record.id,
        customer_name: row.customer_name.clone(),
        start_reading: row.record.start_reading,
        end_reading: row.record.end_reading,
        usage: row.record.consumption,
        usage_0_to_10: cost.usage_0_to_10,
        usage_11_to_20: cost.usage_11_to_20,
        usage_above_20: cost.usage_above_20,
        base_charge: cost.base_charge,
        cost_0_to_10: cost.cost_0_to_10,
        cost_11_to_20: cost.cost_11_to_20,
        cost_above_20: cost.cost_above_20,
        total_payment: cost.total_payment,
        status: row.record.status.clone(),
        proof: row.record.proof.clone(),
        created_at: row.record.created_at.clone(),
    })
}

/// Maps every supplied record through the tariff calculator, preserving input
/// order. Fails on the first malformed record without partial output.
pub fn bills_with_cost(rows: &[RecordWithCustomer]) -> Result<Vec<BillWithCost>> {
    rows.iter().map(bill_with_cost).collect()
}

/// Rolling 12-month histogram of record counts, anchored at `today` and
/// running forward one bucket per month offset with year rollover. Always
/// exactly 12 buckets, in offset order; empty months count zero.
pub fn monthly_histogram(
    population: &[MeteringRecord],
    today: NaiveDate,
) -> Result<Vec<MonthBucket>> {
    let months: Vec<(i32, u32)> = (0..12)
        .map(|offset| add_months(today.year(), today.month(), offset))
        .collect();
    let mut counts = [0u64; 12];
    for record in population {
        let key = month_of(&record.created_at)?;
        if let Some(index) = months.iter().position(|month| *month == key) {
            counts[index] += 1;
        }
    }
    Ok(months
        .into_iter()
        .zip(counts)
        .map(|((year, month), count)| MonthBucket {
            month: format!("{:02}", month),
            year,
            count,
        })
        .collect())
}

/// Folds the windowed record set into totals and attaches the histogram over
/// the full record population. `customer_count` is supplied by the caller
/// since customers with no records still count.
pub fn summarize_period(
    records: &[MeteringRecord],
    population: &[MeteringRecord],
    customer_count: u64,
    today: NaiveDate,
) -> Result<PeriodSummary> {
    let mut total_payment = Decimal::ZERO;
    let mut total_consumption = Decimal::ZERO;
    for record in records {
        let cost = compute_cost(record.consumption)?;
        total_payment += cost.total_payment;
        total_consumption += record.consumption;
    }
    Ok(PeriodSummary {
        customer_count,
        total_payment,
        total_consumption,
        monthly_counts: monthly_histogram(population, today)?,
    })
}

/// Sums one customer's consumption for the calendar month of `reference` and
/// the month before it, and prices each sum. Zero records in a window sum to
/// zero; multiple records sum and show up in the per-window record counts.
pub fn summarize_customer_month(
    records: &[MeteringRecord],
    customer_id: i64,
    reference: NaiveDate,
) -> Result<CustomerMonthSummary> {
    let current = (reference.year(), reference.month());
    let previous = previous_month(current);
    let mut current_total = Decimal::ZERO;
    let mut previous_total = Decimal::ZERO;
    let mut current_records = 0u64;
    let mut previous_records = 0u64;
    for record in records.iter().filter(|r| r.customer_id == customer_id) {
        let key = month_of(&record.created_at)?;
        if key == current {
            current_total += record.consumption;
            current_records += 1;
        } else if key == previous {
            previous_total += record.consumption;
            previous_records += 1;
        }
    }
    let cost_current = compute_cost(current_total)?;
    let cost_previous = compute_cost(previous_total)?;
    Ok(CustomerMonthSummary {
        current_month_total: current_total,
        previous_month_total: previous_total,
        cost_current_month: cost_current.total_payment,
        cost_previous_month: cost_previous.total_payment,
        delta: current_total - previous_total,
        current_month_records: current_records,
        previous_month_records: previous_records,
    })
}

fn month_of(created_at: &str) -> Result<(i32, u32)> {
    let parsed = DateTime::parse_from_rfc3339(created_at)
        .map_err(|err| CoreError::InvalidTimestamp(format!("{}: {}", created_at, err)))?;
    let utc = parsed.with_timezone(&Utc);
    Ok((utc.year(), utc.month()))
}

fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let index = month - 1 + offset;
    (year + (index / 12) as i32, index % 12 + 1)
}

fn previous_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}
