use std::path::Path;
use std::str::FromStr;

use billing_core::{Customer, MeteringRecord, RecordWithCustomer, TimeRange};
use chrono::{SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

pub const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

pub const MIGRATIONS: &[(&str, &str)] = &[("0001_init", MIGRATION_0001)];

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Fields supplied when registering a customer; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: String,
}

/// Fields supplied when a reading is submitted; the store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub customer_id: i64,
    pub start_reading: Decimal,
    pub end_reading: Decimal,
    pub consumption: Decimal,
    pub status: String,
    pub proof: Option<String>,
}

/// Filter for the record listing; mirrors the reporting queries the API
/// exposes (customer email substring, optional year or year+month window).
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub email_contains: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for (_name, sql) in MIGRATIONS {
            tx.execute_batch(sql)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn create_customer(&self, input: &CustomerInput) -> Result<Customer> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn.execute(
            r#"
            INSERT INTO customer (national_id, name, email, address, role, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                input.national_id,
                input.name,
                input.email,
                input.address,
                input.role,
                now
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_customer_by_id(id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                r#"
                SELECT id, national_id, name, email, address, role
                FROM customer
                WHERE id = ?1
                "#,
                params![id],
                row_to_customer,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                r#"
                SELECT id, national_id, name, email, address, role
                FROM customer
                WHERE email = ?1
                "#,
                params![email],
                row_to_customer,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn get_customer_by_name(&self, name: &str) -> Result<Option<Customer>> {
        self.conn
            .query_row(
                r#"
                SELECT id, national_id, name, email, address, role
                FROM customer
                WHERE name = ?1
                ORDER BY id ASC
                LIMIT 1
                "#,
                params![name],
                row_to_customer,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn list_customers(&self, role: Option<&str>) -> Result<Vec<Customer>> {
        let mut sql = String::from(
            r#"
            SELECT id, national_id, name, email, address, role
            FROM customer
            "#,
        );
        if role.is_some() {
            sql.push_str(" WHERE role = ?1 ");
        }
        sql.push_str(" ORDER BY id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = if let Some(role) = role {
            stmt.query_map(params![role], row_to_customer)?
        } else {
            stmt.query_map([], row_to_customer)?
        };
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count_customers(&self, role: Option<&str>) -> Result<u64> {
        let count: i64 = if let Some(role) = role {
            self.conn.query_row(
                "SELECT COUNT(*) FROM customer WHERE role = ?1",
                params![role],
                |row| row.get(0),
            )?
        } else {
            self.conn
                .query_row("SELECT COUNT(*) FROM customer", [], |row| row.get(0))?
        };
        Ok(count.max(0) as u64)
    }

    pub fn update_customer(&self, id: i64, input: &CustomerInput) -> Result<usize> {
        let updated = self.conn.execute(
            r#"
            UPDATE customer
            SET national_id = ?1, name = ?2, email = ?3, address = ?4, role = ?5
            WHERE id = ?6
            "#,
            params![
                input.national_id,
                input.name,
                input.email,
                input.address,
                input.role,
                id
            ],
        )?;
        Ok(updated)
    }

    pub fn insert_record(&self, input: &RecordInput) -> Result<RecordWithCustomer> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.insert_record_at(input, &now)
    }

    /// Insert with a caller-supplied timestamp; used for backfills.
    pub fn insert_record_at(
        &self,
        input: &RecordInput,
        created_at: &str,
    ) -> Result<RecordWithCustomer> {
        self.conn.execute(
            r#"
            INSERT INTO metering_record (
              customer_id, start_reading, end_reading, consumption, status, proof, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                input.customer_id,
                input.start_reading.to_string(),
                input.end_reading.to_string(),
                input.consumption.to_string(),
                input.status,
                input.proof,
                created_at
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_record(id)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    pub fn get_record(&self, id: i64) -> Result<Option<RecordWithCustomer>> {
        self.conn
            .query_row(
                r#"
                SELECT r.id, r.customer_id, r.start_reading, r.end_reading, r.consumption,
                       r.status, r.proof, r.created_at, c.name
                FROM metering_record r
                INNER JOIN customer c ON c.id = r.customer_id
                WHERE r.id = ?1
                "#,
                params![id],
                row_to_record_with_customer,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn list_records(&self, filter: &RecordFilter) -> Result<Vec<RecordWithCustomer>> {
        let mut sql = String::from(
            r#"
            SELECT r.id, r.customer_id, r.start_reading, r.end_reading, r.consumption,
                   r.status, r.proof, r.created_at, c.name
            FROM metering_record r
            INNER JOIN customer c ON c.id = r.customer_id
            WHERE 1 = 1
            "#,
        );
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(ref email) = filter.email_contains {
            sql.push_str(&format!(" AND c.email LIKE ?{} ESCAPE '\\' ", args.len() + 1));
            args.push(Box::new(format!("%{}%", escape_like(email))));
        }
        if let Some(range) = filter_range(filter) {
            sql.push_str(&format!(
                " AND r.created_at >= ?{} AND r.created_at < ?{} ",
                args.len() + 1,
                args.len() + 2
            ));
            args.push(Box::new(range.start));
            args.push(Box::new(range.end));
        }
        sql.push_str(" ORDER BY r.created_at ASC, r.id ASC");
        let mut stmt = self.conn.prepare(&sql)?;
        let params = rusqlite::params_from_iter(args.iter().map(|value| value.as_ref()));
        let rows = stmt.query_map(params, row_to_record_with_customer)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn all_records(&self) -> Result<Vec<MeteringRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, customer_id, start_reading, end_reading, consumption,
                   status, proof, created_at
            FROM metering_record
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map([], row_to_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn records_in_range(&self, range: &TimeRange) -> Result<Vec<MeteringRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, customer_id, start_reading, end_reading, consumption,
                   status, proof, created_at
            FROM metering_record
            WHERE created_at >= ?1 AND created_at < ?2
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![range.start, range.end], row_to_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn records_for_customer(&self, customer_id: i64) -> Result<Vec<MeteringRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, customer_id, start_reading, end_reading, consumption,
                   status, proof, created_at
            FROM metering_record
            WHERE customer_id = ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![customer_id], row_to_record)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Count of records a customer already has inside one calendar month.
    /// The write path uses this to keep the one-record-per-month invariant.
    pub fn count_records_in_month(&self, customer_id: i64, year: i32, month: u32) -> Result<u64> {
        let (start, end) = month_bounds(year, month);
        let count: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM metering_record
            WHERE customer_id = ?1 AND created_at >= ?2 AND created_at < ?3
            "#,
            params![customer_id, start, end],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    pub fn update_record_status(&self, id: i64, status: &str) -> Result<usize> {
        let updated = self.conn.execute(
            "UPDATE metering_record SET status = ?1 WHERE id = ?2",
            params![status, id],
        )?;
        Ok(updated)
    }

    pub fn delete_record(&self, id: i64) -> Result<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM metering_record WHERE id = ?1", params![id])?;
        Ok(deleted)
    }
}

/// Half-open RFC3339 bounds `[start, end)` for one calendar month. String
/// comparison is valid because every stored timestamp is Z-normalized.
pub fn month_bounds(year: i32, month: u32) -> (String, String) {
    // Millisecond precision so the bounds sort correctly against the
    // millisecond timestamps the store writes.
    let start = format!("{:04}-{:02}-01T00:00:00.000Z", year, month);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = format!("{:04}-{:02}-01T00:00:00.000Z", next_year, next_month);
    (start, end)
}

// `%` and `_` in a filter string must match literally, not as wildcards.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn filter_range(filter: &RecordFilter) -> Option<TimeRange> {
    match (filter.year, filter.month) {
        (Some(year), Some(month)) => {
            let (start, end) = month_bounds(year, month);
            Some(TimeRange { start, end })
        }
        (Some(year), None) => Some(TimeRange {
            start: format!("{:04}-01-01T00:00:00.000Z", year),
            end: format!("{:04}-01-01T00:00:00.000Z", year + 1),
        }),
        _ => None,
    }
}

fn decimal_column(row: &Row<'_>, index: usize) -> std::result::Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;
    Decimal::from_str(&text)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err)))
}

fn row_to_customer(row: &Row<'_>) -> std::result::Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        national_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        role: row.get(5)?,
    })
}

fn row_to_record(row: &Row<'_>) -> std::result::Result<MeteringRecord, rusqlite::Error> {
    Ok(MeteringRecord {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        start_reading: decimal_column(row, 2)?,
        end_reading: decimal_column(row, 3)?,
        consumption: decimal_column(row, 4)?,
        status: row.get(5)?,
        proof: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_record_with_customer(
    row: &Row<'_>,
) -> std::result::Result<RecordWithCustomer, rusqlite::Error> {
    Ok(RecordWithCustomer {
        record: row_to_record(row)?,
        customer_name: row.get(8)?,
    })
}
