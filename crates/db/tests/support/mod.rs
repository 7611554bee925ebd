#![allow(dead_code)]

use std::path::PathBuf;

use billing_db::{CustomerInput, Db, RecordInput};
use rust_decimal::Decimal;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn customer_input(national_id: &str, name: &str, email: &str, role: &str) -> CustomerInput {
    CustomerInput {
        national_id: national_id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        address: "Jl. Melati 1".to_string(),
        role: role.to_string(),
    }
}

pub fn record_input(customer_id: i64, consumption: Decimal) -> RecordInput {
    RecordInput {
        customer_id,
        start_reading: Decimal::from(100),
        end_reading: Decimal::from(100) + consumption,
        consumption,
        status: "pending".to_string(),
        proof: Some("reading.jpg".to_string()),
    }
}
