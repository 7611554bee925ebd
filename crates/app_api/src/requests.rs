use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct EmptyRequest {}

#[derive(Debug, Deserialize, Default)]
pub struct BillsRequest {
    pub email: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RecordCreateRequest {
    pub customer_id: i64,
    pub start_reading: Decimal,
    pub end_reading: Decimal,
    pub consumption: Decimal,
    pub status: Option<String>,
    pub proof: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordStatusRequest {
    pub id: i64,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordDeleteRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TariffPreviewRequest {
    pub consumption: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CustomerMonthRequest {
    pub email: String,
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CustomersRequest {
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerByNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerCreateRequest {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerUpdateRequest {
    pub id: i64,
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Option<String>,
}
