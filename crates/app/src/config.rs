use serde::{Deserialize, Serialize};

/// Query parameters accepted by the bill listing.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RecordQueryParams {
    pub email: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Query parameters accepted by the per-customer month summary.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CustomerMonthParams {
    pub email: String,
    pub year: Option<i32>,
}
