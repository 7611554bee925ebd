use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};

use app_api::{
    BillsRequest, CustomerByNameRequest, CustomerCreateRequest, CustomerMonthRequest,
    CustomerUpdateRequest, CustomersRequest, InvoiceRequest, RecordCreateRequest,
    RecordDeleteRequest, RecordStatusRequest, TariffPreviewRequest,
};

use crate::{errors::HttpError, state::HttpState};

pub async fn bills_list(
    State(state): State<HttpState>,
    Json(req): Json<BillsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::bills_list(&state.context, req)?;
    Ok(Json(response))
}

pub async fn bills_invoice(
    State(state): State<HttpState>,
    Json(req): Json<InvoiceRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::bills_invoice(&state.context, req)?;
    Ok(Json(response))
}

pub async fn bills_create(
    State(state): State<HttpState>,
    Json(req): Json<RecordCreateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::bills_create(&state.context, req)?;
    Ok(Json(response))
}

pub async fn bills_update_status(
    State(state): State<HttpState>,
    Json(req): Json<RecordStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::bills_update_status(&state.context, req)?;
    Ok(Json(response))
}

pub async fn bills_delete(
    State(state): State<HttpState>,
    Json(req): Json<RecordDeleteRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::bills_delete(&state.context, req)?;
    Ok(Json(response))
}

pub async fn tariff_preview(
    State(state): State<HttpState>,
    Json(req): Json<TariffPreviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::tariff_preview(&state.context, req)?;
    Ok(Json(response))
}

pub async fn dashboard_summary(
    State(state): State<HttpState>,
    Json(req): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::dashboard_summary(&state.context, req)?;
    Ok(Json(response))
}

pub async fn customer_month_summary(
    State(state): State<HttpState>,
    Json(req): Json<CustomerMonthRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::customer_month_summary(&state.context, req)?;
    Ok(Json(response))
}

pub async fn customers_list(
    State(state): State<HttpState>,
    Json(req): Json<CustomersRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::customers_list(&state.context, req)?;
    Ok(Json(response))
}

pub async fn customers_get_by_name(
    State(state): State<HttpState>,
    Json(req): Json<CustomerByNameRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::customers_get_by_name(&state.context, req)?;
    Ok(Json(response))
}

pub async fn customers_create(
    State(state): State<HttpState>,
    Json(req): Json<CustomerCreateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::customers_create(&state.context, req)?;
    Ok(Json(response))
}

pub async fn customers_update(
    State(state): State<HttpState>,
    Json(req): Json<CustomerUpdateRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::customers_update(&state.context, req)?;
    Ok(Json(response))
}

pub async fn not_found() -> HttpError {
    HttpError::new(
        StatusCode::NOT_FOUND,
        "not found",
        Some("not_found".to_string()),
    )
}
