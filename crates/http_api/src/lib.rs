mod errors;
mod handlers;
mod state;

use axum::{Router, routing::post};

pub use state::HttpState;

pub fn router(state: HttpState) -> Router<()> {
    let api = Router::new()
        .route("/bills", post(handlers::bills_list))
        .route("/bill_invoice", post(handlers::bills_invoice))
        .route("/bill_create", post(handlers::bills_create))
        .route("/bill_update_status", post(handlers::bills_update_status))
        .route("/bill_delete", post(handlers::bills_delete))
        .route("/tariff_preview", post(handlers::tariff_preview))
        .route("/dashboard", post(handlers::dashboard_summary))
        .route("/customer_month", post(handlers::customer_month_summary))
        .route("/customers", post(handlers::customers_list))
        .route("/customer_by_name", post(handlers::customers_get_by_name))
        .route("/customer_create", post(handlers::customers_create))
        .route("/customer_update", post(handlers::customers_update));

    Router::new()
        .nest("/api", api)
        .fallback(handlers::not_found)
        .with_state(state)
}
