use chrono::{Datelike, Utc};

use crate::context::AppContext;
use crate::requests::*;
use crate::responses::*;
use billing_app::{
    CustomerMonthParams, NewCustomer, NewRecord, RecordQueryParams, Result, reference_month,
};
use billing_core::{BillWithCost, CostBreakdown, Customer, PeriodSummary, compute_cost};

pub fn bills_list(ctx: &AppContext, req: BillsRequest) -> Result<Vec<BillWithCost>> {
    let params = RecordQueryParams {
        email: req.email,
        year: req.year,
        month: req.month,
    };
    ctx.app_state.services.bills.list(&params)
}

pub fn bills_invoice(ctx: &AppContext, req: InvoiceRequest) -> Result<BillWithCost> {
    ctx.app_state.services.bills.invoice(req.id)
}

pub fn bills_create(ctx: &AppContext, req: RecordCreateRequest) -> Result<BillWithCost> {
    let input = NewRecord {
        customer_id: req.customer_id,
        start_reading: req.start_reading,
        end_reading: req.end_reading,
        consumption: req.consumption,
        status: req.status,
        proof: req.proof,
    };
    ctx.app_state.services.bills.create(&input)
}

pub fn bills_update_status(ctx: &AppContext, req: RecordStatusRequest) -> Result<UpdatedResponse> {
    ctx.app_state.services.bills.update_status(req.id, &req.status)?;
    Ok(UpdatedResponse { updated: req.id })
}

pub fn bills_delete(ctx: &AppContext, req: RecordDeleteRequest) -> Result<DeletedResponse> {
    ctx.app_state.services.bills.delete(req.id)?;
    Ok(DeletedResponse { deleted: req.id })
}

pub fn tariff_preview(_ctx: &AppContext, req: TariffPreviewRequest) -> Result<CostBreakdown> {
    Ok(compute_cost(req.consumption)?)
}

pub fn dashboard_summary(ctx: &AppContext, _req: EmptyRequest) -> Result<PeriodSummary> {
    ctx.app_state.services.reports.dashboard()
}

pub fn customer_month_summary(
    ctx: &AppContext,
    req: CustomerMonthRequest,
) -> Result<CustomerMonthResponse> {
    let params = CustomerMonthParams {
        email: req.email.clone(),
        year: req.year,
    };
    let summary = ctx.app_state.services.reports.customer_month(&params)?;
    let reference = reference_month(req.year, Utc::now().date_naive())?;
    Ok(CustomerMonthResponse {
        email: req.email,
        year: reference.year(),
        current_month_total: summary.current_month_total,
        cost_current_month: summary.cost_current_month,
        previous_month_total: summary.previous_month_total,
        cost_previous_month: summary.cost_previous_month,
        delta: summary.delta,
        current_month_records: summary.current_month_records,
        previous_month_records: summary.previous_month_records,
    })
}

pub fn customers_list(ctx: &AppContext, req: CustomersRequest) -> Result<Vec<Customer>> {
    ctx.app_state.services.customers.list(req.role.as_deref())
}

pub fn customers_get_by_name(ctx: &AppContext, req: CustomerByNameRequest) -> Result<Customer> {
    ctx.app_state.services.customers.get_by_name(&req.name)
}

pub fn customers_create(ctx: &AppContext, req: CustomerCreateRequest) -> Result<Customer> {
    let input = NewCustomer {
        national_id: req.national_id,
        name: req.name,
        email: req.email,
        address: req.address,
        role: req.role,
    };
    ctx.app_state.services.customers.create(&input)
}

pub fn customers_update(ctx: &AppContext, req: CustomerUpdateRequest) -> Result<Customer> {
    let input = NewCustomer {
        national_id: req.national_id,
        name: req.name,
        email: req.email,
        address: req.address,
        role: req.role,
    };
    ctx.app_state.services.customers.update(req.id, &input)
}
