use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};
use billing_core::Customer;
use billing_db::{CustomerInput, Db};

/// Fields accepted when registering a customer. Role defaults to `customer`.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct CustomersService {
    config: SharedConfig,
}

impl CustomersService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn create(&self, input: &NewCustomer) -> Result<Customer> {
        if input.email.trim().is_empty() || input.name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "name and email are required".to_string(),
            ));
        }
        let db = self.db()?;
        if db.get_customer_by_email(&input.email)?.is_some() {
            return Err(AppError::InvalidInput(format!(
                "email {} is already registered",
                input.email
            )));
        }
        Ok(db.create_customer(&CustomerInput {
            national_id: input.national_id.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            address: input.address.clone(),
            role: input
                .role
                .clone()
                .unwrap_or_else(|| "customer".to_string()),
        })?)
    }

    pub fn list(&self, role: Option<&str>) -> Result<Vec<Customer>> {
        let db = self.db()?;
        Ok(db.list_customers(role)?)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Customer> {
        let db = self.db()?;
        db.get_customer_by_name(name)?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", name)))
    }

    pub fn update(&self, id: i64, input: &NewCustomer) -> Result<Customer> {
        let db = self.db()?;
        let existing = db
            .get_customer_by_id(id)?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", id)))?;
        let updated = CustomerInput {
            national_id: input.national_id.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            address: input.address.clone(),
            role: input.role.clone().unwrap_or(existing.role),
        };
        db.update_customer(id, &updated)?;
        db.get_customer_by_id(id)?
            .ok_or_else(|| AppError::NotFound(format!("customer {} not found", id)))
    }
}
