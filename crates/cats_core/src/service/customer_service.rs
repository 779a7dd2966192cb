//! Customer use-case service.
//!
//! # Responsibility
//! - List, search and load customers.
//! - Normalize nested tag lists, then hand create/update to the repository
//!   transaction.
//!
//! # Invariants
//! - Update is a full replace of applications and vendor tags, never a diff.
//! - A missing customer surfaces as `ServiceError::NotFound`.

use crate::model::customer::{Customer, CustomerDetail, CustomerDraft, CustomerId, EntityRef};
use crate::repo::customer_repo::CustomerRepository;
use crate::service::{ServiceError, ServiceResult};

/// Customer service facade over repository implementations.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_customers(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.repo.list_customers()?)
    }

    /// Case-insensitive substring search on customer name.
    pub fn search_customers(&self, text: &str) -> ServiceResult<Vec<Customer>> {
        Ok(self.repo.search_customers(text)?)
    }

    /// Loads one customer with applications, vendor tags and notes.
    pub fn get_customer(&self, id: CustomerId) -> ServiceResult<CustomerDetail> {
        self.repo
            .get_customer_detail(id)?
            .ok_or(ServiceError::NotFound(EntityRef::Customer(id)))
    }

    /// Creates a customer with all nested records and returns its id.
    pub fn create_customer(&mut self, draft: CustomerDraft) -> ServiceResult<CustomerId> {
        let draft = draft.normalized();
        Ok(self.repo.create_customer(&draft)?)
    }

    /// Replaces the customer's scalar fields, applications and vendor tags.
    pub fn update_customer(&mut self, id: CustomerId, draft: CustomerDraft) -> ServiceResult<()> {
        let draft = draft.normalized();
        Ok(self.repo.update_customer(id, &draft)?)
    }

    pub fn delete_customer(&self, id: CustomerId) -> ServiceResult<()> {
        Ok(self.repo.delete_customer(id)?)
    }
}
