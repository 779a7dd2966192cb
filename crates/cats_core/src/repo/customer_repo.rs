//! Customer repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - List, search and load customers with their nested records.
//! - Own the nested create and full-replace update transactions.
//!
//! # Invariants
//! - `create_customer` inserts the customer, its applications with their
//!   tags, vendor tags and notes in one transaction.
//! - `update_customer` deletes and re-inserts applications and vendor tags in
//!   one transaction; meeting notes are left as they are.
//! - Customers are listed by name (case-insensitive), id as tie-breaker.

use crate::model::customer::{
    Customer, CustomerDetail, CustomerDraft, CustomerId, EntityRef,
};
use crate::repo::application_repo::{insert_application, load_applications};
use crate::repo::note_repo::{insert_note, load_notes};
use crate::repo::{log_write, RepoError, RepoResult};
use crate::search::name::search_by_name;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::time::Instant;

pub(crate) const CUSTOMER_SELECT_SQL: &str =
    "SELECT id, customer_name, industry, created_at FROM customers";

/// Repository interface for customer use-cases.
pub trait CustomerRepository {
    /// Lists all customers ordered by name.
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    /// Lists customers whose name contains `text`, ignoring case.
    fn search_customers(&self, text: &str) -> RepoResult<Vec<Customer>>;
    /// Gets one customer row.
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    /// Gets one customer with applications, vendor tags and notes.
    fn get_customer_detail(&self, id: CustomerId) -> RepoResult<Option<CustomerDetail>>;
    /// Inserts a customer and all nested records atomically.
    fn create_customer(&mut self, draft: &CustomerDraft) -> RepoResult<CustomerId>;
    /// Replaces scalar fields, applications and vendor tags atomically.
    fn update_customer(&mut self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<()>;
    /// Deletes a customer; every dependent row goes with it via cascade.
    fn delete_customer(&self, id: CustomerId) -> RepoResult<()>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} ORDER BY customer_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let customers = stmt
            .query_map([], customer_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }

    fn search_customers(&self, text: &str) -> RepoResult<Vec<Customer>> {
        search_by_name(self.conn, text)
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                &format!("{CUSTOMER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                customer_from_row,
            )
            .optional()?;
        Ok(customer)
    }

    fn get_customer_detail(&self, id: CustomerId) -> RepoResult<Option<CustomerDetail>> {
        let Some(customer) = self.get_customer(id)? else {
            return Ok(None);
        };

        Ok(Some(CustomerDetail {
            customer,
            applications: load_applications(self.conn, id)?,
            compute_vendors: load_compute_vendors(self.conn, id)?,
            meeting_notes: load_notes(self.conn, id)?,
        }))
    }

    fn create_customer(&mut self, draft: &CustomerDraft) -> RepoResult<CustomerId> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<CustomerId> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute(
                "INSERT INTO customers (customer_name, industry) VALUES (?1, ?2);",
                params![draft.name, draft.industry],
            )?;
            let customer_id = tx.last_insert_rowid();

            for application in &draft.applications {
                insert_application(&tx, customer_id, application)?;
            }
            insert_compute_vendors(&tx, customer_id, &draft.compute_vendors)?;
            for note in &draft.meeting_notes {
                insert_note(&tx, customer_id, note)?;
            }

            tx.commit()?;
            Ok(customer_id)
        })();
        log_write("customer_create", started_at, &result);
        result
    }

    fn update_customer(&mut self, id: CustomerId, draft: &CustomerDraft) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<()> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            let changed = tx.execute(
                "UPDATE customers SET customer_name = ?1, industry = ?2 WHERE id = ?3;",
                params![draft.name, draft.industry, id],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(EntityRef::Customer(id)));
            }

            // Tag rows of the removed applications cascade.
            tx.execute("DELETE FROM applications WHERE customer_id = ?1;", [id])?;
            tx.execute("DELETE FROM compute_vendors WHERE customer_id = ?1;", [id])?;

            for application in &draft.applications {
                insert_application(&tx, id, application)?;
            }
            insert_compute_vendors(&tx, id, &draft.compute_vendors)?;

            tx.commit()?;
            Ok(())
        })();
        log_write("customer_update", started_at, &result);
        result
    }

    fn delete_customer(&self, id: CustomerId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = match self.conn.execute("DELETE FROM customers WHERE id = ?1;", [id]) {
            Ok(0) => Err(RepoError::NotFound(EntityRef::Customer(id))),
            Ok(_) => Ok(()),
            Err(err) => Err(err.into()),
        };
        log_write("customer_delete", started_at, &result);
        result
    }
}

pub(crate) fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get("id")?,
        name: row.get("customer_name")?,
        industry: row.get("industry")?,
        created_at: row.get("created_at")?,
    })
}

fn insert_compute_vendors(
    conn: &Connection,
    customer_id: CustomerId,
    vendors: &[String],
) -> RepoResult<()> {
    let mut stmt =
        conn.prepare("INSERT INTO compute_vendors (customer_id, vendor_name) VALUES (?1, ?2);")?;
    for vendor in vendors {
        stmt.execute(params![customer_id, vendor])?;
    }
    Ok(())
}

fn load_compute_vendors(conn: &Connection, customer_id: CustomerId) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT vendor_name FROM compute_vendors WHERE customer_id = ?1 ORDER BY id ASC;",
    )?;
    let vendors = stmt
        .query_map([customer_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(vendors)
}
