//! Application repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/replace/delete for one application and its tag rows.
//! - Share application insert/load helpers with the customer repository.
//!
//! # Invariants
//! - `update_application` replaces the full tag set of one application in a
//!   single transaction and never touches sibling applications.
//! - Tag rows are read back in insertion order.

use crate::model::customer::{
    Application, ApplicationDraft, ApplicationId, CustomerId, EntityRef,
};
use crate::model::tag::ApplicationTag;
use crate::repo::{log_write, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::time::Instant;

/// Repository interface for single-application writes.
pub trait ApplicationRepository {
    /// Gets one application with its tag lists.
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    /// Inserts one application and its tags under an existing customer.
    fn create_application(
        &mut self,
        customer_id: CustomerId,
        draft: &ApplicationDraft,
    ) -> RepoResult<ApplicationId>;
    /// Renames one application and replaces all of its tags.
    fn update_application(&mut self, id: ApplicationId, draft: &ApplicationDraft)
        -> RepoResult<()>;
    /// Deletes one application; tag rows go with it via cascade.
    fn delete_application(&self, id: ApplicationId) -> RepoResult<()>;
}

/// SQLite-backed application repository.
pub struct SqliteApplicationRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteApplicationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ApplicationRepository for SqliteApplicationRepository<'_> {
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, customer_id, application_name
                 FROM applications
                 WHERE id = ?1;",
                [id],
                application_from_row,
            )
            .optional()?;

        match row {
            Some(application) => Ok(Some(with_tags(self.conn, application)?)),
            None => Ok(None),
        }
    }

    fn create_application(
        &mut self,
        customer_id: CustomerId,
        draft: &ApplicationDraft,
    ) -> RepoResult<ApplicationId> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<ApplicationId> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            if !customer_exists(&tx, customer_id)? {
                return Err(RepoError::NotFound(EntityRef::Customer(customer_id)));
            }
            let id = insert_application(&tx, customer_id, draft)?;
            tx.commit()?;
            Ok(id)
        })();
        log_write("application_create", started_at, &result);
        result
    }

    fn update_application(
        &mut self,
        id: ApplicationId,
        draft: &ApplicationDraft,
    ) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = (|| -> RepoResult<()> {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            let changed = tx.execute(
                "UPDATE applications SET application_name = ?1 WHERE id = ?2;",
                params![draft.name, id],
            )?;
            if changed == 0 {
                return Err(RepoError::NotFound(EntityRef::Application(id)));
            }

            for kind in ApplicationTag::ALL {
                tx.execute(
                    &format!("DELETE FROM {} WHERE application_id = ?1;", kind.table()),
                    [id],
                )?;
            }
            insert_application_tags(&tx, id, draft)?;
            tx.commit()?;
            Ok(())
        })();
        log_write("application_update", started_at, &result);
        result
    }

    fn delete_application(&self, id: ApplicationId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .execute("DELETE FROM applications WHERE id = ?1;", [id])
            .map_err(RepoError::from)
            .and_then(|changed| {
                if changed == 0 {
                    Err(RepoError::NotFound(EntityRef::Application(id)))
                } else {
                    Ok(())
                }
            });
        log_write("application_delete", started_at, &result);
        result
    }
}

/// Inserts one application row plus its tag rows.
///
/// Callers own the enclosing transaction.
pub(crate) fn insert_application(
    conn: &Connection,
    customer_id: CustomerId,
    draft: &ApplicationDraft,
) -> RepoResult<ApplicationId> {
    conn.execute(
        "INSERT INTO applications (customer_id, application_name) VALUES (?1, ?2);",
        params![customer_id, draft.name],
    )?;
    let id = conn.last_insert_rowid();
    insert_application_tags(conn, id, draft)?;
    Ok(id)
}

/// Loads every application of one customer, in insertion order.
pub(crate) fn load_applications(
    conn: &Connection,
    customer_id: CustomerId,
) -> RepoResult<Vec<Application>> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_id, application_name
         FROM applications
         WHERE customer_id = ?1
         ORDER BY id ASC;",
    )?;
    let rows = stmt
        .query_map([customer_id], application_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut applications = Vec::with_capacity(rows.len());
    for application in rows {
        applications.push(with_tags(conn, application)?);
    }
    Ok(applications)
}

pub(crate) fn customer_exists(conn: &Connection, customer_id: CustomerId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?1);",
        [customer_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn insert_application_tags(
    conn: &Connection,
    application_id: ApplicationId,
    draft: &ApplicationDraft,
) -> RepoResult<()> {
    for kind in ApplicationTag::ALL {
        let sql = format!(
            "INSERT INTO {} (application_id, {}) VALUES (?1, ?2);",
            kind.table(),
            kind.column()
        );
        let mut stmt = conn.prepare(&sql)?;
        for value in tags_of(draft, kind) {
            stmt.execute(params![application_id, value])?;
        }
    }
    Ok(())
}

fn load_tags(
    conn: &Connection,
    application_id: ApplicationId,
    kind: ApplicationTag,
) -> RepoResult<Vec<String>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE application_id = ?1 ORDER BY id ASC;",
        kind.column(),
        kind.table()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([application_id])?;
    let mut values = Vec::new();
    while let Some(row) = rows.next()? {
        values.push(row.get(0)?);
    }
    Ok(values)
}

fn with_tags(conn: &Connection, mut application: Application) -> RepoResult<Application> {
    application.modalities = load_tags(conn, application.id, ApplicationTag::Modality)?;
    application.models = load_tags(conn, application.id, ApplicationTag::Model)?;
    application.cloud_services = load_tags(conn, application.id, ApplicationTag::CloudService)?;
    Ok(application)
}

fn tags_of(draft: &ApplicationDraft, kind: ApplicationTag) -> &[String] {
    match kind {
        ApplicationTag::Modality => &draft.modalities,
        ApplicationTag::Model => &draft.models,
        ApplicationTag::CloudService => &draft.cloud_services,
    }
}

fn application_from_row(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get("id")?,
        customer_id: row.get("customer_id")?,
        name: row.get("application_name")?,
        modalities: Vec::new(),
        models: Vec::new(),
        cloud_services: Vec::new(),
    })
}
