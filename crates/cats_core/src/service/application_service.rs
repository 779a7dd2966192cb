//! Application use-case service.
//!
//! # Invariants
//! - Create and update return the persisted application read back from
//!   storage, tags included.

use crate::model::customer::{Application, ApplicationDraft, ApplicationId, CustomerId};
use crate::repo::application_repo::ApplicationRepository;
use crate::service::{ServiceError, ServiceResult};

/// Application service facade over repository implementations.
pub struct ApplicationService<R: ApplicationRepository> {
    repo: R,
}

impl<R: ApplicationRepository> ApplicationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds one application under a customer.
    pub fn create_application(
        &mut self,
        customer_id: CustomerId,
        draft: ApplicationDraft,
    ) -> ServiceResult<Application> {
        let draft = draft.normalized();
        let id = self.repo.create_application(customer_id, &draft)?;
        self.read_back(id, "created application not found in read-back")
    }

    /// Renames one application and replaces its tags.
    pub fn update_application(
        &mut self,
        id: ApplicationId,
        draft: ApplicationDraft,
    ) -> ServiceResult<Application> {
        let draft = draft.normalized();
        self.repo.update_application(id, &draft)?;
        self.read_back(id, "updated application not found in read-back")
    }

    pub fn delete_application(&self, id: ApplicationId) -> ServiceResult<()> {
        Ok(self.repo.delete_application(id)?)
    }

    fn read_back(&self, id: ApplicationId, details: &'static str) -> ServiceResult<Application> {
        self.repo
            .get_application(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
