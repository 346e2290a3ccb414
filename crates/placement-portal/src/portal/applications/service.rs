use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::Utc;
use tracing::{debug, info};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationSubmission, SubmissionReceipt};
use super::repository::ApplicationRepository;
use crate::portal::auth::{AuthError, Authenticator};
use crate::portal::domain::{JobId, UserId};
use crate::portal::eligibility::{check_application, IneligibilityReason};
use crate::portal::http::ErrorKind;
use crate::portal::repository::{JobRepository, ProfileRepository, RepositoryError};

/// Service composing job and profile lookups, eligibility checks, and application storage.
pub struct ApplicationService<J, P, A> {
    authenticator: Authenticator,
    jobs: Arc<J>,
    profiles: Arc<P>,
    applications: Arc<A>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<J, P, A> ApplicationService<J, P, A>
where
    J: JobRepository + 'static,
    P: ProfileRepository + 'static,
    A: ApplicationRepository + 'static,
{
    pub fn new(
        authenticator: Authenticator,
        jobs: Arc<J>,
        profiles: Arc<P>,
        applications: Arc<A>,
    ) -> Self {
        Self {
            authenticator,
            jobs,
            profiles,
            applications,
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, ApplicationServiceError> {
        Ok(self.authenticator.authenticate(headers)?)
    }

    /// Validate a one-click application and persist it with its responses.
    ///
    /// Every rejection returns before the repository is written.
    pub fn submit(
        &self,
        caller: &UserId,
        submission: ApplicationSubmission,
    ) -> Result<SubmissionReceipt, ApplicationServiceError> {
        let job_id = submission
            .job_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| JobId(id.to_string()))
            .ok_or(ApplicationServiceError::MissingJobId)?;

        let job = self
            .jobs
            .fetch(&job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;

        let profile = self
            .profiles
            .fetch(caller)?
            .ok_or(ApplicationServiceError::ProfileIncomplete)?;

        if let Err(reason) = check_application(&job, &profile, &submission.responses) {
            debug!(
                user_id = %caller.0,
                job_id = %job.id.0,
                check = reason.code(),
                "application rejected"
            );
            return Err(reason.into());
        }

        if let Some(unknown) = submission.responses.iter().find(|response| {
            !job
                .custom_fields
                .iter()
                .any(|field| field.id == response.field_id)
        }) {
            return Err(ApplicationServiceError::UnknownField {
                field_id: unknown.field_id.clone(),
            });
        }

        let record = ApplicationRecord {
            id: next_application_id(),
            job_id: job.id.clone(),
            user_id: caller.clone(),
            resume_used: submission.resume_url,
            responses: submission.responses,
            created_at: Utc::now(),
        };

        let application = self.applications.insert(record)?;
        info!(
            application_id = %application.id.0,
            job_id = %job.id.0,
            user_id = %caller.0,
            responses = application.responses.len(),
            "application submitted"
        );

        Ok(SubmissionReceipt {
            success: true,
            application,
            message: format!(
                "Successfully applied to {} at {}",
                job.title, job.company_name
            ),
        })
    }

    /// Fetch one of the caller's own applications.
    pub fn get(
        &self,
        caller: &UserId,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.applications
            .fetch(application_id)?
            .filter(|record| &record.user_id == caller)
            .ok_or(ApplicationServiceError::ApplicationNotFound)
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Job ID is required")]
    MissingJobId,
    #[error("Job not found")]
    JobNotFound,
    #[error("Please complete your profile before applying")]
    ProfileIncomplete,
    #[error(transparent)]
    Ineligible(#[from] IneligibilityReason),
    #[error("Response references unknown custom field \"{field_id}\"")]
    UnknownField { field_id: String },
    #[error("Application not found")]
    ApplicationNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApplicationServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationServiceError::Auth(err) => err.kind(),
            ApplicationServiceError::MissingJobId
            | ApplicationServiceError::ProfileIncomplete
            | ApplicationServiceError::Ineligible(_)
            | ApplicationServiceError::UnknownField { .. } => ErrorKind::BadRequest,
            ApplicationServiceError::JobNotFound | ApplicationServiceError::ApplicationNotFound => {
                ErrorKind::NotFound
            }
            ApplicationServiceError::Repository(_) => ErrorKind::Internal,
        }
    }
}
