use std::sync::Arc;

use axum::http::HeaderMap;
use serde_json::Value;
use tracing::{debug, info};

use super::draft::{ProfileDraft, WizardView};
use super::repository::DraftRepository;
use super::steps::{ProfileSection, ProfileStep};
use crate::portal::auth::{AuthError, Authenticator};
use crate::portal::domain::UserId;
use crate::portal::http::ErrorKind;
use crate::portal::repository::{ProfileRepository, RepositoryError};

/// Service driving the seven-step profile form and publishing the finished profile.
pub struct WizardService<D, P> {
    authenticator: Authenticator,
    drafts: Arc<D>,
    profiles: Arc<P>,
}

impl<D, P> WizardService<D, P>
where
    D: DraftRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(authenticator: Authenticator, drafts: Arc<D>, profiles: Arc<P>) -> Self {
        Self {
            authenticator,
            drafts,
            profiles,
        }
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserId, WizardError> {
        Ok(self.authenticator.authenticate(headers)?)
    }

    pub fn view(&self, caller: &UserId) -> Result<WizardView, WizardError> {
        Ok(self.load(caller)?.view())
    }

    /// Validate and store one step. Saving the final step writes the student profile.
    pub fn save_step(
        &self,
        caller: &UserId,
        step: &str,
        payload: Value,
    ) -> Result<WizardView, WizardError> {
        let step = parse_step(step)?;
        let section = ProfileSection::parse(step, payload)?;

        let mut draft = self.load(caller)?;
        draft.apply(section)?;

        if draft.is_complete {
            self.publish(&draft)?;
        }
        self.drafts.save(draft.clone())?;

        debug!(
            user_id = %caller.0,
            step = step.number(),
            progress = draft.progress(),
            "profile step saved"
        );
        Ok(draft.view())
    }

    pub fn previous(&self, caller: &UserId) -> Result<WizardView, WizardError> {
        let mut draft = self.load(caller)?;
        draft.go_back();
        self.drafts.save(draft.clone())?;
        Ok(draft.view())
    }

    pub fn jump(&self, caller: &UserId, step: &str) -> Result<WizardView, WizardError> {
        let step = parse_step(step)?;
        let mut draft = self.load(caller)?;
        draft.jump_to(step);
        self.drafts.save(draft.clone())?;
        Ok(draft.view())
    }

    fn load(&self, caller: &UserId) -> Result<ProfileDraft, WizardError> {
        Ok(self
            .drafts
            .fetch(caller)?
            .unwrap_or_else(|| ProfileDraft::new(caller.clone())))
    }

    fn publish(&self, draft: &ProfileDraft) -> Result<(), WizardError> {
        let existing_tier = self
            .profiles
            .fetch(&draft.user_id)?
            .and_then(|profile| profile.placement_tier);
        let profile = draft
            .to_student_profile(existing_tier)
            .ok_or_else(|| {
                WizardError::IncompleteSteps(vec![ProfileStep::EngineeringDetails.number()])
            })?;

        self.profiles.upsert(profile)?;
        info!(user_id = %draft.user_id.0, "placement profile completed");
        Ok(())
    }
}

fn parse_step(raw: &str) -> Result<ProfileStep, WizardError> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .and_then(ProfileStep::from_number)
        .ok_or_else(|| WizardError::InvalidStep(raw.to_string()))
}

/// Error raised by the profile wizard.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Unknown profile step \"{0}\"")]
    InvalidStep(String),
    #[error("Step {step}: {message}")]
    InvalidSection { step: u8, message: String },
    #[error("Complete steps {} before final verification", join_steps(.0))]
    IncompleteSteps(Vec<u8>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn join_steps(steps: &[u8]) -> String {
    steps
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl WizardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WizardError::Auth(err) => err.kind(),
            WizardError::InvalidStep(_)
            | WizardError::InvalidSection { .. }
            | WizardError::IncompleteSteps(_) => ErrorKind::BadRequest,
            WizardError::Repository(_) => ErrorKind::Internal,
        }
    }
}
