//! Placement eligibility: the tier lock plus the field-level checks a job declares.

mod reason;
mod rules;
mod tier;

pub use reason::IneligibilityReason;
pub use tier::{evaluate, TierEligibility};

use super::domain::{FieldResponse, Job, StudentProfile};

/// Run every check a job imposes on an applicant, stopping at the first failure.
///
/// Checks run in a fixed order: CGPA, branch, batch, backlogs, required custom
/// fields, then the tier lock.
pub fn check_application(
    job: &Job,
    profile: &StudentProfile,
    responses: &[FieldResponse],
) -> Result<(), IneligibilityReason> {
    rules::check_cgpa(job, profile)?;
    rules::check_branch(job, profile)?;
    rules::check_batch(job, profile)?;
    rules::check_backlogs(job, profile)?;
    rules::check_custom_fields(job, responses)?;
    rules::check_tier(job, profile)
}
