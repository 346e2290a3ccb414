use super::super::domain::{batch_year, FieldResponse, Job, StudentProfile};
use super::reason::IneligibilityReason;
use super::tier::evaluate;

pub(crate) fn check_cgpa(job: &Job, profile: &StudentProfile) -> Result<(), IneligibilityReason> {
    let Some(required) = job.min_cgpa.filter(|min| *min > 0.0) else {
        return Ok(());
    };

    let actual = profile.effective_cgpa();
    if actual < required {
        return Err(IneligibilityReason::BelowMinimumCgpa { required, actual });
    }
    Ok(())
}

pub(crate) fn check_branch(job: &Job, profile: &StudentProfile) -> Result<(), IneligibilityReason> {
    if job.allowed_branches.is_empty() {
        return Ok(());
    }

    match profile.branch.as_deref().filter(|branch| !branch.is_empty()) {
        Some(branch) if !job.allowed_branches.iter().any(|allowed| allowed == branch) => {
            Err(IneligibilityReason::BranchNotEligible {
                branch: branch.to_string(),
            })
        }
        _ => Ok(()),
    }
}

pub(crate) fn check_batch(job: &Job, profile: &StudentProfile) -> Result<(), IneligibilityReason> {
    let eligible_batch = job.eligible_batch.as_deref().filter(|batch| !batch.is_empty());
    let student_batch = profile.batch.as_deref().filter(|batch| !batch.is_empty());

    match (eligible_batch, student_batch) {
        (Some(eligible), Some(student)) if batch_year(eligible) != batch_year(student) => {
            Err(IneligibilityReason::BatchNotEligible {
                eligible_batch: eligible.to_string(),
            })
        }
        _ => Ok(()),
    }
}

pub(crate) fn check_backlogs(
    job: &Job,
    profile: &StudentProfile,
) -> Result<(), IneligibilityReason> {
    if job.max_backlogs == Some(0) && profile.has_active_backlogs() {
        return Err(IneligibilityReason::ActiveBacklogs);
    }
    Ok(())
}

pub(crate) fn check_custom_fields(
    job: &Job,
    responses: &[FieldResponse],
) -> Result<(), IneligibilityReason> {
    for field in job.custom_fields.iter().filter(|field| field.required) {
        let answered = responses
            .iter()
            .find(|response| response.field_id == field.id)
            .is_some_and(|response| !response.value.is_empty());

        if !answered {
            return Err(IneligibilityReason::MissingCustomField {
                field_id: field.id.clone(),
                label: field.label.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn check_tier(job: &Job, profile: &StudentProfile) -> Result<(), IneligibilityReason> {
    let decision = evaluate(profile.placement_tier, job.tier, job.is_dream_offer);
    if decision.eligible {
        return Ok(());
    }

    Err(IneligibilityReason::TierLocked {
        reason: decision
            .reason
            .unwrap_or_else(|| "Not eligible for this job tier".to_string()),
    })
}
