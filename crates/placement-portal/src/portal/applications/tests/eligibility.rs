use super::common::*;
use crate::portal::domain::Tier;
use crate::portal::eligibility::{check_application, IneligibilityReason};

#[test]
fn cgpa_below_minimum_reports_the_requirement() {
    let mut profile = profile();
    profile.cgpa = Some(6.8);

    let err = check_application(&job(), &profile, &[]).expect_err("cgpa too low");

    assert!(matches!(err, IneligibilityReason::BelowMinimumCgpa { .. }));
    assert!(err.to_string().contains('7'), "message was {err}");
}

#[test]
fn final_cgpa_takes_precedence_over_interim() {
    let mut profile = profile();
    profile.cgpa = Some(9.1);
    profile.final_cgpa = Some(6.5);

    let err = check_application(&job(), &profile, &[]).expect_err("final cgpa too low");
    assert_eq!(
        err,
        IneligibilityReason::BelowMinimumCgpa {
            required: 7.0,
            actual: 6.5
        }
    );
}

#[test]
fn missing_cgpa_counts_as_zero() {
    let mut profile = profile();
    profile.cgpa = None;

    assert!(matches!(
        check_application(&job(), &profile, &[]),
        Err(IneligibilityReason::BelowMinimumCgpa { actual, .. }) if actual == 0.0
    ));
}

#[test]
fn branch_outside_allowed_list_is_rejected() {
    let mut profile = profile();
    profile.branch = Some("ECE".to_string());
    profile.cgpa = Some(8.0);

    let err = check_application(&job(), &profile, &[]).expect_err("branch not allowed");
    assert_eq!(err.to_string(), "Your branch (ECE) is not eligible");
}

#[test]
fn empty_branch_list_allows_every_branch() {
    let mut job = job();
    job.allowed_branches.clear();
    let mut profile = profile();
    profile.branch = Some("MECH".to_string());

    assert!(check_application(&job, &profile, &[]).is_ok());
}

#[test]
fn batch_compares_trailing_year() {
    let mut job = job();
    job.eligible_batch = Some("2021-2025".to_string());
    let mut profile = profile();

    profile.batch = Some("2020 - 2025".to_string());
    assert!(check_application(&job, &profile, &[]).is_ok());

    profile.batch = Some("2022-2026".to_string());
    let err = check_application(&job, &profile, &[]).expect_err("batch mismatch");
    assert_eq!(err.to_string(), "Only 2021-2025 batch is eligible");
}

#[test]
fn zero_backlog_jobs_reject_active_backlogs() {
    let mut job = job();
    job.max_backlogs = Some(0);

    let mut by_count = profile();
    by_count.active_backlogs = Some(1);
    assert_eq!(
        check_application(&job, &by_count, &[]),
        Err(IneligibilityReason::ActiveBacklogs)
    );

    let mut by_flag = profile();
    by_flag.active_backlogs = None;
    by_flag.has_backlogs = Some("yes".to_string());
    assert_eq!(
        check_application(&job, &by_flag, &[]),
        Err(IneligibilityReason::ActiveBacklogs)
    );
}

#[test]
fn unset_backlog_limit_never_rejects_on_backlogs() {
    let job = job();
    assert_eq!(job.max_backlogs, None);

    let mut profile = profile();
    profile.active_backlogs = Some(4);
    profile.has_backlogs = Some("yes".to_string());
    assert!(check_application(&job, &profile, &[]).is_ok());
}

#[test]
fn non_zero_backlog_limit_allows_active_backlogs() {
    let mut job = job();
    job.max_backlogs = Some(2);
    let mut profile = profile();
    profile.active_backlogs = Some(1);

    assert!(check_application(&job, &profile, &[]).is_ok());
}

#[test]
fn missing_required_field_is_named_by_label() {
    let job = job_with_fields();

    let err = check_application(&job, &profile(), &[]).expect_err("required field missing");
    assert_eq!(err.to_string(), "Custom field \"GitHub Profile\" is required");

    let err = check_application(&job, &profile(), &[response("github", "")])
        .expect_err("empty value does not count");
    assert!(err.to_string().contains("GitHub Profile"));

    assert!(check_application(&job, &profile(), &[response("github", "https://github.com/x")]).is_ok());
}

#[test]
fn tier_lock_applies_unless_dream_offer() {
    let mut profile = profile();
    profile.placement_tier = Some(Tier::Tier1);

    let mut job = job();
    let err = check_application(&job, &profile, &[]).expect_err("tier 1 is terminal");
    assert!(matches!(err, IneligibilityReason::TierLocked { .. }));
    assert_eq!(err.code(), "tier");

    job.is_dream_offer = true;
    assert!(check_application(&job, &profile, &[]).is_ok());
}

#[test]
fn first_failing_rule_wins() {
    let mut profile = profile();
    profile.cgpa = Some(5.0);
    profile.branch = Some("ECE".to_string());
    profile.placement_tier = Some(Tier::Tier1);

    assert!(matches!(
        check_application(&job_with_fields(), &profile, &[]),
        Err(IneligibilityReason::BelowMinimumCgpa { .. })
    ));
}
