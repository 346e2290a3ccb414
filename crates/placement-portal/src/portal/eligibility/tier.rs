use serde::{Deserialize, Serialize};

use super::super::domain::Tier;

/// Allow/deny decision of the tier lock with a reason suitable for students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierEligibility {
    pub eligible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TierEligibility {
    fn allowed() -> Self {
        Self {
            eligible: true,
            reason: None,
        }
    }

    fn blocked(reason: &str) -> Self {
        Self {
            eligible: false,
            reason: Some(reason.to_string()),
        }
    }
}

/// Decide whether a student holding `student_tier` may apply to a job of `job_tier`.
///
/// Dream offers bypass the lock and unplaced students may apply anywhere. A Tier 1
/// placement is terminal; lower placements may only move up.
pub fn evaluate(student_tier: Option<Tier>, job_tier: Tier, is_dream_offer: bool) -> TierEligibility {
    if is_dream_offer {
        return TierEligibility::allowed();
    }

    let Some(student_tier) = student_tier else {
        return TierEligibility::allowed();
    };

    match (student_tier, job_tier) {
        (Tier::Tier1, _) => TierEligibility::blocked(
            "You are already placed in Tier 1 and blocked from further placements",
        ),
        (Tier::Tier2, Tier::Tier1) => TierEligibility::allowed(),
        (Tier::Tier2, _) => {
            TierEligibility::blocked("You are placed in Tier 2. You can only apply for Tier 1 jobs")
        }
        (Tier::Tier3, Tier::Tier1 | Tier::Tier2) => TierEligibility::allowed(),
        (Tier::Tier3, Tier::Tier3) => TierEligibility::blocked(
            "You are placed in Tier 3. You can only apply for Tier 1 or Tier 2 jobs",
        ),
    }
}
