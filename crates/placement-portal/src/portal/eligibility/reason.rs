/// Reasons an otherwise well-formed application is turned away.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IneligibilityReason {
    #[error("Minimum CGPA required: {required}")]
    BelowMinimumCgpa { required: f64, actual: f64 },
    #[error("Your branch ({branch}) is not eligible")]
    BranchNotEligible { branch: String },
    #[error("Only {eligible_batch} batch is eligible")]
    BatchNotEligible { eligible_batch: String },
    #[error("No active backlogs allowed")]
    ActiveBacklogs,
    #[error("Custom field \"{label}\" is required")]
    MissingCustomField { field_id: String, label: String },
    #[error("{reason}")]
    TierLocked { reason: String },
}

impl IneligibilityReason {
    /// Stable machine-readable code for logs and metrics labels.
    pub const fn code(&self) -> &'static str {
        match self {
            IneligibilityReason::BelowMinimumCgpa { .. } => "cgpa",
            IneligibilityReason::BranchNotEligible { .. } => "branch",
            IneligibilityReason::BatchNotEligible { .. } => "batch",
            IneligibilityReason::ActiveBacklogs => "backlogs",
            IneligibilityReason::MissingCustomField { .. } => "custom_field",
            IneligibilityReason::TierLocked { .. } => "tier",
        }
    }
}
