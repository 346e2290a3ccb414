use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for portal users (students and recruiters alike).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

/// Placement priority of a job, or of the offer a student already accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "TIER_1")]
    Tier1,
    #[serde(rename = "TIER_2")]
    Tier2,
    #[serde(rename = "TIER_3")]
    Tier3,
}

impl Tier {
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Tier1 => "TIER_1",
            Tier::Tier2 => "TIER_2",
            Tier::Tier3 => "TIER_3",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "TIER_1" => Some(Tier::Tier1),
            "TIER_2" => Some(Tier::Tier2),
            "TIER_3" => Some(Tier::Tier3),
            _ => None,
        }
    }
}

/// Lifecycle of a posting as maintained by the job store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Draft,
    Active,
    Closed,
}

/// Employer-defined question attached to a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

/// Job posting as read from the job store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company_name: String,
    pub status: JobStatus,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    pub tier: Tier,
    #[serde(default)]
    pub is_dream_offer: bool,
    #[serde(default, rename = "minCGPA")]
    pub min_cgpa: Option<f64>,
    #[serde(default)]
    pub max_backlogs: Option<u32>,
    #[serde(default)]
    pub allowed_branches: Vec<String>,
    #[serde(default)]
    pub eligible_batch: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

/// Academic snapshot of a student, one per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub user_id: UserId,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub final_cgpa: Option<f64>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub active_backlogs: Option<u32>,
    #[serde(default)]
    pub has_backlogs: Option<String>,
    /// Tier of an offer the student already accepted; unknown labels read as unplaced.
    #[serde(default, deserialize_with = "deserialize_placement_tier")]
    pub placement_tier: Option<Tier>,
}

impl StudentProfile {
    /// Final CGPA when recorded, otherwise the interim CGPA, otherwise zero.
    pub fn effective_cgpa(&self) -> f64 {
        self.final_cgpa.or(self.cgpa).unwrap_or(0.0)
    }

    pub fn has_active_backlogs(&self) -> bool {
        self.active_backlogs.is_some_and(|count| count > 0)
            || self
                .has_backlogs
                .as_deref()
                .is_some_and(|flag| flag == "yes")
    }
}

/// Answer to a custom field, keyed by the field id declared on the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    pub field_id: String,
    #[serde(default)]
    pub value: String,
}

fn deserialize_placement_tier<'de, D>(deserializer: D) -> Result<Option<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Tier::parse))
}

/// Trailing `-` separated segment of a batch label, e.g. `2021-2025` → `2025`.
pub fn batch_year(batch: &str) -> &str {
    batch.rsplit('-').next().unwrap_or(batch).trim()
}
