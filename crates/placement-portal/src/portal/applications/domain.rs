use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::super::domain::{FieldResponse, JobId, UserId};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Inbound one-click application body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub responses: Vec<FieldResponse>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

/// `"responses": null` reads the same as an omitted list.
fn deserialize_responses<'de, D>(deserializer: D) -> Result<Vec<FieldResponse>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<FieldResponse>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Stored application together with its ordered custom-field responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub resume_used: Option<String>,
    pub responses: Vec<FieldResponse>,
    pub created_at: DateTime<Utc>,
}

/// Body returned to the student after a successful application.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub success: bool,
    pub application: ApplicationRecord,
    pub message: String,
}
