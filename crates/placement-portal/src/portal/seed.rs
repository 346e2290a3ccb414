use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::domain::{Job, StudentProfile, UserId};
use super::verification::PortalUser;

/// Fixture used to pre-populate the in-memory stores of a local deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<PortalUser>,
    /// Bearer token to user id.
    #[serde(default)]
    pub sessions: HashMap<String, UserId>,
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub profiles: Vec<StudentProfile>,
}

impl SeedData {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("unable to read seed file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::domain::Tier;

    #[test]
    fn parses_partial_fixture() {
        let seed = SeedData::parse(
            r#"{
                "sessions": { "token-1": "student-1" },
                "jobs": [{
                    "id": "job-1",
                    "title": "Analyst",
                    "companyName": "Contoso",
                    "status": "ACTIVE",
                    "tier": "TIER_3",
                    "minCGPA": 6.5,
                    "allowedBranches": ["CSE", "ISE"]
                }],
                "profiles": [{ "userId": "student-1", "cgpa": 7.1, "placementTier": "TIER_9" }]
            }"#,
        )
        .expect("seed parses");

        assert!(seed.users.is_empty());
        assert_eq!(seed.sessions.get("token-1"), Some(&UserId("student-1".into())));
        assert_eq!(seed.jobs[0].tier, Tier::Tier3);
        assert_eq!(seed.profiles[0].placement_tier, None);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SeedData::load(Path::new("/nonexistent/seed.json")).expect_err("missing");
        assert!(err.to_string().contains("/nonexistent/seed.json"));
    }
}
