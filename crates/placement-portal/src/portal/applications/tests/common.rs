use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::{header, HeaderValue};
use axum::response::Response;
use serde_json::Value;

use crate::portal::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission,
};
use crate::portal::applications::{application_router, ApplicationRepository, ApplicationService};
use crate::portal::auth::{Authenticator, SessionStore};
use crate::portal::domain::{
    CustomField, FieldResponse, Job, JobId, JobStatus, StudentProfile, Tier, UserId,
};
use crate::portal::repository::{JobRepository, ProfileRepository, RepositoryError};

pub(super) const SESSION_TOKEN: &str = "session-cse";

pub(super) fn student() -> UserId {
    UserId("student-cse".to_string())
}

pub(super) fn job() -> Job {
    Job {
        id: JobId("job-sde".to_string()),
        title: "Software Engineer".to_string(),
        company_name: "Northwind Systems".to_string(),
        status: JobStatus::Active,
        deadline: None,
        tier: Tier::Tier2,
        is_dream_offer: false,
        min_cgpa: Some(7.0),
        max_backlogs: None,
        allowed_branches: vec!["CSE".to_string()],
        eligible_batch: None,
        custom_fields: Vec::new(),
    }
}

pub(super) fn job_with_fields() -> Job {
    let mut job = job();
    job.id = JobId("job-fields".to_string());
    job.custom_fields = vec![
        CustomField {
            id: "github".to_string(),
            label: "GitHub Profile".to_string(),
            required: true,
        },
        CustomField {
            id: "relocate".to_string(),
            label: "Willing to relocate".to_string(),
            required: false,
        },
    ];
    job
}

pub(super) fn profile() -> StudentProfile {
    StudentProfile {
        user_id: student(),
        branch: Some("CSE".to_string()),
        batch: Some("2021-2025".to_string()),
        final_cgpa: None,
        cgpa: Some(7.5),
        active_backlogs: Some(0),
        has_backlogs: Some("no".to_string()),
        placement_tier: None,
    }
}

pub(super) fn submission(job_id: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: Some(job_id.to_string()),
        responses: Vec::new(),
        resume_url: Some("https://files.example.edu/resume.pdf".to_string()),
    }
}

pub(super) fn response(field_id: &str, value: &str) -> FieldResponse {
    FieldResponse {
        field_id: field_id.to_string(),
        value: value.to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl MemoryJobs {
    pub(super) fn with(jobs: Vec<Job>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.jobs.lock().expect("job mutex poisoned");
            for job in jobs {
                guard.insert(job.id.clone(), job);
            }
        }
        store
    }

    pub(super) fn put(&self, job: Job) {
        self.jobs
            .lock()
            .expect("job mutex poisoned")
            .insert(job.id.clone(), job);
    }
}

impl JobRepository for MemoryJobs {
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.lock().expect("job mutex poisoned").get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    profiles: Arc<Mutex<HashMap<UserId, StudentProfile>>>,
}

impl ProfileRepository for MemoryProfiles {
    fn fetch(&self, user_id: &UserId) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned())
    }

    fn upsert(&self, profile: StudentProfile) -> Result<(), RepositoryError> {
        self.profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl MemoryApplications {
    pub(super) fn count(&self) -> usize {
        self.records.lock().expect("application mutex poisoned").len()
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("application mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("application mutex poisoned")
            .get(id)
            .cloned())
    }
}

pub(super) struct UnavailableApplications;

impl ApplicationRepository for UnavailableApplications {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct MemorySessions(HashMap<String, UserId>);

impl SessionStore for MemorySessions {
    fn resolve(&self, token: &str) -> Result<Option<UserId>, RepositoryError> {
        Ok(self.0.get(token).cloned())
    }
}

pub(super) fn authenticator() -> Authenticator {
    let mut sessions = HashMap::new();
    sessions.insert(SESSION_TOKEN.to_string(), student());
    sessions.insert("session-other".to_string(), UserId("student-other".to_string()));
    Authenticator::new(Arc::new(MemorySessions(sessions)))
}

pub(super) type TestService = ApplicationService<MemoryJobs, MemoryProfiles, MemoryApplications>;

pub(super) fn build_service() -> (
    TestService,
    Arc<MemoryJobs>,
    Arc<MemoryProfiles>,
    Arc<MemoryApplications>,
) {
    let jobs = Arc::new(MemoryJobs::with(vec![job(), job_with_fields()]));
    let profiles = Arc::new(MemoryProfiles::default());
    profiles.upsert(profile()).expect("profile stored");
    let applications = Arc::new(MemoryApplications::default());
    let service = ApplicationService::new(
        authenticator(),
        jobs.clone(),
        profiles.clone(),
        applications.clone(),
    );
    (service, jobs, profiles, applications)
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    application_router(Arc::new(service))
}

pub(super) fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header")
}

pub(super) fn json_post(
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> axum::http::Request<axum::body::Body> {
    let mut builder =
        axum::http::Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    builder
        .body(axum::body::Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
