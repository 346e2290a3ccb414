use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use placement_portal::portal::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository,
};
use placement_portal::portal::verification::{
    MailError, Mailer, PortalUser, TokenStore, UserDirectory, VerificationMail,
    VerificationToken,
};
use placement_portal::portal::wizard::{DraftRepository, ProfileDraft};
use placement_portal::portal::{
    Job, JobId, JobRepository, ProfileRepository, RepositoryError, SeedData, SessionStore,
    StudentProfile, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} mutex poisoned")))
}

#[derive(Default)]
pub(crate) struct InMemoryJobRepository {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub(crate) fn with(jobs: Vec<Job>) -> Self {
        let jobs = jobs.into_iter().map(|job| (job.id.clone(), job)).collect();
        Self {
            jobs: Mutex::new(jobs),
        }
    }
}

impl JobRepository for InMemoryJobRepository {
    fn fetch(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(lock(&self.jobs, "job")?.get(id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, StudentProfile>>,
}

impl InMemoryProfileRepository {
    pub(crate) fn with(profiles: Vec<StudentProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();
        Self {
            profiles: Mutex::new(profiles),
        }
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<StudentProfile>, RepositoryError> {
        Ok(lock(&self.profiles, "profile")?.get(user_id).cloned())
    }

    fn upsert(&self, profile: StudentProfile) -> Result<(), RepositoryError> {
        lock(&self.profiles, "profile")?.insert(profile.user_id.clone(), profile);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryApplicationRepository {
    records: Mutex<HashMap<ApplicationId, ApplicationRecord>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = lock(&self.records, "application")?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(lock(&self.records, "application")?.get(id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, UserId>>,
}

impl InMemorySessionStore {
    pub(crate) fn with(sessions: HashMap<String, UserId>) -> Self {
        Self {
            sessions: Mutex::new(sessions),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn resolve(&self, token: &str) -> Result<Option<UserId>, RepositoryError> {
        Ok(lock(&self.sessions, "session")?.get(token).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserDirectory {
    users: Mutex<Vec<PortalUser>>,
}

impl InMemoryUserDirectory {
    pub(crate) fn with(users: Vec<PortalUser>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_email(&self, email: &str) -> Result<Option<PortalUser>, RepositoryError> {
        Ok(lock(&self.users, "user")?
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn mark_verified(&self, id: &UserId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.users, "user")?;
        let user = guard
            .iter_mut()
            .find(|user| &user.id == id)
            .ok_or(RepositoryError::NotFound)?;
        user.email_verified = true;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryTokenStore {
    tokens: Mutex<HashMap<String, VerificationToken>>,
}

impl TokenStore for InMemoryTokenStore {
    fn replace(&self, token: VerificationToken) -> Result<(), RepositoryError> {
        let now = Utc::now();
        let mut guard = lock(&self.tokens, "token")?;
        guard.retain(|_, existing| existing.email != token.email && existing.expires_at > now);
        guard.insert(token.token.clone(), token);
        Ok(())
    }

    fn take(&self, token: &str) -> Result<Option<VerificationToken>, RepositoryError> {
        Ok(lock(&self.tokens, "token")?.remove(token))
    }
}

#[derive(Default)]
pub(crate) struct InMemoryDraftRepository {
    drafts: Mutex<HashMap<UserId, ProfileDraft>>,
}

impl DraftRepository for InMemoryDraftRepository {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileDraft>, RepositoryError> {
        Ok(lock(&self.drafts, "draft")?.get(user_id).cloned())
    }

    fn save(&self, draft: ProfileDraft) -> Result<(), RepositoryError> {
        lock(&self.drafts, "draft")?.insert(draft.user_id.clone(), draft);
        Ok(())
    }
}

/// Mail transport for local deployments: the verification link is written to the log.
#[derive(Default, Clone)]
pub(crate) struct LogMailer;

impl Mailer for LogMailer {
    fn send_verification(&self, mail: &VerificationMail) -> Result<(), MailError> {
        info!(
            to = %mail.to,
            recipient = %mail.recipient_name,
            link = %mail.link,
            expires_at = %mail.expires_at,
            "verification email queued"
        );
        Ok(())
    }
}

/// Every store the HTTP service needs, optionally pre-populated from a seed fixture.
#[derive(Default, Clone)]
pub(crate) struct Stores {
    pub(crate) jobs: Arc<InMemoryJobRepository>,
    pub(crate) profiles: Arc<InMemoryProfileRepository>,
    pub(crate) applications: Arc<InMemoryApplicationRepository>,
    pub(crate) sessions: Arc<InMemorySessionStore>,
    pub(crate) users: Arc<InMemoryUserDirectory>,
    pub(crate) tokens: Arc<InMemoryTokenStore>,
    pub(crate) drafts: Arc<InMemoryDraftRepository>,
}

impl Stores {
    pub(crate) fn seeded(seed: SeedData) -> Self {
        info!(
            users = seed.users.len(),
            sessions = seed.sessions.len(),
            jobs = seed.jobs.len(),
            profiles = seed.profiles.len(),
            "loaded seed data"
        );
        Self {
            jobs: Arc::new(InMemoryJobRepository::with(seed.jobs)),
            profiles: Arc::new(InMemoryProfileRepository::with(seed.profiles)),
            sessions: Arc::new(InMemorySessionStore::with(seed.sessions)),
            users: Arc::new(InMemoryUserDirectory::with(seed.users)),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(value: &str, email: &str, ttl_hours: i64) -> VerificationToken {
        VerificationToken {
            token: value.to_string(),
            email: email.to_string(),
            expires_at: Utc::now() + Duration::hours(ttl_hours),
        }
    }

    #[test]
    fn replacing_a_token_drops_the_previous_one_for_that_email() {
        let store = InMemoryTokenStore::default();
        store.replace(token("first", "a@college.edu", 24)).expect("stored");
        store.replace(token("other", "b@college.edu", 24)).expect("stored");
        store.replace(token("second", "a@college.edu", 24)).expect("stored");

        assert!(store.take("first").expect("readable").is_none());
        assert!(store.take("other").expect("readable").is_some());
        let taken = store.take("second").expect("readable").expect("token present");
        assert_eq!(taken.email, "a@college.edu");
        assert!(store.take("second").expect("readable").is_none());
    }

    #[test]
    fn user_lookup_ignores_email_case() {
        let users = InMemoryUserDirectory::with(vec![PortalUser {
            id: UserId("student-1".into()),
            email: "Asha@College.edu".into(),
            name: None,
            email_verified: false,
        }]);

        let user = users
            .find_by_email("asha@college.edu")
            .expect("readable")
            .expect("user found");
        users.mark_verified(&user.id).expect("marked");
        assert!(users
            .find_by_email("ASHA@college.edu")
            .expect("readable")
            .is_some_and(|user| user.email_verified));
        assert!(matches!(
            users.mark_verified(&UserId("missing".into())),
            Err(RepositoryError::NotFound)
        ));
    }
}
