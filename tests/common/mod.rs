#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use credibility_checker::api::middleware::rate_limit::RateLimiting;
use credibility_checker::domain::audit_worker::AuditRecorder;
use credibility_checker::domain::entities::{
    CheckRecord, NewAuditEntry, NewReputation, NewUser, ReputationRecord, Session, TrustLabel,
    User,
};
use credibility_checker::domain::repositories::{
    AuditRepository, HistoryRepository, ReputationRepository, SessionRepository, UserRepository,
};
use credibility_checker::domain::scoring::KeywordSet;
use credibility_checker::error::AppError;
use credibility_checker::routes::build_router;
use credibility_checker::state::{AppState, Repositories, SessionSettings};

pub const TEST_SECRET: &str = "test-signing-secret";

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

fn record_from(entry: &NewAuditEntry) -> CheckRecord {
    CheckRecord {
        created_at: Utc::now(),
        headline: None,
        url: None,
        input: Some(entry.input.clone()),
        score: entry.score,
        source_label: entry.source_label.as_str().to_string(),
        flags: entry.flags.clone(),
        verdict: entry.verdict.as_str().to_string(),
    }
}

#[derive(Default)]
pub struct InMemoryReputation {
    records: Mutex<HashMap<String, ReputationRecord>>,
}

impl InMemoryReputation {
    pub fn with(entries: &[(&str, TrustLabel)]) -> Self {
        let repo = Self::default();
        for (domain, label) in entries {
            repo.label(domain, *label);
        }
        repo
    }

    pub fn label(&self, domain: &str, label: TrustLabel) {
        let mut records = self.records.lock().unwrap();
        records.insert(
            domain.to_string(),
            ReputationRecord {
                id: next_id(),
                domain: domain.to_string(),
                label,
                notes: String::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
    }
}

#[async_trait]
impl ReputationRepository for InMemoryReputation {
    async fn find_by_domain(&self, domain: &str) -> Result<Option<ReputationRecord>, AppError> {
        Ok(self.records.lock().unwrap().get(domain).cloned())
    }

    async fn upsert(&self, record: NewReputation) -> Result<ReputationRecord, AppError> {
        let stored = ReputationRecord {
            id: next_id(),
            domain: record.domain.clone(),
            label: record.label,
            notes: record.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.domain, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<ReputationRecord>, AppError> {
        let mut all: Vec<_> = self.records.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(all)
    }

    async fn delete(&self, domain: &str) -> Result<bool, AppError> {
        Ok(self.records.lock().unwrap().remove(domain).is_some())
    }
}

pub struct InMemoryAudit {
    records: Mutex<Vec<CheckRecord>>,
    healthy: AtomicBool,
}

impl Default for InMemoryAudit {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            healthy: AtomicBool::new(true),
        }
    }
}

impl InMemoryAudit {
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }

    pub fn push(&self, record: CheckRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAudit {
    async fn append(&self, entry: NewAuditEntry) -> Result<(), AppError> {
        self.push(record_from(&entry));
        Ok(())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<CheckRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().rev().take(limit as usize).cloned().collect())
    }

    async fn count_by_verdict(&self) -> Result<Vec<(String, i64)>, AppError> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for record in self.records.lock().unwrap().iter() {
            *counts.entry(record.verdict.clone()).or_default() += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct InMemoryHistory {
    records: Mutex<Vec<(i64, CheckRecord)>>,
}

impl InMemoryHistory {
    pub fn push(&self, user_id: i64, record: CheckRecord) {
        self.records.lock().unwrap().push((user_id, record));
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistory {
    async fn append(&self, user_id: i64, entry: NewAuditEntry) -> Result<(), AppError> {
        self.push(user_id, record_from(&entry));
        Ok(())
    }

    async fn recent_for_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<CheckRecord>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .filter(|(owner, _)| *owner == user_id)
            .take(limit as usize)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Email already in use",
                serde_json::json!({}),
            ));
        }

        let user = User {
            id: next_id(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Option<User>, AppError> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.id == id).map(|u| {
            u.name = name.to_string();
            u.updated_at = Utc::now();
            u.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    sessions: Mutex<Vec<Session>>,
    lookups: AtomicUsize,
}

impl InMemorySessions {
    /// Number of `find_active` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create(
        &self,
        user_id: i64,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let session = Session {
            id: next_id(),
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .find(|s| s.token_hash == token_hash && !s.is_expired_at(now))
            .cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .retain(|s| s.token_hash != token_hash);
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| !s.is_expired_at(now));
        Ok((before - sessions.len()) as u64)
    }
}

/// In-memory stores behind a test application, kept for direct inspection.
pub struct TestStores {
    pub reputation: Arc<InMemoryReputation>,
    pub audit: Arc<InMemoryAudit>,
    pub history: Arc<InMemoryHistory>,
    pub users: Arc<InMemoryUsers>,
    pub sessions: Arc<InMemorySessions>,
}

impl TestStores {
    pub fn new() -> Self {
        Self {
            reputation: Arc::new(InMemoryReputation::with(&[
                ("bbc.com", TrustLabel::Trusted),
                ("theonion.com", TrustLabel::Untrusted),
                ("example.com", TrustLabel::Unknown),
            ])),
            audit: Arc::new(InMemoryAudit::default()),
            history: Arc::new(InMemoryHistory::default()),
            users: Arc::new(InMemoryUsers::default()),
            sessions: Arc::new(InMemorySessions::default()),
        }
    }

    fn repositories(&self) -> Repositories {
        Repositories {
            reputation: self.reputation.clone(),
            audit: self.audit.clone(),
            history: self.history.clone(),
            users: self.users.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

pub fn create_test_state(
    stores: &TestStores,
) -> (AppState, mpsc::Receiver<NewAuditEntry>) {
    let (recorder, rx) = AuditRecorder::channel(100);

    let state = AppState::new(
        stores.repositories(),
        KeywordSet::sensational(),
        recorder,
        SessionSettings {
            secret: TEST_SECRET.to_string(),
            ttl: Duration::hours(8),
            cookie_secure: false,
        },
    );

    (state, rx)
}

/// Full application router with rate limiting disabled.
pub fn test_app(stores: &TestStores) -> (Router, mpsc::Receiver<NewAuditEntry>) {
    let (state, rx) = create_test_state(stores);
    (build_router(state, RateLimiting::Disabled), rx)
}

pub fn test_server(stores: &TestStores) -> (TestServer, mpsc::Receiver<NewAuditEntry>) {
    let (app, rx) = test_app(stores);
    (TestServer::new(app).unwrap(), rx)
}

/// Extracts the session token from a `Set-Cookie` header value.
pub fn session_token_from(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.trim().strip_prefix("session="))
        .unwrap()
        .to_string()
}

/// Registers an account and returns its session token.
pub async fn register(server: &TestServer, name: &str, email: &str) -> String {
    let response = server
        .post("/auth/register")
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "correct horse battery",
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let set_cookie = response.header("set-cookie");
    session_token_from(set_cookie.to_str().unwrap())
}

pub fn check_record(input: &str, verdict: &str, score: u8) -> CheckRecord {
    CheckRecord {
        created_at: Utc::now(),
        headline: None,
        url: None,
        input: Some(input.to_string()),
        score,
        source_label: "Unknown".to_string(),
        flags: vec![],
        verdict: verdict.to_string(),
    }
}
