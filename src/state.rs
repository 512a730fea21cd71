//! Shared application state injected into every handler.

use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AnalysisService, AuthService, HistoryService, ProfileService};
use crate::domain::audit_worker::AuditRecorder;
use crate::domain::repositories::{
    AuditRepository, HistoryRepository, ReputationRepository, SessionRepository, UserRepository,
};
use crate::domain::scoring::KeywordSet;
use crate::infrastructure::persistence::{
    PgAuditRepository, PgHistoryRepository, PgReputationRepository, PgSessionRepository,
    PgUserRepository,
};

/// The set of stores the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub reputation: Arc<dyn ReputationRepository>,
    pub audit: Arc<dyn AuditRepository>,
    pub history: Arc<dyn HistoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            reputation: Arc::new(PgReputationRepository::new(pool.clone())),
            audit: Arc::new(PgAuditRepository::new(pool.clone())),
            history: Arc::new(PgHistoryRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
        }
    }
}

/// Session settings applied to login responses.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub ttl: Duration,
    pub cookie_secure: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub history_service: Arc<HistoryService>,
    pub auth_service: Arc<AuthService>,
    pub profile_service: Arc<ProfileService>,
    pub audit_recorder: AuditRecorder,
    pub cookie_secure: bool,
}

impl AppState {
    /// Wires services on top of `repositories`.
    pub fn new(
        repositories: Repositories,
        keywords: KeywordSet,
        audit_recorder: AuditRecorder,
        session: SessionSettings,
    ) -> Self {
        let analysis_service = AnalysisService::new(
            repositories.reputation,
            Arc::new(keywords),
            audit_recorder.clone(),
        );
        let history_service =
            HistoryService::new(repositories.audit.clone(), repositories.history.clone());
        let auth_service = AuthService::new(
            repositories.users.clone(),
            repositories.sessions.clone(),
            session.secret,
            session.ttl,
        );
        let profile_service = ProfileService::new(repositories.users.clone());

        Self {
            analysis_service: Arc::new(analysis_service),
            history_service: Arc::new(history_service),
            auth_service: Arc::new(auth_service),
            profile_service: Arc::new(profile_service),
            audit_recorder,
            cookie_secure: session.cookie_secure,
        }
    }
}
