//! Account and session service.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{Identity, NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::utils::passwords::{hash_password, verify_password};
use crate::utils::session_token::generate_token;

type HmacSha256 = Hmac<Sha256>;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// A freshly opened session.
///
/// `token` is the raw value handed to the client; it is never stored.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Service for registering accounts and managing login sessions.
///
/// Session tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`)
/// before storage and comparison. An attacker with read-only access to the
/// database cannot forge a session without the server-side secret.
pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    session_repository: Arc<dyn SessionRepository>,
    signing_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `signing_secret` - HMAC key for session token hashes
    /// - `session_ttl` - lifetime of a new session
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        session_repository: Arc<dyn SessionRepository>,
        signing_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            signing_secret,
            session_ttl,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Creates an account and opens a session for it.
    ///
    /// `name` is trimmed and `email` lower-cased before storage. Field format
    /// rules are enforced by the request DTO.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, AppError> {
        let email = normalize_email(email);

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email already in use",
                json!({ "email": email }),
            ));
        }

        let password_hash = hash_blocking(password.to_string()).await?;

        let user = self
            .user_repository
            .create(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Account registered");

        self.open_session(user).await
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with "Invalid credentials" if the
    /// email is unknown or the password does not match.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AppError> {
        let email = normalize_email(email);

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            return Err(invalid_credentials());
        };

        if !verify_blocking(password.to_string(), user.password_hash.clone()).await? {
            return Err(invalid_credentials());
        }

        self.open_session(user).await
    }

    /// Revokes the session identified by `token_hash`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, token_hash: &str) -> Result<(), AppError> {
        self.session_repository.delete(token_hash).await
    }

    /// Resolves a raw session token to the caller's identity.
    ///
    /// Returns `Ok(None)` for unknown or expired tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<Identity>, AppError> {
        let token_hash = self.hash_token(token);

        let session = self
            .session_repository
            .find_active(&token_hash, Utc::now())
            .await?;

        Ok(session.map(|s| Identity {
            user_id: s.user_id,
            token_hash: s.token_hash,
        }))
    }

    /// Loads the account behind an identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the account no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn current_user(&self, identity: &Identity) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(identity.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized", json!({})))
    }

    /// Deletes all sessions that have expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        self.session_repository.delete_expired(Utc::now()).await
    }

    async fn open_session(&self, user: User) -> Result<LoginOutcome, AppError> {
        let token = generate_token().map_err(|e| {
            tracing::error!(error = %e, "Failed to generate session token");
            AppError::internal("Internal server error", json!({}))
        })?;
        let expires_at = Utc::now() + self.session_ttl;

        self.session_repository
            .create(user.id, &self.hash_token(&token), expires_at)
            .await?;

        Ok(LoginOutcome {
            user,
            token,
            expires_at,
        })
    }
}

/// Deletes expired sessions every `period`, starting immediately.
///
/// Runs until the task is aborted. A failed sweep is logged and retried on
/// the next tick.
pub async fn run_session_purger(auth_service: Arc<AuthService>, period: std::time::Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match auth_service.purge_expired_sessions().await {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Expired sessions purged"),
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, json!({}))
}

async fn hash_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing task failed");
            AppError::internal("Internal server error", json!({}))
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AppError::internal("Internal server error", json!({}))
        })
}

async fn verify_blocking(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AppError::internal("Internal server error", json!({}))
        })?
        .or_else(|e| {
            // A corrupt stored hash can never match.
            tracing::warn!(error = %e, "Stored password hash is unreadable");
            Ok(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Session;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn user(id: i64, email: &str, password: &str) -> User {
        User {
            id,
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn session(user_id: i64, token_hash: &str, expires_at: DateTime<Utc>) -> Session {
        Session {
            id: 1,
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    fn service(users: MockUserRepository, sessions: MockSessionRepository) -> AuthService {
        AuthService::new(
            Arc::new(users),
            Arc::new(sessions),
            test_secret(),
            Duration::hours(8),
        )
    }

    #[tokio::test]
    async fn test_register_creates_user_and_session() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|u| {
                u.name == "Ada Lovelace"
                    && u.email == "ada@example.com"
                    && u.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|u| {
                Ok(User {
                    id: 5,
                    name: u.name,
                    email: u.email,
                    password_hash: u.password_hash,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });
        sessions
            .expect_create()
            .withf(|user_id, hash, _| *user_id == 5 && hash.len() == 64)
            .times(1)
            .returning(|user_id, hash, expires_at| Ok(session(user_id, hash, expires_at)));

        let outcome = service(users, sessions)
            .register(" Ada Lovelace ", "Ada@Example.com", "long-password")
            .await
            .unwrap();

        assert_eq!(outcome.user.id, 5);
        assert_eq!(outcome.token.len(), 43);
        assert!(outcome.expires_at > Utc::now() + Duration::hours(7));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user(1, email, "whatever-pass"))));
        users.expect_create().times(0);

        let result = service(users, MockSessionRepository::new())
            .register("Ada", "ada@example.com", "long-password")
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user(3, email, "right-password"))));
        sessions
            .expect_create()
            .times(1)
            .returning(|user_id, hash, expires_at| Ok(session(user_id, hash, expires_at)));

        let outcome = service(users, sessions)
            .login("ada@example.com", "right-password")
            .await
            .unwrap();

        assert_eq!(outcome.user.id, 3);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut users = MockUserRepository::new();
        let mut sessions = MockSessionRepository::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(user(3, email, "right-password"))));
        sessions.expect_create().times(0);

        let err = service(users, sessions)
            .login("ada@example.com", "wrong-password")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized { .. }));
        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(users, MockSessionRepository::new())
            .login("nobody@example.com", "whatever-pass")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_resolve_session_hashes_token() {
        let mut sessions = MockSessionRepository::new();
        let expected_hash = compute_expected_hash("raw-token");

        sessions
            .expect_find_active()
            .withf(move |hash, _| hash == expected_hash)
            .times(1)
            .returning(|hash, _| Ok(Some(session(9, hash, Utc::now() + Duration::hours(1)))));

        let identity = service(MockUserRepository::new(), sessions)
            .resolve_session("raw-token")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(identity.user_id, 9);
        assert_eq!(identity.token_hash, compute_expected_hash("raw-token"));
    }

    #[tokio::test]
    async fn test_resolve_unknown_session() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_active()
            .times(1)
            .returning(|_, _| Ok(None));

        let identity = service(MockUserRepository::new(), sessions)
            .resolve_session("stale")
            .await
            .unwrap();

        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn test_current_user_missing_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let identity = Identity {
            user_id: 1,
            token_hash: "h".to_string(),
        };
        let result = service(users, MockSessionRepository::new())
            .current_user(&identity)
            .await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_purger_sweeps_every_period() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let calls = Arc::new(AtomicUsize::new(0));
        let mut sessions = MockSessionRepository::new();
        let counter = calls.clone();
        sessions.expect_delete_expired().returning(move |_| {
            // The first sweep fails; later ones must still run.
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Err(AppError::internal("down", json!({}))),
                _ => Ok(2),
            }
        });

        let auth = Arc::new(service(MockUserRepository::new(), sessions));
        let period = std::time::Duration::from_secs(60);
        let task = tokio::spawn(run_session_purger(auth, period));

        tokio::time::sleep(period * 2 + period / 2).await;
        task.abort();

        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn test_hash_token_consistency() {
        let svc = service(MockUserRepository::new(), MockSessionRepository::new());

        assert_eq!(svc.hash_token("test-token"), svc.hash_token("test-token"));
        assert_eq!(svc.hash_token("test-token").len(), 64);
        assert_ne!(svc.hash_token("token1"), svc.hash_token("token2"));
    }

    #[test]
    fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            "secret-a".to_string(),
            Duration::hours(1),
        );
        let svc2 = AuthService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockSessionRepository::new()),
            "secret-b".to_string(),
            Duration::hours(1),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
