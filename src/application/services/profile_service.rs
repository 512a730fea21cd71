//! Profile service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Reads and updates the caller's own profile.
pub struct ProfileService {
    user_repository: Arc<dyn UserRepository>,
}

impl ProfileService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn get_profile(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Not found", json!({ "user_id": user_id })))
    }

    /// Replaces the display name with the trimmed `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the trimmed name is empty.
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    pub async fn update_name(&self, user_id: i64, name: &str) -> Result<User, AppError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(AppError::bad_request(
                "Name required",
                json!({ "field": "name" }),
            ));
        }

        self.user_repository
            .update_name(user_id, name)
            .await?
            .ok_or_else(|| AppError::not_found("Not found", json!({ "user_id": user_id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_name_trims() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_name()
            .withf(|id, name| *id == 1 && name == "Grace Hopper")
            .times(1)
            .returning(|id, name| Ok(Some(user(id, name))));

        let updated = ProfileService::new(Arc::new(repo))
            .update_name(1, "  Grace Hopper  ")
            .await
            .unwrap();

        assert_eq!(updated.name, "Grace Hopper");
    }

    #[tokio::test]
    async fn test_update_name_rejects_blank() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_name().times(0);

        let err = ProfileService::new(Arc::new(repo))
            .update_name(1, "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Name required");
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let result = ProfileService::new(Arc::new(repo)).get_profile(99).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
