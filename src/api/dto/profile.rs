//! DTOs for the profile endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::auth::{NAME_REGEX, UserDto};
use crate::domain::entities::User;

/// Display name change. Same rules as the name given at registration.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name required"))]
    #[validate(regex(path = *NAME_REGEX, message = "Name may contain only letters and spaces"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserDto,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self { user: user.into() }
    }
}
