//! DTOs for account endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::User;

/// Display names: letters and spaces only.
/// Letters and spaces, with at least one letter.
pub(crate) static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z][A-Za-z\s]*$").expect("valid name regex"));

/// Loose email shape: `something@something.something` without whitespace.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    #[validate(regex(path = *NAME_REGEX, message = "Name may contain only letters and spaces"))]
    pub name: String,

    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email address"))]
    #[validate(length(max = 254, message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 512, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Response for register, login and me.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub ok: bool,
    pub user: UserDto,
}

impl From<User> for AuthResponse {
    fn from(user: User) -> Self {
        Self {
            ok: true,
            user: user.into(),
        }
    }
}

/// Response for logout.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
