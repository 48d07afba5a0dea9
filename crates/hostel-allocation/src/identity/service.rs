use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::domain::{CredentialDigest, Gender, RegisterForm, Role, User, UserId, UserView};
use super::repository::{Session, TokenStore, UserRepository};
use crate::error::AppError;

/// Authentication and authorization failures. Every variant except
/// `Forbidden` surfaces as 401; `Forbidden` is 403.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("invalid or unknown token")]
    InvalidToken,
    #[error("token expired")]
    ExpiredToken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("insufficient permissions")]
    Forbidden,
}

/// Login result returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

/// Account registration, credential checks, and token resolution.
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenStore>,
    token_ttl: Duration,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenStore>,
        token_ttl_minutes: i64,
    ) -> Self {
        Self {
            users,
            tokens,
            token_ttl: Duration::minutes(token_ttl_minutes.max(1)),
        }
    }

    /// Create a student account from a self-registration form.
    pub fn register(&self, form: RegisterForm) -> Result<User, AppError> {
        form.validate().map_err(AppError::validation)?;

        let email = form.email.trim().to_ascii_lowercase();
        if self.users.fetch_by_email(&email)?.is_some() {
            return Err(AppError::conflict("an account with this email already exists"));
        }

        let user = User {
            id: UserId::generate(),
            full_name: form.full_name.trim().to_string(),
            email,
            matric_number: Some(form.matric_number.trim().to_string()),
            gender: form.gender,
            role: Role::Student,
            credential: CredentialDigest::new(&form.password),
            created_at: Utc::now(),
        };

        Ok(self.users.insert(user)?)
    }

    /// Provision an administrator account. Used at bootstrap, never exposed
    /// through self-registration. Idempotent on email.
    pub fn provision_admin(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        gender: Gender,
    ) -> Result<User, AppError> {
        let email = email.trim().to_ascii_lowercase();
        if let Some(existing) = self.users.fetch_by_email(&email)? {
            return Ok(existing);
        }

        let user = User {
            id: UserId::generate(),
            full_name: full_name.trim().to_string(),
            email,
            matric_number: None,
            gender,
            role: Role::Admin,
            credential: CredentialDigest::new(password),
            created_at: Utc::now(),
        };

        Ok(self.users.insert(user)?)
    }

    /// Verify credentials and issue an opaque bearer token.
    pub fn login(&self, email: &str, password: &str) -> Result<IssuedToken, AppError> {
        let email = email.trim().to_ascii_lowercase();
        let user = self
            .users
            .fetch_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.credential.verify(password) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let issued_at = Utc::now();
        let session = Session {
            token: Uuid::new_v4().simple().to_string(),
            user: user.id.clone(),
            issued_at,
            expires_at: issued_at + self.token_ttl,
        };
        self.tokens.insert(session.clone())?;

        tracing::info!(user = %user.email, "session issued");

        Ok(IssuedToken {
            token: session.token,
            expires_at: session.expires_at,
            user: UserView::from(&user),
        })
    }

    /// Resolve the bearer token on a request to a `User`. Missing, malformed,
    /// unknown, and expired tokens are distinct failures.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let token = bearer_token(headers)?;

        let session = self
            .tokens
            .fetch(token)?
            .ok_or(AuthError::InvalidToken)?;

        if session.expires_at <= Utc::now() {
            self.tokens.revoke(token)?;
            return Err(AuthError::ExpiredToken.into());
        }

        let user = self
            .users
            .fetch(&session.user)?
            .ok_or(AuthError::InvalidToken)?;
        Ok(user)
    }

    pub fn require_admin(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let user = self.authenticate(headers)?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden.into())
        }
    }

    pub fn require_student(&self, headers: &HeaderMap) -> Result<User, AppError> {
        let user = self.authenticate(headers)?;
        if user.is_student() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden.into())
        }
    }

    pub fn fetch(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.fetch(id)?)
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .ok_or(AuthError::MalformedHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}
