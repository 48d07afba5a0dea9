use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{User, UserId};
use crate::error::RepositoryError;

/// Storage abstraction over user accounts.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: User) -> Result<User, RepositoryError>;
    fn update(&self, user: User) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn fetch_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    fn list(&self) -> Result<Vec<User>, RepositoryError>;
}

/// An issued bearer token and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Storage abstraction over active sessions.
pub trait TokenStore: Send + Sync {
    fn insert(&self, session: Session) -> Result<(), RepositoryError>;
    fn fetch(&self, token: &str) -> Result<Option<Session>, RepositoryError>;
    fn revoke(&self, token: &str) -> Result<(), RepositoryError>;
}
