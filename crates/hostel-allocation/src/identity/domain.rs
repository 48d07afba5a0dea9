use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::FieldError;

/// Identifier wrapper for user accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

/// Salted SHA-256 digest of a password, compared in constant time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDigest {
    salt: String,
    digest: String,
}

impl CredentialDigest {
    pub fn new(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::derive(password, &salt);
        Self { salt, digest }
    }

    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::derive(password, &self.salt);
        constant_time_eq(candidate.as_bytes(), self.digest.as_bytes())
    }

    fn derive(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b":");
        hasher.update(password.as_bytes());
        let digest = hasher.finalize();
        digest.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

/// A student or administrator account. Holds no room pointer: whether a
/// student is housed is derived from the room ledger by lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub matric_number: Option<String>,
    pub gender: Gender,
    pub role: Role,
    pub credential: CredentialDigest,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}

/// Serializable account view with the credential stripped.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matric_number: Option<String>,
    pub gender: Gender,
    pub role: Role,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            matric_number: user.matric_number.clone(),
            gender: user.gender,
            role: user.role,
        }
    }
}

/// Self-registration payload for student accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub matric_number: String,
    pub gender: Gender,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(FieldError::new("full_name", "full name is required"));
        }
        if !plausible_email(&self.email) {
            errors.push(FieldError::new("email", "a valid email address is required"));
        }
        if self.matric_number.trim().is_empty() {
            errors.push(FieldError::new(
                "matric_number",
                "matriculation number is required",
            ));
        }
        if self.password.len() < 8 {
            errors.push(FieldError::new(
                "password",
                "password must be at least 8 characters",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn plausible_email(value: &str) -> bool {
    let trimmed = value.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
