//! User accounts, credential checks, and bearer-token sessions.
//!
//! Leaf dependency for every other workflow: rooms and applications reference
//! students by [`UserId`], and every HTTP handler resolves its caller here.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{CredentialDigest, Gender, RegisterForm, Role, User, UserId, UserView};
pub use repository::{Session, TokenStore, UserRepository};
pub use service::{AuthError, IdentityService, IssuedToken};
