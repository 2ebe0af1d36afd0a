//! Account registration and authentication.
//!
//! This is the credential manager of the tool: it turns a plaintext password
//! into a stored Argon2id credential at registration, and later verifies a
//! plaintext attempt against that credential at login. The plaintext itself
//! is never persisted and never appears in tracing events.
//!
//! Username uniqueness is enforced by the store's unique constraint rather
//! than a read-then-write check, so the insert is all-or-nothing: a
//! duplicate registration fails with [`RegisterError::UsernameTaken`] and
//! leaves no partial row behind.
//!
//! There is no lockout or backoff on repeated failed logins. For a local
//! single-session tool that is an accepted hardening gap.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::password::{
    hash_password, validate_password_policy, verify_password, PasswordError, PolicyViolation,
};
use crate::models::user::{CreateUser, User};

/// Errors from [`register`].
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// Username was empty
    #[error("username must not be empty")]
    EmptyUsername,

    /// Password violated one or more policy rules
    #[error("password does not satisfy the policy")]
    WeakPassword(Vec<PolicyViolation>),

    /// Username already exists
    #[error("username is already taken")]
    UsernameTaken,

    /// Hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors from [`authenticate`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No user with that username
    #[error("unknown username")]
    UnknownUser,

    /// Password did not match the stored credential
    #[error("invalid password")]
    BadPassword,

    /// Stored credential could not be verified against
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Underlying store failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Registers a new account and returns its user ID.
///
/// The password must satisfy the policy (callers re-prompt on
/// [`RegisterError::WeakPassword`], which carries the violated rules). On
/// success exactly one user row exists for the username; on any failure,
/// none.
///
/// # Errors
///
/// - [`RegisterError::EmptyUsername`] for an empty username
/// - [`RegisterError::WeakPassword`] when the policy is violated
/// - [`RegisterError::UsernameTaken`] when the username already exists
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<i64, RegisterError> {
    if username.is_empty() {
        return Err(RegisterError::EmptyUsername);
    }

    let violations = validate_password_policy(password);
    if !violations.is_empty() {
        return Err(RegisterError::WeakPassword(violations));
    }

    let password_hash = hash_password(password)?;

    let result = User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await;

    match result {
        Ok(user) => {
            info!(username, user_id = user.id, "Registered new user");
            Ok(user.id)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            warn!(username, "Registration rejected: username already taken");
            Err(RegisterError::UsernameTaken)
        }
        Err(e) => Err(e.into()),
    }
}

/// Authenticates a username/password pair and returns the user's ID.
///
/// Verification runs through the Argon2 verifier, so the credential
/// comparison does not short-circuit on the first differing byte.
///
/// # Errors
///
/// - [`AuthError::UnknownUser`] when the username does not exist
/// - [`AuthError::BadPassword`] when the password does not match
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<i64, AuthError> {
    let user = User::find_by_username(pool, username)
        .await?
        .ok_or(AuthError::UnknownUser)?;

    if verify_password(password, &user.password_hash)? {
        info!(username, user_id = user.id, "Login successful");
        Ok(user.id)
    } else {
        warn!(username, "Login failed: invalid password");
        Err(AuthError::BadPassword)
    }
}
