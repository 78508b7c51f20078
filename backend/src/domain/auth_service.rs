//! Account registration, login and bearer-token authentication.
//!
//! Passwords are stored as salted, iterated SHA-256. Session tokens are
//! opaque random hex strings; only their SHA-256 hash is persisted.
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::domain::commands::auth::{LoginCommand, LoginResult, RegisterCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::user::NewUser;
use crate::storage::{Connection, UserStorage};

/// Token byte length before hex encoding (32 bytes = 64 hex chars).
const TOKEN_BYTES: usize = 32;

/// Salt byte length for password hashing.
const SALT_BYTES: usize = 16;

/// Number of SHA-256 iterations for password stretching.
const HASH_ITERATIONS: u32 = 100_000;

const MIN_PASSWORD_LEN: usize = 8;

const INVALID_LOGIN: &str = "Invalid email or password";

#[derive(Clone)]
pub struct AuthService<C: Connection> {
    user_repository: C::UserRepository,
    session_ttl_secs: u64,
}

impl<C: Connection> AuthService<C> {
    pub fn new(connection: Arc<C>, session_ttl_secs: u64) -> Self {
        Self {
            user_repository: connection.create_user_repository(),
            session_ttl_secs,
        }
    }

    /// Register a new account. Returns the new user id.
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<i64> {
        let email = normalize_email(&command.email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("A valid email address is required".to_string()));
        }
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name cannot be empty".to_string()));
        }
        if command.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let salt = random_hex(SALT_BYTES);
        let new_user = NewUser {
            email: email.clone(),
            name: name.to_string(),
            password_hash: hash_password_blocking(&command.password, &salt).await?,
            salt,
        };

        match self.user_repository.insert_user(&new_user).await? {
            Some(user_id) => {
                info!("Registered user {}", user_id);
                Ok(user_id)
            }
            None => Err(DomainError::Conflict(format!("Email {} is already registered", email))),
        }
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, command: LoginCommand) -> DomainResult<LoginResult> {
        let email = normalize_email(&command.email);
        let Some(user) = self.user_repository.find_user_by_email(&email).await? else {
            // Burn the same work as a real check so timing does not reveal unknown emails.
            let _ = hash_password_blocking(&command.password, "00000000000000000000000000000000").await?;
            warn!("Login failed for unknown email");
            return Err(DomainError::InvalidCredential(INVALID_LOGIN.to_string()));
        };

        let attempt = hash_password_blocking(&command.password, &user.salt).await?;
        if !bool::from(attempt.as_bytes().ct_eq(user.password_hash.as_bytes())) {
            warn!("Login failed for user {}", user.id);
            return Err(DomainError::InvalidCredential(INVALID_LOGIN.to_string()));
        }

        let now = epoch_secs();
        let removed = self.user_repository.delete_expired_sessions(now).await?;
        if removed > 0 {
            info!("Pruned {} expired sessions", removed);
        }

        let token = random_hex(TOKEN_BYTES);
        let expires_at = now.saturating_add(i64::try_from(self.session_ttl_secs).unwrap_or(i64::MAX));
        self.user_repository
            .store_session(&hash_token(&token), user.id, expires_at)
            .await?;

        info!("User {} logged in", user.id);
        Ok(LoginResult {
            token,
            user_id: user.id,
            name: user.name,
        })
    }

    /// Revoke a session token. Unknown tokens are not an error.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        if self.user_repository.delete_session(&hash_token(token)).await? {
            info!("Session revoked");
        }
        Ok(())
    }

    /// Resolve a bearer token to the user id it was issued to.
    pub async fn authenticate(&self, token: Option<&str>) -> DomainResult<i64> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(DomainError::Unauthenticated),
        };

        self.user_repository
            .find_session(&hash_token(token), epoch_secs())
            .await?
            .map(|session| session.user_id)
            .ok_or_else(|| DomainError::InvalidCredential("Invalid or expired token".to_string()))
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a password with salt using iterated SHA-256.
fn hash_password(password: &str, salt: &str) -> String {
    let mut hash = Sha256::new();
    hash.update(salt.as_bytes());
    hash.update(password.as_bytes());
    let mut result = hash.finalize();

    for _ in 1..HASH_ITERATIONS {
        let mut h = Sha256::new();
        h.update(result);
        h.update(salt.as_bytes());
        result = h.finalize();
    }

    hex::encode(result)
}

/// Run blocking work on tokio's blocking pool so request workers stay free.
async fn run_blocking<T, F>(work: F) -> DomainResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| DomainError::Storage(anyhow::Error::new(e).context("Blocking task failed")))
}

async fn hash_password_blocking(password: &str, salt: &str) -> DomainResult<String> {
    let password = password.to_string();
    let salt = salt.to_string();
    run_blocking(move || hash_password(&password, &salt)).await
}

/// Tokens are already high-entropy; a single pass is enough for lookup.
fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
