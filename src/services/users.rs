//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateUser, Role, SessionClaims, User, UserShort},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Verify a password for `username`. Unknown users verify as `false`.
    pub async fn verify(&self, username: &str, password: &str) -> AppResult<bool> {
        match self.repository.users.get_by_username(username).await? {
            Some(user) => verify_password(&user.password, password),
            None => Ok(false),
        }
    }

    /// Role of `username`, `NotFound` if no such user
    pub async fn role_of(&self, username: &str) -> AppResult<Role> {
        self.repository
            .users
            .get_by_username(username)
            .await?
            .map(|user| user.role)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    /// Authenticate by username and password and issue a session token
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, Role)> {
        let invalid = || AppError::Authentication("Invalid student id or password".to_string());

        if !self.verify(username, password).await? {
            tracing::warn!(username, "Failed login attempt");
            return Err(invalid());
        }

        let role = match self.role_of(username).await {
            Ok(role) => role,
            Err(AppError::NotFound(_)) => return Err(invalid()),
            Err(e) => return Err(e),
        };

        let token = SessionClaims::new(username, role, self.config.session_ttl_hours)
            .create_token(&self.config.session_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(username, %role, "User logged in");
        Ok((token, role))
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<UserShort>> {
        self.repository.users.list().await
    }

    /// Create a new user
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.username_exists(&user.username).await? {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let hash = hash_password(&user.password)?;
        let role = user.role.unwrap_or_default();
        let created = self.repository.users.create(&user.username, &hash, role).await?;

        tracing::info!(username = %created.username, %role, "User created");
        Ok(created)
    }

    /// Database round trip, used by readiness checks
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash string
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "password").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        assert_ne!(hash_password("password").unwrap(), hash_password("password").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let err = verify_password("not-a-hash", "password").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
