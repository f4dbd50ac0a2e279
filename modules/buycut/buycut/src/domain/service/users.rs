use std::sync::Arc;

use buycut_sdk::{LoginGrant, NewUser, User};
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::{PasswordHasher, TokenIssuer};
use crate::domain::repo::{UserRecord, UserRepository};
use crate::domain::service::required;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            hasher,
            tokens,
        }
    }

    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn register(&self, new: NewUser) -> Result<User, DomainError> {
        info!("Registering user");

        let name = required("name", &new.name)?;
        let email = required("email", &new.email)?;
        if !is_valid_email(&email) {
            return Err(DomainError::validation("email", "invalid email format"));
        }
        if new.password.is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }

        let password_hash = self.hasher.hash(&new.password).await?;
        let user = self
            .repo
            .create(UserRecord {
                name,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown e-mail and wrong password produce the same error.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginGrant, DomainError> {
        let email = required("email", email)?;
        if password.is_empty() {
            return Err(DomainError::validation("password", "must not be empty"));
        }

        let Some(credentials) = self.repo.find_by_email(&email).await? else {
            warn!("Login attempt for unknown email");
            return Err(DomainError::invalid_credentials());
        };

        if !self
            .hasher
            .verify(password, &credentials.password_hash)
            .await
        {
            warn!(user_id = credentials.user.id, "Login attempt with wrong password");
            return Err(DomainError::invalid_credentials());
        }

        let access_token = self.tokens.issue(credentials.user.id)?;
        info!(user_id = credentials.user.id, "User logged in");
        Ok(LoginGrant {
            user: credentials.user,
            access_token,
        })
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
