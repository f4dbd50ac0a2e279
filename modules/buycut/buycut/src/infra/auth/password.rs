use async_trait::async_trait;
use tracing::error;

use crate::domain::error::DomainError;
use crate::domain::ports::PasswordHasher;

/// bcrypt on the blocking pool.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
            .await
            .map_err(|e| DomainError::internal(format!("hash task: {e}")))?
            .map_err(|e| DomainError::internal(format!("hash password: {e}")))
    }

    async fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        match tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await {
            Ok(Ok(matches)) => matches,
            Ok(Err(e)) => {
                error!(error = %e, "Stored password digest is unreadable");
                false
            }
            Err(e) => {
                error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let hasher = BcryptHasher::new(4);
        let a = hasher.hash("hunter2").await.unwrap();
        let b = hasher.hash("hunter2").await.unwrap();

        assert_ne!(a, b);
        assert_ne!(a, "hunter2");
        assert!(hasher.verify("hunter2", &a).await);
        assert!(!hasher.verify("hunter3", &a).await);
    }

    #[tokio::test]
    async fn malformed_digest_never_matches() {
        assert!(!BcryptHasher::new(4).verify("x", "plain-text").await);
    }
}
