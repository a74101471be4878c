use sha2::{Digest, Sha256};

/// Checks the shared secret the gateway relay sends as a bearer token.
///
/// Only digests are compared, so the comparison time does not depend on
/// how much of the token matched.
pub struct RelayAuth {
    expected_digest: Option<[u8; 32]>,
}

impl RelayAuth {
    pub fn new(token: &str) -> Self {
        Self {
            expected_digest: Some(digest(token)),
        }
    }

    /// Accepts every request. Used when no relay token is configured.
    pub fn new_dev_mode() -> Self {
        Self {
            expected_digest: None,
        }
    }

    pub fn from_config(token: Option<&str>) -> Self {
        match token {
            Some(token) => Self::new(token),
            None => Self::new_dev_mode(),
        }
    }

    pub fn is_dev_mode(&self) -> bool {
        self.expected_digest.is_none()
    }

    pub fn verify(&self, authorization: Option<&str>) -> Result<(), AuthError> {
        let Some(expected) = &self.expected_digest else {
            return Ok(());
        };

        let header = authorization.ok_or(AuthError::MissingToken)?;
        let token = header.strip_prefix("Bearer ").unwrap_or(header);
        if digest(token) == *expected {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

fn digest(token: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(token.as_bytes()));
    out
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
}
