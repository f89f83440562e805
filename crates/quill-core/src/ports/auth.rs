//! Authentication ports: token issuance/verification and password hashing.

/// Claims carried by a bearer token. Kept deliberately minimal: the subject
/// (a username) and the expiration timestamp, nothing else.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: String,
    pub exp: i64,
}

/// Signed, time-limited bearer tokens binding a username.
pub trait TokenService: Send + Sync {
    /// Issue a token for the given subject.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Verify a token and return its claims.
    ///
    /// Bad signature, malformed structure, and expiry all collapse into
    /// [`AuthError::InvalidToken`]; the distinction may be logged but is
    /// never surfaced to the caller.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// One-way password hashing.
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password. Each call salts independently, so hashing
    /// the same password twice yields different strings.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A malformed hash verifies
    /// as `false` rather than erroring.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,

    #[error("missing authorization header")]
    MissingAuth,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}
