use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Authorization failures
//--------------------------------------------------------------------------------------------------

/// Why a request was denied. Every variant collapses to the same deny decision, so none of the
/// detail here ever reaches the caller; it exists for logging and for tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizeError {
    #[error("no authorization header")]
    MissingHeader,
    #[error("authorization header is not a bearer credential")]
    MalformedHeader,
    #[error("token is not a compact signed token")]
    MalformedToken,
    #[error("token signature or algorithm rejected")]
    InvalidSignature,
    #[error("token has expired")]
    ExpiredToken,
    #[error("token is not valid yet")]
    PrematureToken,
    #[error("token claims are missing or mistyped")]
    MalformedClaims,
    #[error("token issuer or audience does not match")]
    ClaimMismatch,
}

impl AuthorizeError {
    /// Stable identifier for the failure, suitable for structured log fields
    pub fn kind(&self) -> &'static str {
        match self {
            AuthorizeError::MissingHeader => "missing_header",
            AuthorizeError::MalformedHeader => "malformed_header",
            AuthorizeError::MalformedToken => "malformed_token",
            AuthorizeError::InvalidSignature => "invalid_signature",
            AuthorizeError::ExpiredToken => "expired_token",
            AuthorizeError::PrematureToken => "premature_token",
            AuthorizeError::MalformedClaims => "malformed_claims",
            AuthorizeError::ClaimMismatch => "claim_mismatch",
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Key loading failures
//--------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("failed to read key material from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("key material is not an RSA certificate or public key: {0}")]
    Pem(#[from] jsonwebtoken::errors::Error),
}

//--------------------------------------------------------------------------------------------------
