use crate::bearer::bearer_token;
use crate::{AuthorizeError, AuthorizerResponse, Principal, Verifier};
use time::OffsetDateTime;
use tracing::{debug, warn};

//--------------------------------------------------------------------------------------------------
// Decision
//--------------------------------------------------------------------------------------------------

/// Outcome of authorizing one request. The failure reason on a deny is for logging only; the
/// response rendered from it is the same opaque deny whatever the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow(Principal),
    Deny(AuthorizeError),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow(_))
    }

    pub fn response(&self) -> AuthorizerResponse {
        match self {
            Decision::Allow(principal) => AuthorizerResponse::allow(principal),
            Decision::Deny(_) => AuthorizerResponse::deny(),
        }
    }
}

impl From<Result<Principal, AuthorizeError>> for Decision {
    fn from(result: Result<Principal, AuthorizeError>) -> Self {
        match result {
            Ok(principal) => Decision::Allow(principal),
            Err(err) => Decision::Deny(err),
        }
    }
}

impl From<Decision> for AuthorizerResponse {
    fn from(decision: Decision) -> Self {
        decision.response()
    }
}

//--------------------------------------------------------------------------------------------------
// Authorizer
//--------------------------------------------------------------------------------------------------

/// Runs header extraction then verification for each request. Holds no per-request state, so a
/// single instance is shared across all requests.
#[derive(Clone)]
pub struct Authorizer {
    verifier: Verifier,
}

impl Authorizer {
    pub fn new(verifier: Verifier) -> Self {
        Authorizer { verifier }
    }

    pub fn evaluate(&self, header: Option<&str>) -> Result<Principal, AuthorizeError> {
        self.evaluate_at(header, OffsetDateTime::now_utc())
    }

    pub fn evaluate_at(
        &self,
        header: Option<&str>,
        now: OffsetDateTime,
    ) -> Result<Principal, AuthorizeError> {
        let token = bearer_token(header)?;
        self.verifier.verify_at(token, now)
    }

    pub fn authorize(&self, header: Option<&str>) -> Decision {
        self.authorize_at(header, OffsetDateTime::now_utc())
    }

    pub fn authorize_at(&self, header: Option<&str>, now: OffsetDateTime) -> Decision {
        let decision = Decision::from(self.evaluate_at(header, now));

        match &decision {
            Decision::Allow(principal) => debug!("User {} was authorized", principal),
            Decision::Deny(err) => warn!(kind = err.kind(), "User not authorized: {}", err),
        }

        decision
    }
}

//--------------------------------------------------------------------------------------------------
