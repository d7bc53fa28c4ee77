//! Bearer-token authorizer for the TODO API.
//!
//! A request's `Authorization` header is reduced to an [`AuthorizerResponse`]: the token is
//! pulled out of the header, its RS256 signature checked against a [`PinnedKey`], its claims
//! validated, and the result rendered as an allow or deny policy document.

mod authorizer;
mod bearer;
mod error;
#[cfg(feature = "axum-extract")]
pub mod extract;
pub(crate) mod internal;
mod key;
mod policy;
mod types;
mod verifier;

pub use authorizer::{Authorizer, Decision};
pub use bearer::bearer_token;
pub use error::{AuthorizeError, KeyError};
pub use key::PinnedKey;
pub use policy::{
    AuthorizerResponse, Effect, PolicyDocument, Statement, ALL_RESOURCES, ANONYMOUS_PRINCIPAL,
    INVOKE_ACTION, POLICY_VERSION,
};
pub use types::Principal;
pub use verifier::Verifier;

//--------------------------------------------------------------------------------------------------
