use crate::internal::claims::Claims;
use crate::{AuthorizeError, PinnedKey, Principal};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::debug;

//--------------------------------------------------------------------------------------------------
// Token envelope
//--------------------------------------------------------------------------------------------------

const EXPECTED_ALGORITHM: Algorithm = Algorithm::RS256;
const EXPECTED_ALGORITHM_NAME: &str = "RS256";

// Only the algorithm is read before the signature is checked. Kept as a plain string so that
// names jsonwebtoken does not know (eg "none") are still reported as a rejected algorithm
#[derive(Deserialize)]
struct EnvelopeHeader {
    alg: String,
}

fn check_envelope(token: &str) -> Result<(), AuthorizeError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        debug!("Token does not have three segments");
        return Err(AuthorizeError::MalformedToken);
    };

    if header.is_empty() || payload.is_empty() {
        debug!("Token has an empty header or payload segment");
        return Err(AuthorizeError::MalformedToken);
    }

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthorizeError::MalformedToken)?;
    let header: EnvelopeHeader =
        serde_json::from_slice(&header).map_err(|_| AuthorizeError::MalformedToken)?;

    if header.alg != EXPECTED_ALGORITHM_NAME {
        debug!("Token declares unexpected algorithm {:?}", header.alg);
        return Err(AuthorizeError::InvalidSignature);
    }

    // The full header must also be one jsonwebtoken accepts, so that a JSON error from decode()
    // below can only come from the claims
    decode_header(token).map_err(|_| AuthorizeError::MalformedToken)?;

    Ok(())
}

fn classify(kind: &ErrorKind) -> AuthorizeError {
    match kind {
        ErrorKind::InvalidToken | ErrorKind::Base64(_) => AuthorizeError::MalformedToken,
        ErrorKind::Json(_) | ErrorKind::Utf8(_) | ErrorKind::MissingRequiredClaim(_) => {
            AuthorizeError::MalformedClaims
        }
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::InvalidSubject => {
            AuthorizeError::ClaimMismatch
        }
        ErrorKind::ExpiredSignature => AuthorizeError::ExpiredToken,
        ErrorKind::ImmatureSignature => AuthorizeError::PrematureToken,
        // InvalidSignature, InvalidAlgorithm and the key/crypto failures
        _ => AuthorizeError::InvalidSignature,
    }
}

//--------------------------------------------------------------------------------------------------
// Verifier
//--------------------------------------------------------------------------------------------------

/// Verifies encoded tokens against the pinned key and yields the caller's principal.
///
/// Only RS256 is accepted. Expiry and not-before are compared against the time handed to
/// [`Verifier::verify_at`] with no leeway, so a token whose `exp` is the current second is still
/// valid and one a second older is not.
#[derive(Clone)]
pub struct Verifier {
    key: PinnedKey,
    validation: Validation,
}

impl Verifier {
    pub fn new(key: PinnedKey) -> Self {
        let mut validation = Validation::new(EXPECTED_ALGORITHM);

        // Times are checked in verify_at against an explicit clock; presence and type of sub and
        // exp are enforced by deserializing into Claims
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Verifier { key, validation }
    }

    /// Require the `iss` claim to be present and equal to `issuer`
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.validation
            .required_spec_claims
            .insert("iss".to_string());
        self
    }

    /// Require the `aud` claim to be present and contain `audience`
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.validation
            .required_spec_claims
            .insert("aud".to_string());
        self
    }

    pub fn verify(&self, token: &str) -> Result<Principal, AuthorizeError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<Principal, AuthorizeError> {
        check_envelope(token)?;

        let claims = match decode::<Claims>(token, self.key.decoding_key(), &self.validation) {
            Ok(token) => token.claims,
            Err(err) => {
                debug!("Token failed validation: {:?}", err.kind());
                return Err(classify(err.kind()));
            }
        };

        if claims.sub().as_str().is_empty() {
            debug!("Token has an empty subject");
            return Err(AuthorizeError::MalformedClaims);
        }

        if claims.exp().is_before(now) {
            return Err(AuthorizeError::ExpiredToken);
        }

        if claims.nbf().is_some_and(|nbf| nbf.is_after(now)) {
            return Err(AuthorizeError::PrematureToken);
        }

        debug!("Token validated for {} issued by {:?}", claims.sub(), claims.iss());

        Ok(claims.into_sub())
    }
}

//--------------------------------------------------------------------------------------------------
