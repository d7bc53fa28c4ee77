use crate::internal::unixtime::UnixTimestamp;
use crate::Principal;
use serde::Deserialize;

//--------------------------------------------------------------------------------------------------
// JWT Claims object
//--------------------------------------------------------------------------------------------------

// Anything else in the payload (aud, iat, scope, ...) is ignored here; audience is checked by
// jsonwebtoken when one is configured
#[derive(Deserialize)]
pub(crate) struct Claims {
    sub: Principal,
    exp: UnixTimestamp,
    #[serde(default)]
    nbf: Option<UnixTimestamp>,
    #[serde(default)]
    iss: Option<String>,
}

impl Claims {
    pub(crate) fn sub(&self) -> &Principal {
        &self.sub
    }

    pub(crate) fn exp(&self) -> UnixTimestamp {
        self.exp
    }

    pub(crate) fn nbf(&self) -> Option<UnixTimestamp> {
        self.nbf
    }

    pub(crate) fn iss(&self) -> Option<&str> {
        self.iss.as_deref()
    }

    pub(crate) fn into_sub(self) -> Principal {
        self.sub
    }
}

//--------------------------------------------------------------------------------------------------
