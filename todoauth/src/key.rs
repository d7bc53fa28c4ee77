use crate::KeyError;
use jsonwebtoken::DecodingKey;
use std::fs;
use std::path::Path;

//--------------------------------------------------------------------------------------------------
// Pinned public key
//--------------------------------------------------------------------------------------------------

/// The one RSA public key tokens are verified against.
///
/// Accepts a PEM `CERTIFICATE` (the form identity providers publish their signing certificate
/// in), a `PUBLIC KEY` or an `RSA PUBLIC KEY`. Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct PinnedKey {
    key: DecodingKey,
}

impl PinnedKey {
    pub fn from_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let key = DecodingKey::from_rsa_pem(pem)?;
        Ok(PinnedKey { key })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KeyError> {
        let path = path.as_ref();
        let pem = fs::read(path).map_err(|source| KeyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(&pem)
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }
}

//--------------------------------------------------------------------------------------------------
