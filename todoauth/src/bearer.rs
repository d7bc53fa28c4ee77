use crate::AuthorizeError;

//--------------------------------------------------------------------------------------------------
// Bearer credential extraction
//--------------------------------------------------------------------------------------------------

const BEARER_PREFIX: &str = "bearer ";

/// Pull the encoded token out of a raw `Authorization` header value.
///
/// The scheme is matched case-insensitively and must be followed by exactly one space. The token
/// is returned as-is. A compact token never contains whitespace, so a value such as
/// `"Bearer <token> extra"` or one with a trailing space fails here with
/// [`AuthorizeError::MalformedHeader`] rather than reaching the verifier as a `MalformedToken`.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthorizeError> {
    let header = match header {
        Some(header) if !header.is_empty() => header,
        _ => return Err(AuthorizeError::MissingHeader),
    };

    // get() also guards against slicing through a multi-byte character
    let Some(scheme) = header.get(..BEARER_PREFIX.len()) else {
        return Err(AuthorizeError::MalformedHeader);
    };

    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(AuthorizeError::MalformedHeader);
    }

    let token = &header[BEARER_PREFIX.len()..];

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthorizeError::MalformedHeader);
    }

    Ok(token)
}

//--------------------------------------------------------------------------------------------------
