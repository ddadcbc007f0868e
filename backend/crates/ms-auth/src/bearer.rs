pub const BEARER_PREFIX: &str = "Bearer ";

/// Token from an `Authorization` header value.
///
/// The scheme match is case-insensitive. Returns `None` for any other
/// scheme or an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let scheme = header_value.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }

    let token = header_value[BEARER_PREFIX.len()..].trim();
    (!token.is_empty()).then_some(token)
}
