//! Credential normalization.

/// Scheme word marking an opaque bearer credential.
pub const BEARER_SCHEME: &str = "bearer";

/// Normalize a raw `Authorization`-style header value into a bare token.
///
/// The value is trimmed. If it then starts with the `bearer` scheme word
/// (any casing) followed by at least one whitespace character, the scheme and
/// the separating whitespace are removed and the remainder is trimmed again.
/// Any other value is returned trimmed but otherwise unchanged, including
/// values carrying a different scheme; callers decide whether such a
/// credential is theirs.
///
/// ```
/// use claims_resolver_sdk::extract_token;
///
/// assert_eq!(extract_token("  Bearer   app1-key "), "app1-key");
/// assert_eq!(extract_token("app1-key"), "app1-key");
/// assert_eq!(extract_token("Basic xyz"), "Basic xyz");
/// ```
#[must_use]
pub fn extract_token(raw: &str) -> &str {
    let trimmed = raw.trim();
    strip_bearer_scheme(trimmed).map_or(trimmed, str::trim)
}

/// `true` if `value` starts with the bearer scheme word, ignoring case.
///
/// Unlike [`extract_token`] this does not require a separator after the word.
#[must_use]
pub fn starts_with_bearer(value: &str) -> bool {
    value
        .get(..BEARER_SCHEME.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(BEARER_SCHEME))
}

fn strip_bearer_scheme(value: &str) -> Option<&str> {
    if !starts_with_bearer(value) {
        return None;
    }
    let rest = &value[BEARER_SCHEME.len()..];
    rest.starts_with(char::is_whitespace).then_some(rest)
}
