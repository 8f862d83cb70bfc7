use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_EMAIL_LEN: usize = 3;
pub const MAX_EMAIL_LEN: usize = 254;

// Local part of up to 64 permitted characters, then dot-separated DNS labels that neither start
// nor end with a hyphen.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]{1,64}@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Syntactic email check. Does not verify that the address can receive mail.
pub fn is_email_valid(email: &str) -> bool {
    (MIN_EMAIL_LEN..=MAX_EMAIL_LEN).contains(&email.len()) && EMAIL_RE.is_match(email)
}
