/// Placeholder written wherever the provider credential would appear.
pub const REDACTED: &str = "[redacted]";

/// Replaces every occurrence of `secret` in `text` with [`REDACTED`].
///
/// An empty secret leaves the text untouched.
#[must_use]
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_owned();
    }
    text.replace(secret, REDACTED)
}
