use thiserror::Error;
use url::Url;

/// Errors from validating an article link before opening it externally.
#[derive(Debug, Error)]
pub enum OutboundUrlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validates an article URL before handing it to the operating system.
///
/// Article URLs come from a third-party API; only http/https links are
/// allowed through to the browser (a crafted record could otherwise carry
/// a `file://` or custom-scheme URL).
pub fn validate_outbound_url(url_str: &str) -> Result<Url, OutboundUrlError> {
    let url = Url::parse(url_str)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(OutboundUrlError::UnsupportedScheme(scheme.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_outbound_url("https://example.com/story").is_ok());
        assert!(validate_outbound_url("http://example.com/story").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(validate_outbound_url("file:///etc/passwd").is_err());
        assert!(validate_outbound_url("javascript:alert(1)").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(validate_outbound_url("not a url").is_err());
    }
}
