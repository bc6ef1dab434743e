//! Public Suffix List (PSL) validation for cookie domain security.
//!
//! Prevents supercookie attacks by rejecting cookies set on public
//! suffixes like `.com`, `.co.uk`, etc.
//!
//! Uses Mozilla's Public Suffix List via the `psl` crate.

use crate::base::neterror::NetError;
use crate::cookies::matcher::domain_matches;
use psl::{List, Psl};

/// Check if a domain is a public suffix (e.g., "com", "co.uk").
/// Returns true if the domain itself is a listed public suffix.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain_lower = domain.to_lowercase();
    let domain_bytes = domain_lower.as_bytes();

    match List.suffix(domain_bytes) {
        // Unlisted TLDs (e.g. "localhost") only hit the implicit `*` rule.
        Some(suffix) => suffix.is_known() && suffix.as_bytes() == domain_bytes,
        None => false,
    }
}

/// Get the registrable domain (eTLD+1) for a domain.
/// For "sub.example.com", returns "example.com".
/// For "example.com", returns "example.com".
/// For "com" (public suffix), returns None.
pub fn registrable_domain(domain: &str) -> Option<String> {
    let domain_lower = domain.to_lowercase();
    psl::domain(domain_lower.as_bytes())
        .and_then(|d| std::str::from_utf8(d.as_bytes()).ok())
        .map(|s| s.to_string())
}

/// Validate a server-supplied `Domain` attribute against the request host.
///
/// The request host must domain-match the cookie domain. When
/// `reject_public_suffixes` is set, a public-suffix domain is only accepted
/// if it is identical to the request host.
pub fn validate_cookie_domain(
    cookie_domain: &str,
    url_host: &str,
    reject_public_suffixes: bool,
) -> Result<(), NetError> {
    let cookie_domain = cookie_domain
        .strip_prefix('.')
        .unwrap_or(cookie_domain)
        .to_lowercase();
    let url_host = url_host.to_lowercase();

    if !domain_matches(Some(cookie_domain.as_str()), false, &url_host) {
        return Err(NetError::CookieDomainMismatch);
    }

    if reject_public_suffixes && cookie_domain != url_host && is_public_suffix(&cookie_domain) {
        return Err(NetError::CookiePublicSuffix);
    }

    Ok(())
}

/// Check if a cookie domain is valid for a given URL.
/// The cookie domain must be a suffix of the URL's host and
/// must not be a public suffix.
pub fn is_valid_cookie_domain(cookie_domain: &str, url_host: &str) -> bool {
    validate_cookie_domain(cookie_domain, url_host, true).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_public_suffix_com() {
        assert!(is_public_suffix("com"));
        assert!(is_public_suffix("COM"));
    }

    #[test]
    fn test_is_public_suffix_co_uk() {
        assert!(is_public_suffix("co.uk"));
        assert!(is_public_suffix("CO.UK"));
    }

    #[test]
    fn test_not_public_suffix() {
        assert!(!is_public_suffix("example.com"));
        assert!(!is_public_suffix("sub.example.com"));
        assert!(!is_public_suffix("localhost"));
    }

    #[test]
    fn test_registrable_domain() {
        assert_eq!(
            registrable_domain("deep.sub.example.com"),
            Some("example.com".to_string())
        );
        assert_eq!(registrable_domain("com"), None);
    }

    #[test]
    fn test_valid_cookie_domain() {
        assert!(is_valid_cookie_domain("example.com", "example.com"));
        assert!(is_valid_cookie_domain("example.com", "sub.example.com"));
        assert!(is_valid_cookie_domain(".example.com", "sub.example.com"));
        assert!(is_valid_cookie_domain("Example.COM", "sub.example.com"));
    }

    #[test]
    fn test_invalid_cookie_domain_public_suffix() {
        assert_eq!(
            validate_cookie_domain("com", "example.com", true),
            Err(NetError::CookiePublicSuffix)
        );
        assert_eq!(
            validate_cookie_domain(".co.uk", "example.co.uk", true),
            Err(NetError::CookiePublicSuffix)
        );
        assert!(validate_cookie_domain("com", "example.com", false).is_ok());
    }

    #[test]
    fn test_invalid_cookie_domain_mismatch() {
        assert_eq!(
            validate_cookie_domain("other.com", "example.com", true),
            Err(NetError::CookieDomainMismatch)
        );
        assert_eq!(
            validate_cookie_domain("example.com", "notexample.com", true),
            Err(NetError::CookieDomainMismatch)
        );
    }

    #[test]
    fn test_ip_host_only_accepts_itself() {
        assert!(is_valid_cookie_domain("127.0.0.1", "127.0.0.1"));
        assert!(!is_valid_cookie_domain("0.0.1", "127.0.0.1"));
    }
}
