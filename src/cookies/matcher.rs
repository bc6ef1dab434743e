//! RFC 6265 domain and path matching.
//!
//! These are the predicates the jar runs at selection time. Storage never
//! consults them, so a cookie stored for `example.com` is only checked
//! against a host when a request for that host is being built.

use std::net::IpAddr;

/// Check whether a cookie scoped to `cookie_domain` may be sent to `check_host`.
///
/// `cookie_domain` is `None` for cookies that carry no domain at all
/// (constructed by the client rather than received from a server); those
/// match every non-empty host.
///
/// Otherwise, with the leading dot of `cookie_domain` removed:
/// - an exact match always succeeds, host-only or not
/// - host-only cookies match nothing else
/// - IP literals never take part in suffix matching
/// - a suffix match must land on a label boundary, so `example.com` matches
///   `www.example.com` but not `notexample.com`
///
/// Both sides are compared as given; callers lower-case them first.
pub fn domain_matches(cookie_domain: Option<&str>, host_only: bool, check_host: &str) -> bool {
    if check_host.is_empty() {
        return false;
    }

    let Some(domain) = cookie_domain else {
        return true;
    };

    let base = domain.strip_prefix('.').unwrap_or(domain);
    if base.is_empty() {
        return false;
    }

    if check_host == base {
        return true;
    }

    if host_only {
        return false;
    }

    if is_ip_literal(base) || is_ip_literal(check_host) {
        return false;
    }

    match check_host.strip_suffix(base) {
        Some(prefix) => prefix.len() > 1 && prefix.ends_with('.'),
        None => false,
    }
}

/// Check if request path matches cookie path.
/// Implements RFC 6265 path matching.
pub fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        // Cookie path is a prefix; it must end on a segment boundary.
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

/// Compute the default cookie path from the request path that produced a
/// `Set-Cookie`: everything up to and including the last `/`, or `/` when
/// the path is empty or relative.
pub fn default_path(request_path: &str) -> &str {
    if !request_path.starts_with('/') {
        return "/";
    }

    match request_path.rfind('/') {
        Some(idx) => &request_path[..=idx],
        None => "/",
    }
}

/// Whether `host` is an IPv4 or IPv6 literal. IPv6 may be bracketed.
pub fn is_ip_literal(host: &str) -> bool {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse::<IpAddr>().is_ok()
}
