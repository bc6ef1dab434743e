//! Cookie jar configuration.

/// Maximum cookies per domain (Chromium default).
pub const MAX_COOKIES_PER_DOMAIN: usize = 50;

/// Maximum total cookies.
/// Chromium uses 3300, but we use a slightly lower limit to keep memory usage predictable.
pub const MAX_COOKIES_TOTAL: usize = 3000;

/// Policy knobs for [`CookieMonster`](super::monster::CookieMonster).
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Cookies kept per stored domain before the oldest is evicted.
    pub max_cookies_per_domain: usize,
    /// Cookies kept in the whole jar before the oldest is evicted.
    pub max_cookies_total: usize,
    /// Reject server cookies whose `Domain` is a public suffix (e.g. `co.uk`).
    pub reject_public_suffixes: bool,
    /// Enforce the `__Secure-` and `__Host-` name prefix rules.
    pub enforce_prefixes: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            max_cookies_per_domain: MAX_COOKIES_PER_DOMAIN,
            max_cookies_total: MAX_COOKIES_TOTAL,
            reject_public_suffixes: true,
            enforce_prefixes: true,
        }
    }
}

impl CookieConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-domain cookie limit.
    pub fn max_cookies_per_domain(mut self, max: usize) -> Self {
        self.max_cookies_per_domain = max;
        self
    }

    /// Set the total cookie limit.
    pub fn max_cookies_total(mut self, max: usize) -> Self {
        self.max_cookies_total = max;
        self
    }

    /// Enable or disable public suffix rejection.
    pub fn reject_public_suffixes(mut self, enabled: bool) -> Self {
        self.reject_public_suffixes = enabled;
        self
    }

    /// Enable or disable cookie prefix enforcement.
    pub fn enforce_prefixes(mut self, enabled: bool) -> Self {
        self.enforce_prefixes = enabled;
        self
    }
}
