use crate::base::neterror::NetError;
use crate::cookies::attributes::CookieAttributes;
use crate::cookies::config::CookieConfig;
use crate::cookies::date::parse_cookie_date;
use crate::cookies::{matcher, psl};
use time::{Duration, OffsetDateTime};
use url::Url;

/// Per-cookie state that is not an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieFlags {
    /// Only deliver to the exact host in `domain` (no subdomains).
    pub host_only: bool,
    /// The cookie carries an expiry; session cookies are not persistent.
    pub persistent: bool,
}

impl Default for CookieFlags {
    fn default() -> Self {
        Self {
            host_only: true,
            persistent: false,
        }
    }
}

/// Jar identity of a cookie: `(domain, path, name)`.
///
/// The domain is kept exactly as stored, so `.example.com` and `example.com`
/// are different keys. `None` is the key domain of cookies with no domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookieKey {
    pub domain: Option<String>,
    pub path: String,
    pub name: String,
}

/// Represents a cookie.
/// Modeled after Chromium's `net::CanonicalCookie`.
///
/// A cookie built with [`CanonicalCookie::new`] has no attribute store at
/// all. Such cookies are "global": they match every host and ignore domain
/// scoping entirely. This is different from a cookie whose attributes hold
/// an empty `domain`, which matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCookie {
    pub name: String,
    pub value: String,
    /// Writing this directly leaves `expiration_time` stale; use
    /// [`set_attribute`](Self::set_attribute) or
    /// [`set_attributes`](Self::set_attributes).
    pub attributes: Option<CookieAttributes>,
    pub flags: CookieFlags,
    pub creation_time: OffsetDateTime,
    /// Derived from `attributes` and `creation_time`.
    pub expiration_time: Option<OffsetDateTime>,
}

impl CanonicalCookie {
    /// Create a manual (global) cookie with no attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::build(
            name.into(),
            value.into(),
            None,
            CookieFlags::default(),
            OffsetDateTime::now_utc(),
        )
    }

    /// Create a cookie with attributes and default flags (host-only).
    pub fn with_attributes(
        name: impl Into<String>,
        value: impl Into<String>,
        attributes: CookieAttributes,
    ) -> Self {
        Self::with_flags(name, value, attributes, CookieFlags::default())
    }

    /// Create a cookie with attributes and explicit flags.
    ///
    /// `flags.persistent` is recomputed from `max-age`/`expires`.
    pub fn with_flags(
        name: impl Into<String>,
        value: impl Into<String>,
        attributes: CookieAttributes,
        flags: CookieFlags,
    ) -> Self {
        Self::build(
            name.into(),
            value.into(),
            Some(attributes),
            flags,
            OffsetDateTime::now_utc(),
        )
    }

    /// Rebase the creation time, recomputing a `max-age` expiry from it.
    pub fn created_at(mut self, now: OffsetDateTime) -> Self {
        self.creation_time = now;
        self.refresh_expiry();
        self
    }

    /// Set one attribute and recompute the expiry from the creation time.
    ///
    /// A global cookie gains an attribute store and stops being global.
    pub fn set_attribute(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.attributes
            .get_or_insert_with(CookieAttributes::new)
            .insert(name, value);
        self.refresh_expiry();
    }

    /// Replace the attribute store and recompute the expiry.
    pub fn set_attributes(&mut self, attributes: Option<CookieAttributes>) {
        self.attributes = attributes;
        self.refresh_expiry();
    }

    fn refresh_expiry(&mut self) {
        self.expiration_time = self
            .attributes
            .as_ref()
            .and_then(|a| compute_expiry(a, self.creation_time));
        self.flags.persistent = self.expiration_time.is_some();
    }

    fn build(
        name: String,
        value: String,
        attributes: Option<CookieAttributes>,
        flags: CookieFlags,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            name,
            value,
            attributes,
            flags,
            creation_time: now,
            expiration_time: None,
        }
        .created_at(now)
    }

    /// Build a cookie received in a response to `url`.
    ///
    /// A `Domain` attribute is lower-cased, stripped of its leading dot,
    /// checked against the request host and makes the cookie a domain
    /// cookie. Without one the cookie is host-only for the request host.
    /// A missing or relative `Path` is replaced by the default path.
    pub fn from_response(
        name: impl Into<String>,
        value: impl Into<String>,
        mut attributes: CookieAttributes,
        url: &Url,
        config: &CookieConfig,
        now: OffsetDateTime,
    ) -> Result<Self, NetError> {
        let name = name.into();
        if name.is_empty() {
            return Err(NetError::CookieInvalidName);
        }

        let host = url.host_str().unwrap_or("").to_lowercase();
        if host.is_empty() {
            return Err(NetError::CookieDomainMismatch);
        }

        let explicit_domain = attributes
            .get("domain")
            .map(|d| d.trim().trim_start_matches('.').to_lowercase())
            .filter(|d| !d.is_empty());

        let host_only = match explicit_domain {
            Some(domain) => {
                psl::validate_cookie_domain(&domain, &host, config.reject_public_suffixes)?;
                // A public suffix equal to the host degrades to host-only.
                let host_only = domain == host && psl::is_public_suffix(&domain);
                attributes.insert("domain", domain);
                host_only
            }
            None => {
                attributes.insert("domain", host);
                true
            }
        };

        let has_valid_path = attributes
            .get("path")
            .is_some_and(|p| p.starts_with('/'));
        if !has_valid_path {
            attributes.insert("path", matcher::default_path(url.path()));
        }

        let flags = CookieFlags {
            host_only,
            persistent: false,
        };
        let cookie = Self::build(name, value.into(), Some(attributes), flags, now);

        if config.enforce_prefixes {
            cookie.validate_prefix(is_secure_scheme(url.scheme()))?;
        }

        Ok(cookie)
    }

    /// The stored `domain` attribute. `None` for global cookies.
    pub fn domain(&self) -> Option<&str> {
        self.attributes.as_ref()?.get("domain")
    }

    /// The cookie path, `/` when absent or not absolute.
    pub fn path(&self) -> &str {
        self.attributes
            .as_ref()
            .and_then(|a| a.get("path"))
            .filter(|p| p.starts_with('/'))
            .unwrap_or("/")
    }

    pub fn is_secure(&self) -> bool {
        self.has_flag_attribute("secure")
    }

    pub fn is_http_only(&self) -> bool {
        self.has_flag_attribute("httponly")
    }

    /// True for cookies constructed without any attribute store.
    pub fn is_global(&self) -> bool {
        self.attributes.is_none()
    }

    fn has_flag_attribute(&self, name: &str) -> bool {
        self.attributes.as_ref().is_some_and(|a| a.contains(name))
    }

    pub fn key(&self) -> CookieKey {
        CookieKey {
            domain: self.domain().map(str::to_string),
            path: self.path().to_string(),
            name: self.name.clone(),
        }
    }

    /// Check whether this cookie may be sent to `host`.
    ///
    /// Cookies without a `domain` (no attribute store, or a store that never
    /// had one) match any host; a present but empty `domain` matches none.
    pub fn domain_matches(&self, host: &str) -> bool {
        matcher::domain_matches(self.domain(), self.flags.host_only, host)
    }

    /// [`domain_matches`](Self::domain_matches) for untyped input (decoded
    /// JSON, FFI). Anything that is not a string never matches.
    pub fn domain_matches_value(&self, host: &serde_json::Value) -> bool {
        match host {
            serde_json::Value::String(host) => self.domain_matches(host),
            _ => false,
        }
    }

    pub fn path_matches(&self, request_path: &str) -> bool {
        matcher::path_matches(self.path(), request_path)
    }

    pub fn is_expired(&self, current_time: OffsetDateTime) -> bool {
        self.expiration_time
            .is_some_and(|expiry| expiry <= current_time)
    }

    /// `name=value`, as it appears in a `Cookie` request header.
    pub fn format_for_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Validate __Secure- and __Host- cookie prefixes per RFC 6265bis.
    /// - __Secure- cookies MUST have the Secure attribute
    /// - __Host- cookies MUST have Secure, Path="/", and no Domain attribute
    pub fn validate_prefix(&self, secure_origin: bool) -> Result<(), NetError> {
        if self.name.starts_with("__Secure-") && (!self.is_secure() || !secure_origin) {
            return Err(NetError::CookieInvalidPrefix);
        }

        if self.name.starts_with("__Host-") {
            // __Host- requires: Secure flag, Path="/", host-only (no Domain), secure origin
            if !self.is_secure() || self.path() != "/" || !self.flags.host_only || !secure_origin {
                return Err(NetError::CookieInvalidPrefix);
            }
        }

        Ok(())
    }
}

/// Schemes whose requests may carry `Secure` cookies.
pub fn is_secure_scheme(scheme: &str) -> bool {
    matches!(scheme, "https" | "wss")
}

/// `max-age` (relative to `now`) wins over `expires`. A non-positive
/// `max-age` yields an expiry in the past. Unparseable values are ignored.
fn compute_expiry(attributes: &CookieAttributes, now: OffsetDateTime) -> Option<OffsetDateTime> {
    if let Some(secs) = attributes.get("max-age").and_then(parse_max_age) {
        return Some(if secs <= 0 {
            OffsetDateTime::UNIX_EPOCH
        } else {
            now.saturating_add(Duration::seconds(secs))
        });
    }

    attributes.get("expires").and_then(parse_cookie_date)
}

/// `max-age = [ "-" ] 1*DIGIT`. Out-of-range values clamp instead of failing.
fn parse_max_age(value: &str) -> Option<i64> {
    let value = value.trim();
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let clamped = if negative { i64::MIN } else { i64::MAX };
    let secs = match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => clamped,
    };
    Some(secs)
}
