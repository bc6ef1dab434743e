use crate::cookies::attributes::CookieAttributes;
use crate::cookies::canonical_cookie::{is_secure_scheme, CanonicalCookie, CookieKey};
use crate::cookies::config::CookieConfig;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use time::OffsetDateTime;
use url::Url;

/// Position of a cookie in request order: longer paths first, then by
/// insertion sequence.
type OrderKey = (Reverse<usize>, u64);

/// Result of [`CookieMonster::store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    /// New key, cookie added.
    Inserted,
    /// Existing key, cookie replaced in place.
    Replaced,
    /// Expired cookie removed a live entry with the same key.
    Deleted,
    /// Expired cookie with nothing to delete.
    Ignored,
}

/// The main entry point for cookie management.
/// Modeled after Chromium's `net::CookieMonster`.
///
/// The jar is a plain owned collection with no internal locking. Share it
/// between workers behind a single lock (e.g. `Arc<Mutex<CookieMonster>>`)
/// or keep one jar per worker.
#[derive(Debug, Default)]
pub struct CookieMonster {
    config: CookieConfig,
    // Request order doubles as storage order, so selection is a walk.
    entries: BTreeMap<OrderKey, CanonicalCookie>,
    index: HashMap<CookieKey, OrderKey>,
    next_seq: u64,
}

impl CookieMonster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CookieConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    pub fn store(&mut self, cookie: CanonicalCookie) -> StoreOutcome {
        self.store_at(cookie, OffsetDateTime::now_utc())
    }

    /// Insert, replace or delete by `(domain, path, name)`.
    ///
    /// A cookie already expired at `now` deletes any live entry with its
    /// key. Otherwise it replaces the entry wholesale (value, attributes and
    /// flags), keeping the original creation time and request-order slot.
    pub fn store_at(&mut self, mut cookie: CanonicalCookie, now: OffsetDateTime) -> StoreOutcome {
        let key = cookie.key();

        if cookie.is_expired(now) {
            return match self.index.remove(&key) {
                Some(slot) => {
                    self.entries.remove(&slot);
                    tracing::debug!(name = %key.name, domain = ?key.domain, path = %key.path, "cookie deleted");
                    StoreOutcome::Deleted
                }
                None => StoreOutcome::Ignored,
            };
        }

        if let Some(slot) = self.index.get(&key) {
            if let Some(existing) = self.entries.get_mut(slot) {
                cookie.creation_time = existing.creation_time;
                *existing = cookie;
                tracing::debug!(name = %key.name, domain = ?key.domain, path = %key.path, "cookie replaced");
                return StoreOutcome::Replaced;
            }
        }

        let slot = (Reverse(key.path.len()), self.next_seq);
        self.next_seq += 1;
        self.entries.insert(slot, cookie);
        tracing::debug!(name = %key.name, domain = ?key.domain, path = %key.path, "cookie stored");

        self.index.insert(key.clone(), slot);
        self.enforce_domain_limit(key.domain.as_deref(), slot);
        self.enforce_global_limit(slot);

        StoreOutcome::Inserted
    }

    /// Build and store cookies received in a response to `url`.
    ///
    /// Each tuple is `(name, value, attributes)` as produced by the
    /// `Set-Cookie` parser. Rejected cookies are logged and skipped.
    /// Returns how many cookies were inserted or replaced.
    pub fn set_from_response<I, N, V>(&mut self, url: &Url, cookies: I) -> usize
    where
        I: IntoIterator<Item = (N, V, CookieAttributes)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.set_from_response_at(url, cookies, OffsetDateTime::now_utc())
    }

    pub fn set_from_response_at<I, N, V>(&mut self, url: &Url, cookies: I, now: OffsetDateTime) -> usize
    where
        I: IntoIterator<Item = (N, V, CookieAttributes)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut stored = 0;

        for (name, value, attributes) in cookies {
            let name = name.into();
            match CanonicalCookie::from_response(&name, value, attributes, url, &self.config, now) {
                Ok(cookie) => {
                    if matches!(
                        self.store_at(cookie, now),
                        StoreOutcome::Inserted | StoreOutcome::Replaced
                    ) {
                        stored += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!(name = %name, url = %url, error = %e, "rejected cookie");
                }
            }
        }

        stored
    }

    pub fn select<'a>(&'a mut self, host: &'a str, path: &'a str, is_secure: bool) -> Selection<'a> {
        self.select_at(host, path, is_secure, OffsetDateTime::now_utc())
    }

    /// Lazily walk the cookies to attach to a request for `host` + `path`.
    ///
    /// `host` must be lower-case without a port. Secure cookies are only
    /// yielded when `is_secure` is set. Expired entries met along the way are
    /// removed from the jar. Cookies come out longest path first, ties in
    /// insertion order.
    pub fn select_at<'a>(
        &'a mut self,
        host: &'a str,
        path: &'a str,
        is_secure: bool,
        now: OffsetDateTime,
    ) -> Selection<'a> {
        Selection {
            jar: self,
            host,
            path,
            is_secure,
            now,
            cursor: None,
        }
    }

    /// Get cookies matching the URL, in request order.
    pub fn cookies_for_url(&mut self, url: &Url) -> Vec<CanonicalCookie> {
        let host = url.host_str().unwrap_or("").to_lowercase();
        self.select(&host, url.path(), is_secure_scheme(url.scheme()))
            .collect()
    }

    /// Ordered `(name, value)` pairs for a `Cookie` request header.
    pub fn request_pairs(&mut self, host: &str, path: &str, is_secure: bool) -> Vec<(String, String)> {
        self.select(host, path, is_secure)
            .map(|c| (c.name, c.value))
            .collect()
    }

    /// `Cookie` header value (`a=1; b=2`), or `None` when nothing matches.
    pub fn cookie_header(&mut self, host: &str, path: &str, is_secure: bool) -> Option<String> {
        let parts: Vec<String> = self
            .select(host, path, is_secure)
            .map(|c| c.format_for_header())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("; "))
        }
    }

    /// Remove every cookie whose expiry is at or before `now`.
    /// Returns the number of cookies removed.
    pub fn purge(&mut self, now: OffsetDateTime) -> usize {
        let expired: Vec<OrderKey> = self
            .entries
            .iter()
            .filter(|(_, c)| c.is_expired(now))
            .map(|(slot, _)| *slot)
            .collect();

        for slot in &expired {
            self.remove_slot(*slot);
        }

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "purged expired cookies");
        }
        expired.len()
    }

    pub fn purge_expired(&mut self) -> usize {
        self.purge(OffsetDateTime::now_utc())
    }

    pub fn get(&self, key: &CookieKey) -> Option<&CanonicalCookie> {
        self.index.get(key).and_then(|slot| self.entries.get(slot))
    }

    pub fn remove(&mut self, key: &CookieKey) -> Option<CanonicalCookie> {
        let slot = self.index.remove(key)?;
        self.entries.remove(&slot)
    }

    /// Get total cookie count.
    pub fn total_cookie_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all cookies.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterate over all cookies in request order (for persistence).
    pub fn iter_all_cookies(&self) -> impl Iterator<Item = &CanonicalCookie> + '_ {
        self.entries.values()
    }

    fn remove_slot(&mut self, slot: OrderKey) -> Option<CanonicalCookie> {
        let cookie = self.entries.remove(&slot)?;
        self.index.remove(&cookie.key());
        Some(cookie)
    }

    /// Oldest cookie (by creation time, then insertion) among those accepted
    /// by `filter`, never `keep`.
    fn oldest_slot(
        &self,
        keep: OrderKey,
        filter: impl Fn(&CanonicalCookie) -> bool,
    ) -> Option<OrderKey> {
        self.entries
            .iter()
            .filter(|(slot, c)| **slot != keep && filter(c))
            .min_by_key(|(slot, c)| (c.creation_time, slot.1))
            .map(|(slot, _)| *slot)
    }

    fn enforce_domain_limit(&mut self, domain: Option<&str>, keep: OrderKey) {
        let limit = self.config.max_cookies_per_domain;
        let mut count = self.entries.values().filter(|c| c.domain() == domain).count();

        while count > limit {
            let Some(slot) = self.oldest_slot(keep, |c| c.domain() == domain) else {
                break;
            };
            if let Some(evicted) = self.remove_slot(slot) {
                tracing::debug!(name = %evicted.name, domain = ?domain, "evicted cookie over per-domain limit");
            }
            count -= 1;
        }
    }

    fn enforce_global_limit(&mut self, keep: OrderKey) {
        while self.entries.len() > self.config.max_cookies_total {
            let Some(slot) = self.oldest_slot(keep, |_| true) else {
                break;
            };
            if let Some(evicted) = self.remove_slot(slot) {
                tracing::debug!(name = %evicted.name, domain = ?evicted.domain(), "evicted cookie over global limit");
            }
        }
    }
}

/// Lazy cookie selection returned by [`CookieMonster::select`].
///
/// Yields copies; the jar keeps ownership of its cookies. The walk can be
/// restarted with [`rewind`](Self::rewind).
pub struct Selection<'a> {
    jar: &'a mut CookieMonster,
    host: &'a str,
    path: &'a str,
    is_secure: bool,
    now: OffsetDateTime,
    cursor: Option<OrderKey>,
}

impl Selection<'_> {
    /// Restart the walk from the first cookie.
    pub fn rewind(&mut self) {
        self.cursor = None;
    }
}

impl Iterator for Selection<'_> {
    type Item = CanonicalCookie;

    fn next(&mut self) -> Option<CanonicalCookie> {
        loop {
            let lower = match self.cursor {
                Some(slot) => Bound::Excluded(slot),
                None => Bound::Unbounded,
            };
            let (slot, expired) = {
                let (slot, cookie) = self.jar.entries.range((lower, Bound::Unbounded)).next()?;
                (*slot, cookie.is_expired(self.now))
            };
            self.cursor = Some(slot);

            if expired {
                if let Some(cookie) = self.jar.remove_slot(slot) {
                    tracing::trace!(name = %cookie.name, domain = ?cookie.domain(), "dropped expired cookie during selection");
                }
                continue;
            }

            let cookie = &self.jar.entries[&slot];
            if !cookie.domain_matches(self.host) || !cookie.path_matches(self.path) {
                continue;
            }
            if cookie.is_secure() && !self.is_secure {
                continue;
            }

            return Some(cookie.clone());
        }
    }
}
