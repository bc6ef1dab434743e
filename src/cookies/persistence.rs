//! Cookie persistence - save and load cookies to/from disk.
//!
//! Provides JSON-based persistence for CookieMonster, plus the Netscape
//! `cookies.txt` format used by curl and wget.

use crate::cookies::attributes::CookieAttributes;
use crate::cookies::canonical_cookie::{CanonicalCookie, CookieFlags};
use crate::cookies::matcher::domain_matches;
use crate::cookies::monster::CookieMonster;
use time::OffsetDateTime;

#[cfg(feature = "json")]
use crate::base::{context::IoResultExt, neterror::NetError};
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "json")]
use std::{fs, path::Path};

/// Serializable representation of a cookie for persistence.
#[cfg(feature = "json")]
#[derive(Serialize, Deserialize, Debug, Clone)]
struct PersistentCookie {
    name: String,
    value: String,
    /// `None` for global cookies.
    attributes: Option<CookieAttributes>,
    host_only: bool,
    creation_unix_secs: i64,
    expires_unix_secs: Option<i64>,
}

/// Save cookies from a CookieMonster to a file.
///
/// # Example
/// ```ignore
/// persistence::save_cookies(&monster, Path::new("/path/to/cookies.json"))?;
/// ```
#[cfg(feature = "json")]
pub fn save_cookies(monster: &CookieMonster, path: &Path) -> Result<(), NetError> {
    let all_cookies: Vec<PersistentCookie> = monster
        .iter_all_cookies()
        .map(|cookie| PersistentCookie {
            name: cookie.name.clone(),
            value: cookie.value.clone(),
            attributes: cookie.attributes.clone(),
            host_only: cookie.flags.host_only,
            creation_unix_secs: cookie.creation_time.unix_timestamp(),
            expires_unix_secs: cookie.expiration_time.map(|t| t.unix_timestamp()),
        })
        .collect();

    let json = serde_json::to_string_pretty(&all_cookies)
        .map_err(|e| NetError::cookie_invalid_data(e.to_string()))?;

    fs::write(path, json).persistence_context(path)?;
    tracing::debug!(path = %path.display(), count = all_cookies.len(), "saved cookies");
    Ok(())
}

/// Load cookies from a file into a new CookieMonster.
///
/// Cookies that have expired since they were saved are skipped. Stored
/// expiry times are kept as-is rather than recomputed from `max-age`.
#[cfg(feature = "json")]
pub fn load_cookies(path: &Path) -> Result<CookieMonster, NetError> {
    let mut monster = CookieMonster::new();
    load_cookies_into(&mut monster, path, OffsetDateTime::now_utc())?;
    Ok(monster)
}

/// Load cookies from a file into an existing jar. Returns the number loaded.
#[cfg(feature = "json")]
pub fn load_cookies_into(
    monster: &mut CookieMonster,
    path: &Path,
    now: OffsetDateTime,
) -> Result<usize, NetError> {
    let json = fs::read_to_string(path).persistence_context(path)?;
    let persistent_cookies: Vec<PersistentCookie> =
        serde_json::from_str(&json).map_err(|e| NetError::cookie_invalid_data(e.to_string()))?;

    let mut count = 0;
    for pc in persistent_cookies {
        let expiration_time = pc
            .expires_unix_secs
            .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok());
        let creation_time = OffsetDateTime::from_unix_timestamp(pc.creation_unix_secs).unwrap_or(now);

        let cookie = CanonicalCookie {
            name: pc.name,
            value: pc.value,
            attributes: pc.attributes,
            flags: CookieFlags {
                host_only: pc.host_only,
                persistent: expiration_time.is_some(),
            },
            creation_time,
            expiration_time,
        };

        // Skip expired
        if cookie.is_expired(now) {
            continue;
        }

        monster.store_at(cookie, now);
        count += 1;
    }

    tracing::debug!(path = %path.display(), count, "loaded cookies");
    Ok(count)
}

/// Export cookies to Netscape cookie format.
///
/// The Netscape format is widely used by curl, wget, and other tools.
/// Each line has the format:
/// `domain\tinclude_subdomains\tpath\tsecure\texpiry\tname\tvalue`
///
/// Global cookies have no domain and are left out.
pub fn export_netscape(monster: &CookieMonster, domain_filter: Option<&str>) -> String {
    let mut lines = vec![
        "# Netscape HTTP Cookie File".to_string(),
        "# https://curl.se/docs/http-cookies.html".to_string(),
        "# This file was generated by cookiemonster".to_string(),
        String::new(),
    ];

    let filter = domain_filter.map(|f| f.trim_start_matches('.').to_ascii_lowercase());

    for cookie in monster.iter_all_cookies() {
        let Some(stored_domain) = cookie.domain().filter(|d| !d.is_empty()) else {
            continue;
        };
        let bare = stored_domain.trim_start_matches('.');

        // Cookies sent to the filter host, or scoped somewhere below it.
        if let Some(filter) = filter.as_deref() {
            if !domain_matches(Some(bare), false, filter)
                && !domain_matches(Some(filter), false, bare)
            {
                continue;
            }
        }

        // Format: domain \t include_subdomains \t path \t secure \t expiry \t name \t value
        let include_subdomains = if cookie.flags.host_only { "FALSE" } else { "TRUE" };
        let secure = if cookie.is_secure() { "TRUE" } else { "FALSE" };
        let expiry = cookie
            .expiration_time
            .map(|t| t.unix_timestamp().max(1))
            .unwrap_or(0);

        // Domain should start with . for non-host-only cookies
        let domain = if cookie.flags.host_only {
            bare.to_string()
        } else {
            format!(".{}", bare)
        };
        let domain = if cookie.is_http_only() {
            format!("#HttpOnly_{}", domain)
        } else {
            domain
        };

        lines.push(format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            domain,
            include_subdomains,
            cookie.path(),
            secure,
            expiry,
            cookie.name,
            cookie.value
        ));
    }

    lines.join("\n")
}

/// Import cookies from Netscape format file content.
///
/// Lines prefixed with `#HttpOnly_` (curl's extension) are imported as
/// HttpOnly cookies; other `#` lines are comments. Returns how many cookies
/// were stored.
pub fn import_netscape(monster: &mut CookieMonster, content: &str) -> usize {
    let mut count = 0;
    let now = OffsetDateTime::now_utc();

    for line in content.lines() {
        let line = line.trim();

        let (line, http_only) = match line.strip_prefix("#HttpOnly_") {
            Some(rest) => (rest, true),
            None => (line, false),
        };

        // Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 7 {
            tracing::debug!(line = %line, "skipping malformed cookies.txt line");
            continue;
        }

        let domain = parts[0].trim_start_matches('.').to_lowercase();
        let host_only = parts[1].eq_ignore_ascii_case("FALSE");
        let expiry: i64 = parts[4].parse().unwrap_or(0);

        let mut attributes = CookieAttributes::new()
            .with("domain", domain)
            .with("path", parts[2]);
        if parts[3].eq_ignore_ascii_case("TRUE") {
            attributes.insert("secure", "");
        }
        if http_only {
            attributes.insert("httponly", "");
        }

        let expiration_time = if expiry > 0 {
            OffsetDateTime::from_unix_timestamp(expiry).ok()
        } else {
            None
        };

        let cookie = CanonicalCookie {
            name: parts[5].to_string(),
            value: parts[6].to_string(),
            attributes: Some(attributes),
            flags: CookieFlags {
                host_only,
                persistent: expiration_time.is_some(),
            },
            creation_time: now,
            expiration_time,
        };

        if !cookie.is_expired(now) {
            monster.store_at(cookie, now);
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn make_test_cookie(name: &str, domain: &str) -> CanonicalCookie {
        let attributes = CookieAttributes::new()
            .with("domain", domain)
            .with("path", "/")
            .with("secure", "")
            .with("max-age", "2592000");
        CanonicalCookie::with_flags(
            name,
            "test_value",
            attributes,
            CookieFlags {
                host_only: false,
                persistent: true,
            },
        )
    }

    #[test]
    fn test_export_netscape_basic() {
        let mut jar = CookieMonster::new();
        jar.store(make_test_cookie("session", "example.com"));
        jar.store(CanonicalCookie::new("global", "1"));

        let netscape = export_netscape(&jar, None);
        assert!(netscape.contains("# Netscape HTTP Cookie File"));
        assert!(netscape.contains(".example.com\tTRUE\t/\tTRUE\t"));
        assert!(netscape.contains("session"));
        assert!(!netscape.contains("global"));
    }

    #[test]
    fn test_import_netscape_basic() {
        let content = "# Netscape HTTP Cookie File\n\
            .example.com\tTRUE\t/\tTRUE\t4102444800\tsession\tabc123\n\
            #HttpOnly_test.com\tFALSE\t/path\tFALSE\t0\tuser\tjohn\n";

        let mut jar = CookieMonster::new();
        let count = import_netscape(&mut jar, content);

        assert_eq!(count, 2);
        assert_eq!(jar.total_cookie_count(), 2);

        let user = jar
            .iter_all_cookies()
            .find(|c| c.name == "user")
            .unwrap();
        assert!(user.is_http_only());
        assert!(user.flags.host_only);
        assert_eq!(user.domain(), Some("test.com"));
        assert_eq!(user.expiration_time, None);
    }

    #[test]
    fn test_import_netscape_skips_comments_and_expired() {
        let content = "# This is a comment\n\
            # Another comment\n\
            \n\
            .example.com\tTRUE\t/\tTRUE\t0\ttest\tvalue\n\
            .example.com\tTRUE\t/\tTRUE\t1\told\tvalue\n\
            not\tenough\tfields\n";

        let mut jar = CookieMonster::new();
        assert_eq!(import_netscape(&mut jar, content), 1);
    }

    #[test]
    fn test_netscape_roundtrip() {
        let mut jar1 = CookieMonster::new();
        jar1.store(make_test_cookie("cookie1", "example.com"));
        jar1.store(make_test_cookie("cookie2", "test.org"));

        let exported = export_netscape(&jar1, None);

        let mut jar2 = CookieMonster::new();
        assert_eq!(import_netscape(&mut jar2, &exported), 2);
        assert_eq!(
            jar2.cookie_header("www.example.com", "/", true),
            Some("cookie1=test_value".to_string())
        );
    }

    #[test]
    fn test_export_netscape_with_filter() {
        let mut jar = CookieMonster::new();
        jar.store(make_test_cookie("a", "example.com"));
        jar.store(make_test_cookie("b", "other.com"));

        let filtered = export_netscape(&jar, Some("example.com"));

        assert!(filtered.contains("example.com"));
        assert!(!filtered.contains("other.com"));
    }

    #[test]
    fn test_export_netscape_filter_respects_label_boundaries() {
        let mut jar = CookieMonster::new();
        jar.store(make_test_cookie("own", "example.com"));
        jar.store(make_test_cookie("sub", "api.example.com"));
        jar.store(make_test_cookie("lookalike", "notexample.com"));
        jar.store(make_test_cookie("short", "e.com"));

        let filtered = export_netscape(&jar, Some("Example.com"));
        assert!(filtered.contains("\town\t"));
        assert!(filtered.contains("\tsub\t"));
        assert!(!filtered.contains("lookalike"));
        assert!(!filtered.contains("\tshort\t"));

        // A subdomain filter still sees its parent's domain cookie.
        let filtered = export_netscape(&jar, Some("www.example.com"));
        assert!(filtered.contains("\town\t"));
        assert!(!filtered.contains("\tsub\t"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_save_load_roundtrip() {
        use tempfile::tempdir;

        let mut monster = CookieMonster::new();
        monster.store(make_test_cookie("session", "example.com"));
        monster.store(CanonicalCookie::new("global", "1"));

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&monster, &path).unwrap();

        let mut loaded = load_cookies(&path).unwrap();
        assert_eq!(loaded.total_cookie_count(), 2);

        let cookies = loaded.request_pairs("example.com", "/", true);
        assert_eq!(
            cookies,
            vec![
                ("session".to_string(), "test_value".to_string()),
                ("global".to_string(), "1".to_string()),
            ]
        );

        let global = loaded
            .iter_all_cookies()
            .find(|c| c.name == "global")
            .unwrap();
        assert!(global.is_global());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_keeps_saved_expiry() {
        use tempfile::tempdir;

        let now = OffsetDateTime::now_utc();
        let mut monster = CookieMonster::new();
        let cookie = make_test_cookie("a", "example.com").created_at(now - Duration::days(29));
        let expected = cookie.expiration_time;
        monster.store(cookie);

        let dir = tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        save_cookies(&monster, &path).unwrap();

        let loaded = load_cookies(&path).unwrap();
        let restored = loaded.iter_all_cookies().next().unwrap();
        assert_eq!(
            restored.expiration_time.map(|t| t.unix_timestamp()),
            expected.map(|t| t.unix_timestamp())
        );

        let mut later = CookieMonster::new();
        assert_eq!(
            load_cookies_into(&mut later, &path, now + Duration::days(2)).unwrap(),
            0
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_missing_file() {
        let err = load_cookies(Path::new("/nonexistent/cookies.json")).unwrap_err();
        assert!(matches!(err, NetError::CookiePersistence { .. }));
    }
}
