//! Cookie storage, matching and persistence.
//!
//! This module provides a complete cookie management system including:
//!
//! - **Storage**: In-memory cookie jar ([`CookieMonster`](monster::CookieMonster))
//! - **Matching**: RFC 6265 domain and path matching ([`matcher`])
//! - **Expiry**: `Max-Age` / `Expires` handling with the RFC cookie-date parser ([`date`])
//! - **Validation**: Public Suffix List and `__Host-`/`__Secure-` prefix checks
//! - **Persistence**: JSON save/load and Netscape import/export
//!
//! # Architecture
//!
//! This implementation mirrors Chromium's cookie storage architecture:
//!
//! | Chromium (C++) | cookiemonster (Rust) | Responsibility |
//! |----------------|------------------|----------------|
//! | `net::CookieMonster` | [`CookieMonster`](monster::CookieMonster) | Cookie jar with LRU eviction |
//! | `net::CanonicalCookie` | [`CanonicalCookie`](canonical_cookie::CanonicalCookie) | Single cookie representation |
//! | `net::cookie_util` | [`matcher`], [`date`] | Matching and date parsing |
//! | `SqlitePersistentCookieStore` | [`persistence`] | Disk persistence |
//!
//! # Receiving and sending cookies
//!
//! ```rust
//! use cookiemonster::cookies::{CookieAttributes, CookieMonster};
//! use url::Url;
//!
//! let mut jar = CookieMonster::new();
//! let origin = Url::parse("https://www.example.com/login").unwrap();
//!
//! // Attribute maps come from the Set-Cookie parser.
//! jar.set_from_response(
//!     &origin,
//!     [("sid", "abc", CookieAttributes::new().with("Domain", "example.com"))],
//! );
//!
//! assert_eq!(
//!     jar.cookie_header("api.example.com", "/v1", true),
//!     Some("sid=abc".to_string())
//! );
//! assert_eq!(jar.cookie_header("notexample.com", "/", true), None);
//! ```
//!
//! # Chromium References
//!
//! - Cookie monster: `net/cookies/cookie_monster.cc`
//! - Domain matching: `net/cookies/cookie_util.cc`

pub mod attributes;
pub mod canonical_cookie;
pub mod config;
pub mod date;
pub mod matcher;
pub mod monster;
pub mod persistence;
pub mod psl;

pub use attributes::CookieAttributes;
pub use canonical_cookie::{CanonicalCookie, CookieFlags, CookieKey};
pub use config::CookieConfig;
pub use monster::{CookieMonster, Selection, StoreOutcome};
