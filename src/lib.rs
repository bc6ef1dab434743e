//! # cookiemonster
//!
//! A Chromium-inspired HTTP cookie jar for Rust.
//!
//! `cookiemonster` decides which stored cookies an HTTP client must attach
//! to an outgoing request, and keeps the jar up to date as responses arrive.
//! It consumes already-tokenized `Set-Cookie` attribute maps and produces
//! ordered `(name, value)` pairs for the `Cookie` header; the transport and
//! header parsing live elsewhere.
//!
//! ## Features
//!
//! - **Domain Matching**: RFC 6265 label-boundary suffix matching, host-only
//!   cookies, IP-literal exactness and global (manually created) cookies
//! - **Cookie Jar**: overwrite-on-conflict storage keyed by `(domain, path, name)`,
//!   lazy expiry during selection, explicit purge, per-domain and global limits
//! - **Expiry**: `Max-Age` precedence over `Expires`, RFC 6265 date parsing
//! - **Validation**: Public Suffix List and cookie prefix enforcement
//! - **Persistence**: JSON and Netscape `cookies.txt`
//!
//! ## Quick Start
//!
//! ```rust
//! use cookiemonster::cookies::{CanonicalCookie, CookieAttributes, CookieFlags, CookieMonster};
//!
//! let mut jar = CookieMonster::new();
//! jar.store(CanonicalCookie::with_flags(
//!     "session",
//!     "abc123",
//!     CookieAttributes::new().with("domain", "example.com"),
//!     CookieFlags { host_only: false, persistent: false },
//! ));
//!
//! let pairs = jar.request_pairs("www.example.com", "/", true);
//! assert_eq!(pairs, vec![("session".to_string(), "abc123".to_string())]);
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Core types and error definitions
//! - [`cookies`] - Cookie storage, matching and persistence
//!
//! ## Security
//!
//! Matching fails closed: input that cannot be evaluated safely never
//! matches, and malformed expiry data makes a cookie session-scoped rather
//! than aborting storage.

pub mod base;
pub mod cookies;
