//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): error codes for cookie rejection and persistence
//! - [`IoResultExt`](context::IoResultExt): IO error context

pub mod context;
pub mod neterror;
