//! Ergonomic error context helpers.
//!
//! Provides extension traits for adding context to `Result` types,
//! converting IO errors into context-rich `NetError` variants.

use crate::base::neterror::NetError;
use std::io;
use std::path::Path;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add cookie store context to an IO error.
    ///
    /// # Example
    /// ```ignore
    /// use cookiemonster::base::context::IoResultExt;
    ///
    /// let json = std::fs::read_to_string(path).persistence_context(path)?;
    /// // Error: "Cookie store at /tmp/cookies.json failed: No such file or directory"
    /// ```
    fn persistence_context(self, path: &Path) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn persistence_context(self, path: &Path) -> Result<T, NetError> {
        self.map_err(|e| NetError::cookie_persistence(path.display().to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_persistence_context() {
        let result: Result<(), io::Error> = Err(Error::new(ErrorKind::NotFound, "missing"));
        let err = result
            .persistence_context(Path::new("/tmp/cookies.json"))
            .unwrap_err();

        match err {
            NetError::CookiePersistence { path, message } => {
                assert_eq!(path, "/tmp/cookies.json");
                assert_eq!(message, "missing");
            }
            _ => panic!("Expected CookiePersistence"),
        }
    }
}
