use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Cookie Errors
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,
    #[error("Cookie domain is a public suffix")]
    CookiePublicSuffix,
    #[error("Cookie domain does not match request host")]
    CookieDomainMismatch,
    #[error("Cookie name is empty")]
    CookieInvalidName,

    // Persistence Errors
    #[error("Cookie store at {path} failed: {message}")]
    CookiePersistence { path: String, message: String },
    #[error("Invalid cookie data: {reason}")]
    CookieInvalidData { reason: String },

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    /// Create a persistence error for the given store path.
    pub fn cookie_persistence(path: impl Into<String>, message: impl Into<String>) -> Self {
        NetError::CookiePersistence {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid data error.
    pub fn cookie_invalid_data(reason: impl Into<String>) -> Self {
        NetError::CookieInvalidData {
            reason: reason.into(),
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            // Custom codes (starting at -900)
            NetError::CookieInvalidPrefix => -903,
            NetError::CookiePublicSuffix => -904,
            NetError::CookieDomainMismatch => -905,
            NetError::CookieInvalidName => -906,
            NetError::CookiePersistence { .. } => -910,
            NetError::CookieInvalidData { .. } => -911,
            NetError::Unknown(code) => *code,
        }
    }

    /// Whether the error rejected a single cookie rather than failing an
    /// operation on the whole jar.
    pub fn is_cookie_rejection(&self) -> bool {
        matches!(
            self,
            NetError::CookieInvalidPrefix
                | NetError::CookiePublicSuffix
                | NetError::CookieDomainMismatch
                | NetError::CookieInvalidName
        )
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -903 => NetError::CookieInvalidPrefix,
            -904 => NetError::CookiePublicSuffix,
            -905 => NetError::CookieDomainMismatch,
            -906 => NetError::CookieInvalidName,
            _ => NetError::Unknown(code),
        }
    }
}
