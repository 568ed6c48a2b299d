use std::fmt;

#[derive(Debug)]
pub enum CatalogError {
    Network(reqwest::Error),
    Status { url: String, status: u16 },
    Decode(serde_json::Error),
    InvalidPage(usize),
    Config(String),
}

/// Coarse classification used by front ends to phrase a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    InvalidInput,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Network(_) | CatalogError::Status { .. } => ErrorKind::Network,
            CatalogError::Decode(_) => ErrorKind::Decode,
            CatalogError::InvalidPage(_) | CatalogError::Config(_) => ErrorKind::InvalidInput,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Network(e) => write!(f, "Network error: {}", e),
            CatalogError::Status { url, status } => {
                write!(f, "Network error: {} returned HTTP {}", url, status)
            }
            CatalogError::Decode(e) => write!(f, "Unexpected response shape: {}", e),
            CatalogError::InvalidPage(page) => write!(f, "Invalid page number: {}", page),
            CatalogError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Network(e) => Some(e),
            CatalogError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Network(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err)
    }
}
