use std::path::PathBuf;

/// Failure to obtain or parse the route dataset. Fatal to the initial render.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("HTTP {status}: data file could not be fetched")]
    Http { status: u16 },

    #[error("Failed to fetch data file: {0}")]
    Request(String),

    #[error("Failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Data file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data file does not match the expected schema: {0}")]
    Schema(String),
}

/// Reasons a location request can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("Location access was denied.")]
    PermissionDenied,

    #[error("Location information is unavailable.")]
    Unavailable,

    #[error("Timed out while getting the location.")]
    Timeout,

    #[error("This browser does not support geolocation.")]
    Unsupported,
}

impl GeolocationError {
    /// Map the W3C `GeolocationPositionError.code` values.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::Unavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unsupported,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Persisted state unusable: {0}")]
    PersistedState(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
