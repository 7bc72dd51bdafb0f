use thiserror::Error;

/// Error codes reported by the platform collaborators (wireless stack,
/// temperature sensor, scheduler, reset register).
///
/// These pass through the engine untouched so callers can tell, for example,
/// "not connected" apart from "wireless stack not started".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    #[error("wireless stack not initialized")]
    WifiNotInitialized,

    #[error("station not connected to an access point")]
    WifiNotConnected,

    #[error("operation not supported by the platform")]
    NotSupported,

    #[error("platform operation timed out")]
    Timeout,

    #[error("platform in invalid state")]
    InvalidState,

    #[error("platform failure (code {0:#x})")]
    Failed(i32),
}

impl PlatformError {
    /// Numeric code in the platform's native error space.
    pub fn code(&self) -> i32 {
        match self {
            PlatformError::WifiNotInitialized => 0x3001,
            PlatformError::WifiNotConnected => 0x300f,
            PlatformError::NotSupported => 0x106,
            PlatformError::Timeout => 0x107,
            PlatformError::InvalidState => 0x103,
            PlatformError::Failed(code) => *code,
        }
    }
}

/// Error type for the metrics engine and its embedders
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Out of memory: {0}")]
    NoMemory(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for the metrics engine
pub type Result<T> = std::result::Result<T, MetricsError>;

impl MetricsError {
    /// Error returned by every accessor while the engine is not initialized
    pub fn not_initialized() -> Self {
        MetricsError::InvalidState("metrics engine is not initialized".to_string())
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        MetricsError::InvalidArgument(msg.into())
    }

    pub fn no_memory<S: Into<String>>(msg: S) -> Self {
        MetricsError::NoMemory(msg.into())
    }

    pub fn not_supported<S: Into<String>>(msg: S) -> Self {
        MetricsError::NotSupported(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MetricsError::Config(msg.into())
    }

    /// True for failures that leave the output untouched (no sentinel value)
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            MetricsError::InvalidState(_) | MetricsError::InvalidArgument(_)
        )
    }
}
