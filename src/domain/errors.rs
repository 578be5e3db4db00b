/// Error type shared by the gesture cores and their browser adapters.
///
/// Event handlers never return these; they only surface from construction,
/// config loading and the refresh race (where they are logged, not propagated).
#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    InvalidConfig(String),
    RefreshFailed(String),
    RefreshTimedOut { after_ms: u32 },
    BrowserApi(String),
}

impl std::fmt::Display for GestureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureError::InvalidConfig(msg) => write!(f, "Invalid gesture config: {}", msg),
            GestureError::RefreshFailed(msg) => write!(f, "Refresh failed: {}", msg),
            GestureError::RefreshTimedOut { after_ms } => {
                write!(f, "Refresh timed out after {}ms", after_ms)
            }
            GestureError::BrowserApi(msg) => write!(f, "Browser API error: {}", msg),
        }
    }
}

impl std::error::Error for GestureError {}

pub type GestureResult<T> = Result<T, GestureError>;
