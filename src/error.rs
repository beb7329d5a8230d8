use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    /// No message with the requested id is tracked.
    NotFound,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::NotFound => f.write_str("message not found"),
        }
    }
}

impl std::error::Error for TrackerError {}
