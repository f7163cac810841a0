//! Error types for configuration-space operations

use core::fmt;

/// Result type for configuration-space operations
pub type Result<T> = core::result::Result<T, PciError>;

/// Errors that can occur during a configuration-space transaction.
///
/// The taxonomy is deliberately small: every backend failure collapses into
/// one of these two cases, and anything a backend cannot positively identify
/// as an absent device is reported as [`PciError::Io`]. A failed read never
/// turns into a successful read of some default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PciError {
    /// No device answers at the addressed location
    NoDevice,

    /// The transaction failed for any other reason
    Io,
}

impl fmt::Display for PciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => write!(f, "No device at the addressed location"),
            Self::Io => write!(f, "Configuration-space transaction failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PciError::NoDevice.to_string(),
            "No device at the addressed location"
        );
        assert_eq!(
            PciError::Io.to_string(),
            "Configuration-space transaction failed"
        );
    }
}
