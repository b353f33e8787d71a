//! Error handling for the gmcrypt ecosystem

pub mod types;

// Re-export the primary error type and result
pub use types::{Error, Result};

// Standard library error conversions
impl From<std::array::TryFromSliceError> for Error {
    fn from(_: std::array::TryFromSliceError) -> Self {
        Self::InvalidLength {
            context: "array conversion",
            expected: 0, // Unknown expected size
            actual: 0,   // Unknown actual size
        }
    }
}

impl std::error::Error for Error {}
