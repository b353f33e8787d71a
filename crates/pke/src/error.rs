//! Error handling for PKE operations.

use core::fmt;
use gmcrypt_algorithms::error::Error as PrimitiveError;
use gmcrypt_api::error::Error as CoreError;

/// Error type for PKE operations.
#[derive(Debug)]
pub enum Error {
    /// Failure bubbled up from the primitive layer
    Primitive(PrimitiveError),
    /// A decoded point does not satisfy the curve equation
    InvalidPoint(&'static str),
    /// A required-nonzero computation produced the point at infinity
    InfinityPoint(&'static str),
    /// The derived key stream was all zero and the retry budget ran out
    ZeroDerivedKey,
    /// The recomputed hash tag does not match the ciphertext tag
    IntegrityCheckFailed,
    /// Structurally malformed ciphertext
    InvalidCiphertextFormat(&'static str),
    /// Invalid plaintext input
    InvalidPlaintext(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "PKE primitive error: {}", e),
            Error::InvalidPoint(reason) => write!(f, "Invalid curve point: {}", reason),
            Error::InfinityPoint(reason) => write!(f, "Point at infinity: {}", reason),
            Error::ZeroDerivedKey => {
                write!(f, "KDF produced an all-zero key stream; retries exhausted")
            }
            Error::IntegrityCheckFailed => write!(f, "Ciphertext integrity check failed"),
            Error::InvalidCiphertextFormat(reason) => {
                write!(f, "Invalid ciphertext format: {}", reason)
            }
            Error::InvalidPlaintext(reason) => write!(f, "Invalid plaintext: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Primitive(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::InvalidPoint(reason) => CoreError::InvalidCiphertext {
                context: "SM2",
                message: reason.to_string(),
            },
            Error::InfinityPoint(reason) => CoreError::InvalidKey {
                context: "SM2",
                message: reason.to_string(),
            },
            Error::ZeroDerivedKey => CoreError::Other {
                context: "SM2 Encryption",
                message: "derived key stream was all zero".to_string(),
            },
            Error::IntegrityCheckFailed => CoreError::DecryptionFailed {
                context: "SM2 Decryption",
                message: "integrity tag mismatch".to_string(),
            },
            Error::InvalidCiphertextFormat(reason) => CoreError::InvalidCiphertext {
                context: "SM2",
                message: reason.to_string(),
            },
            Error::InvalidPlaintext(reason) => CoreError::InvalidParameter {
                context: "SM2 Encryption",
                message: reason.to_string(),
            },
        }
    }
}

/// Result type for PKE operations.
pub type Result<T> = core::result::Result<T, Error>;
