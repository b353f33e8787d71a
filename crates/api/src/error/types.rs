//! Error type definitions for cryptographic operations

/// Primary error type for cryptographic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid key error
    InvalidKey {
        context: &'static str,
        message: String,
    },

    /// Decryption error
    DecryptionFailed {
        context: &'static str,
        message: String,
    },

    /// Invalid ciphertext error
    InvalidCiphertext {
        context: &'static str,
        message: String,
    },

    /// Invalid length error with context
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Invalid parameter error
    InvalidParameter {
        context: &'static str,
        message: String,
    },

    /// Random generation error
    RandomGenerationError {
        context: &'static str,
        message: String,
    },

    /// Authentication failed error
    AuthenticationFailed {
        context: &'static str,
        message: String,
    },

    /// Other error
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Add context to an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidKey { message, .. } => Self::InvalidKey { context, message },
            Self::DecryptionFailed { message, .. } => Self::DecryptionFailed { context, message },
            Self::InvalidCiphertext { message, .. } => Self::InvalidCiphertext { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { message, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { message, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::AuthenticationFailed { message, .. } => {
                Self::AuthenticationFailed { context, message }
            }
            Self::Other { message, .. } => Self::Other { context, message },
        }
    }

    /// Add a message to an existing error
    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self {
            Self::InvalidKey { context, .. } => Self::InvalidKey { context, message },
            Self::DecryptionFailed { context, .. } => Self::DecryptionFailed { context, message },
            Self::InvalidCiphertext { context, .. } => Self::InvalidCiphertext { context, message },
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidParameter { context, .. } => Self::InvalidParameter { context, message },
            Self::RandomGenerationError { context, .. } => {
                Self::RandomGenerationError { context, message }
            }
            Self::AuthenticationFailed { context, .. } => {
                Self::AuthenticationFailed { context, message }
            }
            Self::Other { context, .. } => Self::Other { context, message },
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidKey { context, .. } => {
                write!(f, "Invalid key: {}", context)
            }
            Self::DecryptionFailed { context, .. } => {
                write!(f, "Decryption failed: {}", context)
            }
            Self::InvalidCiphertext { context, .. } => {
                write!(f, "Invalid ciphertext: {}", context)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            Self::RandomGenerationError { context, message } => {
                write!(f, "Random generation error: {}: {}", context, message)
            }
            Self::AuthenticationFailed { context, message } => {
                write!(f, "Authentication failed: {}: {}", context, message)
            }
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
        }
    }
}
