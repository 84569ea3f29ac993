//! Error type for the AES entry points.

use thiserror::Error;

/// Errors raised when a caller hands the cipher malformed input.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AesError {
    /// The key slice was not exactly 16 bytes.
    #[error("AES-128 key must be 16 bytes, got {len}")]
    InvalidKeyLength {
        /// Length of the rejected slice.
        len: usize,
    },

    /// The block slice was not exactly 16 bytes.
    #[error("AES block must be 16 bytes, got {len}")]
    InvalidBlockLength {
        /// Length of the rejected slice.
        len: usize,
    },

    /// The multiplier is not one of the MixColumns constants.
    #[error("unsupported GF(2^8) multiplier {0:#04x}")]
    UnsupportedMultiplier(u8),
}

/// Result alias for AES operations.
pub type Result<T> = core::result::Result<T, AesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AesError::InvalidKeyLength { len: 15 };
        assert_eq!(err.to_string(), "AES-128 key must be 16 bytes, got 15");

        let err = AesError::InvalidBlockLength { len: 32 };
        assert_eq!(err.to_string(), "AES block must be 16 bytes, got 32");

        let err = AesError::UnsupportedMultiplier(0x04);
        assert_eq!(err.to_string(), "unsupported GF(2^8) multiplier 0x04");
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(AesError::InvalidKeyLength { len: 0 });
        assert!(err.to_string().contains("16 bytes"));
    }
}
