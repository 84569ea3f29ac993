//! Block representation helpers.

use crate::error::{AesError, Result};

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Copies a caller slice into a block, rejecting anything that is not 16 bytes.
pub fn block_from_slice(bytes: &[u8]) -> Result<Block> {
    bytes
        .try_into()
        .map_err(|_| AesError::InvalidBlockLength { len: bytes.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_from_slice_checks_length() {
        let bytes = [7u8; 16];
        assert_eq!(block_from_slice(&bytes), Ok(bytes));
        assert_eq!(
            block_from_slice(&bytes[..15]),
            Err(AesError::InvalidBlockLength { len: 15 })
        );
        assert_eq!(
            block_from_slice(&[0u8; 17]),
            Err(AesError::InvalidBlockLength { len: 17 })
        );
    }
}
