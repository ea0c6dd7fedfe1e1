//! A compressed block tagged with its format.

use crate::{BlockCodecError, BlockFormat};

/// One compressed block. The variant determines the layout of the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressedBlock {
    /// 8 byte BC1 block.
    Bc1([u8; 8]),
    /// 16 byte BC2 block.
    Bc2([u8; 16]),
    /// 16 byte BC3 block.
    Bc3([u8; 16]),
}

impl CompressedBlock {
    /// Copies a block of the given format out of a slice.
    ///
    /// # Errors
    ///
    /// [`BlockCodecError::InvalidBlockLength`] if `data` is not exactly one block long.
    pub fn from_slice(data: &[u8], format: BlockFormat) -> Result<Self, BlockCodecError> {
        let invalid = || BlockCodecError::InvalidBlockLength {
            format,
            expected: format.block_size(),
            actual: data.len(),
        };

        Ok(match format {
            BlockFormat::Bc1 => Self::Bc1(data.try_into().map_err(|_| invalid())?),
            BlockFormat::Bc2 => Self::Bc2(data.try_into().map_err(|_| invalid())?),
            BlockFormat::Bc3 => Self::Bc3(data.try_into().map_err(|_| invalid())?),
        })
    }

    /// Format of this block.
    pub fn format(&self) -> BlockFormat {
        match self {
            Self::Bc1(_) => BlockFormat::Bc1,
            Self::Bc2(_) => BlockFormat::Bc2,
            Self::Bc3(_) => BlockFormat::Bc3,
        }
    }

    /// The raw block bytes, exactly [`BlockFormat::block_size`] long.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Bc1(bytes) => bytes.as_slice(),
            Self::Bc2(bytes) | Self::Bc3(bytes) => bytes.as_slice(),
        }
    }
}

impl AsRef<[u8]> for CompressedBlock {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BlockFormat::Bc1)]
    #[case(BlockFormat::Bc2)]
    #[case(BlockFormat::Bc3)]
    fn from_slice_keeps_bytes(#[case] format: BlockFormat) {
        let data: Vec<u8> = (0..format.block_size() as u8).collect();
        let block = CompressedBlock::from_slice(&data, format).unwrap();
        assert_eq!(block.format(), format);
        assert_eq!(block.as_bytes(), data.as_slice());
    }

    #[rstest]
    #[case(BlockFormat::Bc1, 16)]
    #[case(BlockFormat::Bc2, 8)]
    #[case(BlockFormat::Bc3, 0)]
    #[case(BlockFormat::Bc3, 17)]
    fn from_slice_rejects_wrong_length(#[case] format: BlockFormat, #[case] len: usize) {
        let data = vec![0u8; len];
        let result = CompressedBlock::from_slice(&data, format);
        assert_eq!(
            result,
            Err(BlockCodecError::InvalidBlockLength {
                format,
                expected: format.block_size(),
                actual: len,
            })
        );
    }
}
