//! Compression codec selection shared by the Parquet and Feather writers

use crate::{Result, TableError};
use arrow::ipc::CompressionType;
use parquet::basic::Compression;

/// Compression codec requested by a caller.
///
/// The discriminants mirror the integer protocol used across the C
/// boundary: 0 uncompressed, 1 snappy, 2 gzip, 3 brotli, 4 zstd, 5 lz4,
/// 6 lz4-frame, 7 lzo, 8 bz2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Uncompressed,
    Snappy,
    Gzip,
    Brotli,
    Zstd,
    Lz4,
    Lz4Frame,
    Lzo,
    Bz2,
}

impl Codec {
    /// Map an integer code from the boundary to a codec.
    pub fn from_code(code: i32) -> Result<Self> {
        Ok(match code {
            0 => Codec::Uncompressed,
            1 => Codec::Snappy,
            2 => Codec::Gzip,
            3 => Codec::Brotli,
            4 => Codec::Zstd,
            5 => Codec::Lz4,
            6 => Codec::Lz4Frame,
            7 => Codec::Lzo,
            8 => Codec::Bz2,
            _ => {
                return Err(TableError::invalid_argument(format!(
                    "unknown compression code {}",
                    code
                )))
            }
        })
    }

    /// The Parquet codec for this selection.
    ///
    /// LZO and BZ2 have no parquet-rs backend and LZ4_FRAME is not a
    /// Parquet codec, so those fail here rather than deep inside the
    /// writer.
    pub fn to_parquet(self) -> Result<Compression> {
        Ok(match self {
            Codec::Uncompressed => Compression::UNCOMPRESSED,
            Codec::Snappy => Compression::SNAPPY,
            Codec::Gzip => Compression::GZIP(Default::default()),
            Codec::Brotli => Compression::BROTLI(Default::default()),
            Codec::Zstd => Compression::ZSTD(Default::default()),
            Codec::Lz4 => Compression::LZ4,
            Codec::Lz4Frame | Codec::Lzo | Codec::Bz2 => {
                return Err(TableError::unsupported(format!(
                    "{:?} is not available as a Parquet codec",
                    self
                )))
            }
        })
    }

    /// The IPC body compression for this selection, used for Feather
    /// (Feather V2 only defines lz4-frame and zstd).
    pub fn to_ipc(self) -> Result<Option<CompressionType>> {
        Ok(match self {
            Codec::Uncompressed => None,
            Codec::Lz4Frame => Some(CompressionType::LZ4_FRAME),
            Codec::Zstd => Some(CompressionType::ZSTD),
            _ => {
                return Err(TableError::unsupported(format!(
                    "{:?} is not available as a Feather codec (use lz4-frame or zstd)",
                    self
                )))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_codes_round_trip() {
        let codecs = [
            Codec::Uncompressed,
            Codec::Snappy,
            Codec::Gzip,
            Codec::Brotli,
            Codec::Zstd,
            Codec::Lz4,
            Codec::Lz4Frame,
            Codec::Lzo,
            Codec::Bz2,
        ];
        for (code, codec) in codecs.iter().enumerate() {
            assert_eq!(Codec::from_code(code as i32).unwrap(), *codec);
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(Codec::from_code(9).is_err());
        assert!(Codec::from_code(-1).is_err());
    }

    #[test]
    fn test_parquet_mapping() {
        assert_eq!(
            Codec::Snappy.to_parquet().unwrap(),
            Compression::SNAPPY
        );
        assert!(Codec::Lzo.to_parquet().is_err());
        assert!(Codec::Bz2.to_parquet().is_err());
    }

    #[test]
    fn test_ipc_mapping() {
        assert_eq!(Codec::Uncompressed.to_ipc().unwrap(), None);
        assert_eq!(
            Codec::Zstd.to_ipc().unwrap(),
            Some(CompressionType::ZSTD)
        );
        assert!(Codec::Snappy.to_ipc().is_err());
    }
}
