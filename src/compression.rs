use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::errors::{AppError, AppResult};

/// Compress image bytes for storage. Stored bytes are always compressed;
/// transport bytes are always raw.
pub fn compress_bytes(data: &[u8]) -> AppResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len()), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| AppError::InternalError(format!("Failed to compress bytes: {}", e)))?;
    encoder
        .finish()
        .map_err(|e| AppError::InternalError(format!("Failed to compress bytes: {}", e)))
}

pub fn decompress_bytes(data: &[u8]) -> AppResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(data.len());
    decoder
        .read_to_end(&mut out)
        .map_err(|e| AppError::InternalError(format!("Failed to decompress bytes: {}", e)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_bytes() {
        let samples: Vec<Vec<u8>> = vec![
            vec![],
            b"hello world".to_vec(),
            vec![0u8; 4096],
            (0..=255u8).cycle().take(10_000).collect(),
        ];

        for sample in samples {
            let compressed = compress_bytes(&sample).unwrap();
            let restored = decompress_bytes(&compressed).unwrap();
            assert_eq!(restored, sample);
        }
    }

    #[test]
    fn test_compression_shrinks_redundant_input() {
        let data = vec![7u8; 100_000];
        let compressed = compress_bytes(&data).unwrap();
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn test_decompress_rejects_garbage() {
        let result = decompress_bytes(b"definitely not zlib");
        assert!(result.is_err());
    }
}
