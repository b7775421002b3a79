//! Raw deflate + base64, the transport encoding of shared payloads.

use std::io::Write;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::types::MAX_DECOMPRESSED_BYTES;
use crate::{Error, Result};

const INFLATE_CHUNK: usize = 32 * 1024;

/// Standard alphabet, padded on encode, padding optional on decode.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Raw deflate stream of `text`, without zlib or gzip framing.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| Error::Compression(e.to_string()))
}

/// Inflates a raw deflate stream into UTF-8 text.
///
/// Truncated streams, trailing garbage and output over
/// [`MAX_DECOMPRESSED_BYTES`] are all rejected.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    let mut inflater = Decompress::new(false);
    let mut out: Vec<u8> = Vec::with_capacity((bytes.len() * 4).min(MAX_DECOMPRESSED_BYTES));

    loop {
        if out.len() == out.capacity() {
            out.reserve(INFLATE_CHUNK);
        }
        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let status = inflater
            .decompress_vec(&bytes[in_before as usize..], &mut out, FlushDecompress::None)
            .map_err(|e| Error::Compression(e.to_string()))?;

        if out.len() > MAX_DECOMPRESSED_BYTES {
            return Err(Error::Compression("decompressed payload too large".to_string()));
        }
        match status {
            Status::StreamEnd => break,
            _ if inflater.total_in() == in_before && inflater.total_out() == out_before => {
                return Err(Error::Compression("truncated deflate stream".to_string()));
            }
            _ => {}
        }
    }

    if inflater.total_in() != bytes.len() as u64 {
        return Err(Error::Compression("trailing data after deflate stream".to_string()));
    }

    String::from_utf8(out).map_err(|e| Error::Compression(e.to_string()))
}

pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| Error::Compression(e.to_string()))
}

pub fn compress_string_to_base64(text: &str) -> Result<String> {
    Ok(to_base64(&compress(text)?))
}

pub fn decompress_base64_to_string(base64: &str) -> Result<String> {
    decompress(&from_base64(base64)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_str() -> String {
        (0..10_000u64)
            .map(|i| (i * i).to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    fn is_base64(s: &str) -> bool {
        !s.is_empty()
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
    }

    #[test]
    fn test_outputs_base64_alphabet_only() {
        let compressed = compress_string_to_base64(&long_str()).unwrap();
        assert!(is_base64(&compressed));
    }

    fn saved_percent(input: &str) -> f64 {
        let compressed = compress_string_to_base64(input).unwrap();
        100.0 - (compressed.len() as f64 / input.len() as f64) * 100.0
    }

    #[test]
    fn test_structured_input_shrinks_by_more_than_40_percent() {
        let input = (0..10_000)
            .map(|i| format!("{{\"text\":\"No :( #{}\"}}", i % 50))
            .collect::<Vec<_>>()
            .join(",");
        let saved = saved_percent(&input);
        assert!(saved > 40.0, "only saved {saved:.1}%");
    }

    #[test]
    fn test_numeric_input_still_shrinks() {
        let saved = saved_percent(&long_str());
        assert!(saved > 30.0, "only saved {saved:.1}%");
    }

    #[test]
    fn test_compression_is_deterministic() {
        let first = compress_string_to_base64("compress_string_to_base64").unwrap();
        for _ in 0..100 {
            assert_eq!(compress_string_to_base64("compress_string_to_base64").unwrap(), first);
        }
    }

    #[test]
    fn test_edge_case_strings_round_trip() {
        for input in ["", "a", "hello", "💖 café 你好"] {
            let compressed = compress_string_to_base64(input).unwrap();
            assert_eq!(decompress_base64_to_string(&compressed).unwrap(), input);
        }
    }

    #[test]
    fn test_large_input_round_trips() {
        let input = long_str();
        let compressed = compress_string_to_base64(&input).unwrap();
        assert_eq!(decompress_base64_to_string(&compressed).unwrap(), input);
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(decompress_base64_to_string("not base64").is_err());
        assert!(decompress_base64_to_string("@@@=").is_err());
    }

    #[test]
    fn test_padding_is_optional_on_decode() {
        assert_eq!(from_base64("aGk=").unwrap(), b"hi");
        assert_eq!(from_base64("aGk").unwrap(), b"hi");
        assert_eq!(to_base64(b"hi"), "aGk=");
    }

    #[test]
    fn test_rejects_truncated_stream() {
        let compressed = compress(&long_str()).unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert!(decompress(truncated).is_err());
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        let mut compressed = compress("hello").unwrap();
        compressed.extend_from_slice(b"junk");
        assert!(decompress(&compressed).is_err());
    }

    #[test]
    fn test_rejects_oversized_output() {
        let bomb = "a".repeat(MAX_DECOMPRESSED_BYTES + 1);
        let compressed = compress(&bomb).unwrap();
        assert!(compressed.len() < 16 * 1024);
        assert!(decompress(&compressed).is_err());
    }
}
