//! base64url codec for VAPID key material
//!
//! The key-source endpoint hands out the application server key as an
//! unpadded URL-safe base64 string; the push service wants raw bytes.

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::error::DecodeError;

/// Decode a URL-safe base64 string into raw bytes.
///
/// Accepts both padded and unpadded input (trailing `=` is stripped before
/// decoding). Fails with [`DecodeError`] on any character outside the
/// base64url alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let unpadded = input.trim_end_matches('=');
    Base64UrlUnpadded::decode_vec(unpadded)
        .map_err(|e| DecodeError(format!("{e} in {:?}", truncate_for_error(input))))
}

/// Encode raw bytes as unpadded URL-safe base64.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

fn truncate_for_error(input: &str) -> String {
    const MAX: usize = 16;
    if input.chars().count() > MAX {
        let head: String = input.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_roundtrips_arbitrary_bytes() {
        let cases: Vec<Vec<u8>> = vec![
            vec![],
            vec![0x00],
            vec![0xff, 0xfe, 0xfd],
            (0u8..=255).collect(),
            vec![0x04; 65], // uncompressed P-256 point length
        ];
        for bytes in cases {
            let encoded = encode(&bytes);
            assert_eq!(decode(&encoded).unwrap(), bytes);
        }
    }

    #[test]
    fn decode_accepts_urlsafe_alphabet() {
        // 0xfb 0xff decodes from "-_8", exercising both translated chars
        let bytes = decode("-_8").unwrap();
        assert_eq!(bytes, vec![0xfb, 0xff]);
    }

    #[test]
    fn decode_accepts_padded_input() {
        assert_eq!(decode("AQID").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode("AQI=").unwrap(), vec![1, 2]);
        assert_eq!(decode("AQ==").unwrap(), vec![1]);
    }

    #[test]
    fn decode_rejects_standard_alphabet_chars() {
        // '+' and '/' belong to standard base64, not base64url
        assert!(decode("a+b/").is_err());
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode("not base64!!").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn decode_is_deterministic() {
        let encoded = encode(&[7, 7, 7, 7, 7]);
        assert_eq!(decode(&encoded).unwrap(), decode(&encoded).unwrap());
    }

    #[test]
    fn error_message_truncates_long_input() {
        let long = "!".repeat(200);
        let err = decode(&long).unwrap_err();
        assert!(err.to_string().len() < 120);
        assert!(err.to_string().contains("..."));
    }
}
