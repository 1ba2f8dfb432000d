//! Contract ABI encoding/decoding utilities
//!
//! Solidity ABI layout for the handful of shapes the mint contract uses:
//! - Call data: 4-byte Keccak-256 selector of the signature + 32-byte words
//! - `uint256`: big-endian word, left-padded with zeros
//! - `string`: offset word, length word, UTF-8 bytes padded to a word boundary

use sha3::{Digest, Keccak256};
use thiserror::Error;

/// ABI word size in bytes
pub const WORD: usize = 32;

/// Compute the 4-byte function selector for a canonical signature like `mint(uint256)`
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Encode an unsigned value as a `uint256` word
pub fn encode_uint256(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Build call data for `signature` with static `uint256` arguments
pub fn encode_call(signature: &str, args: &[u128]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&function_selector(signature));
    for arg in args {
        data.extend_from_slice(&encode_uint256(*arg));
    }
    data
}

/// Same as [`encode_call`], hex-encoded with a `0x` prefix
pub fn encode_call_hex(signature: &str, args: &[u128]) -> String {
    bytes_to_hex(&encode_call(signature, args))
}

/// Decode the first `uint256` word of a return value.
///
/// Values above `u128::MAX` are rejected rather than truncated.
pub fn decode_uint256(data: &[u8]) -> Result<u128, AbiDecodeError> {
    decode_word_at(data, 0)
}

/// Decode the first word of a return value as `u64`
pub fn decode_u64(data: &[u8]) -> Result<u64, AbiDecodeError> {
    let value = decode_uint256(data)?;
    u64::try_from(value).map_err(|_| AbiDecodeError::Overflow)
}

/// Decode a single dynamic `string` return value
pub fn decode_string(data: &[u8]) -> Result<String, AbiDecodeError> {
    let offset = usize::try_from(decode_word_at(data, 0)?).map_err(|_| AbiDecodeError::Overflow)?;
    let len_word = offset.checked_add(WORD).ok_or(AbiDecodeError::Overflow)?;
    if data.len() < len_word {
        return Err(AbiDecodeError::TooShort {
            needed: len_word,
            found: data.len(),
        });
    }

    let len = usize::try_from(decode_word_at(data, offset)?).map_err(|_| AbiDecodeError::Overflow)?;
    let end = len_word.checked_add(len).ok_or(AbiDecodeError::Overflow)?;
    let bytes = data.get(len_word..end).ok_or(AbiDecodeError::TooShort {
        needed: end,
        found: data.len(),
    })?;

    String::from_utf8(bytes.to_vec()).map_err(|_| AbiDecodeError::InvalidUtf8)
}

fn decode_word_at(data: &[u8], offset: usize) -> Result<u128, AbiDecodeError> {
    let end = offset.checked_add(WORD).ok_or(AbiDecodeError::Overflow)?;
    let word = data.get(offset..end).ok_or(AbiDecodeError::TooShort {
        needed: end,
        found: data.len(),
    })?;

    if word[..16].iter().any(|b| *b != 0) {
        return Err(AbiDecodeError::Overflow);
    }

    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

/// `0x`-prefixed lowercase hex
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex data with or without the `0x` prefix. `"0x"` decodes to empty.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, AbiDecodeError> {
    let body = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(body).map_err(|_| AbiDecodeError::InvalidHex)
}

/// Encode a JSON-RPC quantity (`0x` + hex without leading zeros, zero is `0x0`)
pub fn to_quantity_hex(value: u128) -> String {
    format!("{:#x}", value)
}

/// Parse a JSON-RPC quantity
pub fn parse_quantity_hex(s: &str) -> Result<u128, AbiDecodeError> {
    let body = s.strip_prefix("0x").ok_or(AbiDecodeError::InvalidHex)?;
    if body.is_empty() {
        return Err(AbiDecodeError::InvalidHex);
    }
    u128::from_str_radix(body, 16).map_err(|_| AbiDecodeError::InvalidHex)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiDecodeError {
    #[error("Invalid hex string")]
    InvalidHex,
    #[error("Data too short: need {needed} bytes, found {found}")]
    TooShort { needed: usize, found: usize },
    #[error("Value does not fit the target integer")]
    Overflow,
    #[error("String is not valid UTF-8")]
    InvalidUtf8,
}
