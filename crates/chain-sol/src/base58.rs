//! Base58 codec for Solana public keys.
//!
//! Addresses, mints and blockhashes are Base58-encoded 32-byte values.
//! The decoder is implemented by hand with positional big-integer
//! accumulation so the output width can be pinned to exactly 32 bytes:
//! short decodes are left-padded with zero bytes, oversized decodes keep
//! only their last 32 bytes. Every value this crate consumes is an
//! Ed25519 public key or a blockhash, so the fixed width is not a loss.
//!
//! Encoding delegates to `bs58`, which uses the same alphabet.

use crate::error::SolError;

/// The Bitcoin/Solana Base58 alphabet. Excludes `0`, `I`, `O` and `l`.
const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Width of every decoded value: an Ed25519 public key or a blockhash.
pub const PUBKEY_LEN: usize = 32;

fn digit_value(c: char) -> Result<u32, SolError> {
    if c.is_ascii() {
        if let Some(index) = ALPHABET.iter().position(|&a| a == c as u8) {
            return Ok(index as u32);
        }
    }
    Err(SolError::InvalidCharacter(c))
}

/// Decode a Base58 string into a fixed 32-byte value.
///
/// Characters outside the alphabet fail with [`SolError::InvalidCharacter`].
/// Leading `'1'` characters map to leading zero bytes per the Base58
/// convention.
pub fn decode_pubkey(s: &str) -> Result<[u8; PUBKEY_LEN], SolError> {
    // Positional accumulation (value = value * 58 + digit), carried out on
    // a big-endian byte vector since the value exceeds any machine word.
    let mut bytes: Vec<u8> = Vec::with_capacity(PUBKEY_LEN);
    for c in s.chars() {
        let mut carry = digit_value(c)?;
        for b in bytes.iter_mut().rev() {
            carry += u32::from(*b) * 58;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    // Each leading zero byte was encoded as '1'; restore them.
    let leading_zeros = s.chars().take_while(|&c| c == '1').count();
    let mut decoded = vec![0u8; leading_zeros];
    decoded.extend_from_slice(&bytes);

    // Pin to the pubkey width.
    let mut key = [0u8; PUBKEY_LEN];
    if decoded.len() >= PUBKEY_LEN {
        key.copy_from_slice(&decoded[decoded.len() - PUBKEY_LEN..]);
    } else {
        key[PUBKEY_LEN - decoded.len()..].copy_from_slice(&decoded);
    }
    Ok(key)
}

/// Encode bytes as a Base58 string.
pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}
