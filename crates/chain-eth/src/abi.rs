//! Minimal ABI encoding for EVM function calls.
//!
//! Just enough to build ERC-20 call data: a 4-byte selector followed by
//! 32-byte parameter words. No dynamic types, no full ABI parser.

/// A single statically-encoded ABI parameter.
#[derive(Debug, Clone)]
pub enum AbiParam {
    /// A 20-byte address, left-padded to 32 bytes.
    Address([u8; 20]),
    /// A 256-bit unsigned integer as a big-endian 32-byte array.
    Uint256([u8; 32]),
}

/// Encode a function call: `selector || word(params[0]) || word(params[1]) ...`
pub fn encode_function_call(selector: [u8; 4], params: &[AbiParam]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + params.len() * 32);
    data.extend_from_slice(&selector);

    for param in params {
        data.extend_from_slice(&encode_param(param));
    }

    data
}

/// Encode one parameter as a 32-byte ABI word.
fn encode_param(param: &AbiParam) -> [u8; 32] {
    match param {
        AbiParam::Address(addr) => {
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr);
            word
        }
        AbiParam::Uint256(value) => *value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_word_is_left_padded() {
        let mut addr = [0u8; 20];
        addr[0] = 0xde;
        addr[19] = 0xad;

        let word = encode_param(&AbiParam::Address(addr));

        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &addr);
    }

    #[test]
    fn uint256_word_passes_through() {
        let mut value = [0u8; 32];
        value[31] = 42;
        assert_eq!(encode_param(&AbiParam::Uint256(value)), value);
    }

    #[test]
    fn selector_only_call() {
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let data = encode_function_call(selector, &[]);
        assert_eq!(data, selector.to_vec());
    }

    #[test]
    fn call_with_address_and_amount() {
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let mut addr = [0u8; 20];
        addr[19] = 0x01;
        let mut amount = [0u8; 32];
        amount[31] = 100;

        let data =
            encode_function_call(selector, &[AbiParam::Address(addr), AbiParam::Uint256(amount)]);

        // 4-byte selector + 2 * 32-byte words.
        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &selector);
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(data[35], 0x01);
        assert_eq!(data[67], 100);
    }
}
