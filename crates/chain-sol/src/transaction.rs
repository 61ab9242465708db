//! Solana legacy transaction wire format.
//!
//! Transactions are assembled entirely by hand — no `solana-sdk`
//! dependency. The layout is fixed by the protocol:
//!
//! ```text
//! Transaction:
//!   num_signatures          compact-u16
//!   signatures              64 bytes * num_signatures (zero placeholders
//!                           here; the external signer fills them in)
//!   message:
//!     num_required_sigs     u8
//!     num_readonly_signed   u8
//!     num_readonly_unsigned u8
//!     num_accounts          compact-u16
//!     account_keys          32 bytes * num_accounts
//!     recent_blockhash      32 bytes
//!     num_instructions      compact-u16
//!     instructions[]        program_id_index u8, account indices, data
//! ```
//!
//! This crate only ever produces unsigned payloads: the wallet SDK owns the
//! keys, so every signature slot is emitted as 64 zero bytes and the whole
//! transaction is base64-encoded for the signer's `signAndSend` call.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::SolError;

/// The Solana System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// System Program `Transfer` instruction index (little-endian u32).
const SYSTEM_TRANSFER_INDEX: u32 = 2;

/// An Ed25519 signature occupies 64 bytes on the wire.
const SIGNATURE_LEN: usize = 64;

/// Encode a `u16` in Solana's compact-u16 format (1-3 bytes, 7 bits per
/// byte, high bit set on all but the last byte).
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = u32::from(value);
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// A single account reference in an instruction.
#[derive(Debug, Clone)]
pub struct AccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

/// An instruction before compilation into a transaction.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// An instruction with account references replaced by u8 indices into the
/// transaction's account table.
#[derive(Debug, Clone)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub account_indices: Vec<u8>,
    pub data: Vec<u8>,
}

/// An unsigned legacy transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Distinct account keys in canonical order: writable signers (fee
    /// payer first), read-only signers, writable non-signers, read-only
    /// non-signers.
    pub account_keys: Vec<[u8; 32]>,

    pub num_required_signatures: u8,
    pub num_readonly_signed: u8,
    pub num_readonly_unsigned: u8,

    /// Recent blockhash; single-use, fetched fresh per build.
    pub recent_blockhash: [u8; 32],

    pub instructions: Vec<CompiledInstruction>,
}

impl Transaction {
    /// Serialize the message (the bytes the signer signs).
    pub fn serialize_message(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);

        buf.push(self.num_required_signatures);
        buf.push(self.num_readonly_signed);
        buf.push(self.num_readonly_unsigned);

        buf.extend_from_slice(&encode_compact_u16(self.account_keys.len() as u16));
        for key in &self.account_keys {
            buf.extend_from_slice(key);
        }

        buf.extend_from_slice(&self.recent_blockhash);

        buf.extend_from_slice(&encode_compact_u16(self.instructions.len() as u16));
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            buf.extend_from_slice(&encode_compact_u16(ix.account_indices.len() as u16));
            buf.extend_from_slice(&ix.account_indices);

            buf.extend_from_slice(&encode_compact_u16(ix.data.len() as u16));
            buf.extend_from_slice(&ix.data);
        }

        buf
    }

    /// Serialize the full wire format with zeroed signature placeholders.
    pub fn serialize(&self) -> Vec<u8> {
        let message = self.serialize_message();
        let placeholder_len = SIGNATURE_LEN * usize::from(self.num_required_signatures);

        let mut wire = Vec::with_capacity(1 + placeholder_len + message.len());
        wire.extend_from_slice(&encode_compact_u16(u16::from(self.num_required_signatures)));
        wire.resize(wire.len() + placeholder_len, 0);
        wire.extend_from_slice(&message);
        wire
    }

    /// Base64 encoding of the unsigned wire format, the form the external
    /// signer consumes.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.serialize())
    }
}

/// Build a native SOL transfer: a System Program `Transfer` instruction
/// moving `lamports` from `from` to `to`.
pub fn build_native_transfer(
    from: &[u8; 32],
    to: &[u8; 32],
    lamports: u64,
    recent_blockhash: &[u8; 32],
) -> Result<Transaction, SolError> {
    if lamports == 0 {
        return Err(SolError::TransactionBuildError(
            "lamports must be > 0".into(),
        ));
    }

    let instruction = system_transfer_instruction(from, to, lamports);
    compile(&[instruction], from, recent_blockhash)
}

/// A System Program `Transfer` instruction.
///
/// Instruction data: u32 LE index (2 = Transfer) + u64 LE lamports,
/// 12 bytes total.
pub fn system_transfer_instruction(from: &[u8; 32], to: &[u8; 32], lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta {
                pubkey: *from,
                is_signer: true,
                is_writable: true,
            },
            AccountMeta {
                pubkey: *to,
                is_signer: false,
                is_writable: true,
            },
        ],
        data,
    }
}

/// Compile instructions into a transaction with a single fee payer.
///
/// The fee payer is always the first signer and lands at index 0 of the
/// account table.
pub fn compile(
    instructions: &[Instruction],
    fee_payer: &[u8; 32],
    recent_blockhash: &[u8; 32],
) -> Result<Transaction, SolError> {
    struct Entry {
        pubkey: [u8; 32],
        is_signer: bool,
        is_writable: bool,
    }

    fn merge(entries: &mut Vec<Entry>, pubkey: [u8; 32], is_signer: bool, is_writable: bool) {
        match entries.iter_mut().find(|e| e.pubkey == pubkey) {
            Some(entry) => {
                entry.is_signer |= is_signer;
                entry.is_writable |= is_writable;
            }
            None => entries.push(Entry {
                pubkey,
                is_signer,
                is_writable,
            }),
        }
    }

    // Fee payer first: signer + writable.
    let mut entries = vec![Entry {
        pubkey: *fee_payer,
        is_signer: true,
        is_writable: true,
    }];

    for ix in instructions {
        for meta in &ix.accounts {
            merge(&mut entries, meta.pubkey, meta.is_signer, meta.is_writable);
        }
        // Program ids are read-only non-signers.
        merge(&mut entries, ix.program_id, false, false);
    }

    if entries.len() > usize::from(u8::MAX) {
        return Err(SolError::TransactionBuildError(format!(
            "too many accounts: {}",
            entries.len()
        )));
    }

    // Canonical ordering; the sort is stable, so the fee payer stays at
    // index 0 within the first group.
    entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
        (true, true) => 0u8,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    });

    let account_keys: Vec<[u8; 32]> = entries.iter().map(|e| e.pubkey).collect();
    let num_required_signatures = entries.iter().filter(|e| e.is_signer).count() as u8;
    let num_readonly_signed = entries
        .iter()
        .filter(|e| e.is_signer && !e.is_writable)
        .count() as u8;
    let num_readonly_unsigned = entries
        .iter()
        .filter(|e| !e.is_signer && !e.is_writable)
        .count() as u8;

    let index_of = |pubkey: &[u8; 32]| -> Result<u8, SolError> {
        account_keys
            .iter()
            .position(|k| k == pubkey)
            .map(|i| i as u8)
            .ok_or_else(|| SolError::TransactionBuildError("account not in account table".into()))
    };

    let mut compiled = Vec::with_capacity(instructions.len());
    for ix in instructions {
        let program_id_index = index_of(&ix.program_id)?;
        let account_indices = ix
            .accounts
            .iter()
            .map(|meta| index_of(&meta.pubkey))
            .collect::<Result<Vec<u8>, SolError>>()?;

        compiled.push(CompiledInstruction {
            program_id_index,
            account_indices,
            data: ix.data.clone(),
        });
    }

    Ok(Transaction {
        account_keys,
        num_required_signatures,
        num_readonly_signed,
        num_readonly_unsigned,
        recent_blockhash: *recent_blockhash,
        instructions: compiled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- compact-u16 encoding -----------------------------------------------

    #[test]
    fn compact_u16_zero() {
        assert_eq!(encode_compact_u16(0), vec![0x00]);
    }

    #[test]
    fn compact_u16_single_byte_max() {
        assert_eq!(encode_compact_u16(0x7f), vec![0x7f]);
    }

    #[test]
    fn compact_u16_boundary_128() {
        assert_eq!(encode_compact_u16(128), vec![0x80, 0x01]);
    }

    #[test]
    fn compact_u16_two_byte_max() {
        assert_eq!(encode_compact_u16(16383), vec![0xff, 0x7f]);
    }

    #[test]
    fn compact_u16_max_value() {
        assert_eq!(encode_compact_u16(u16::MAX), vec![0xff, 0xff, 0x03]);
    }

    // -- System transfer instruction ----------------------------------------

    #[test]
    fn transfer_instruction_data_is_12_bytes() {
        let ix = system_transfer_instruction(&[1u8; 32], &[2u8; 32], 1_000_000_000);
        assert_eq!(ix.data.len(), 12);
        // u32 LE index 2 (Transfer), then u64 LE lamports.
        assert_eq!(&ix.data[..4], &[2, 0, 0, 0]);
        assert_eq!(&ix.data[4..], &1_000_000_000u64.to_le_bytes());
        assert_eq!(hex::encode(&ix.data), "0200000000ca9a3b00000000");
    }

    #[test]
    fn transfer_instruction_account_roles() {
        let from = [0xAAu8; 32];
        let to = [0xBBu8; 32];
        let ix = system_transfer_instruction(&from, &to, 500);

        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, from);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[1].pubkey, to);
        assert!(!ix.accounts[1].is_signer);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.program_id, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn zero_lamports_is_rejected() {
        let result = build_native_transfer(&[1u8; 32], &[2u8; 32], 0, &[0u8; 32]);
        assert!(result.is_err());
    }

    // -- Compilation --------------------------------------------------------

    #[test]
    fn native_transfer_account_table() {
        let from = [1u8; 32];
        let to = [2u8; 32];
        let tx = build_native_transfer(&from, &to, 1000, &[0xAA; 32]).unwrap();

        // from (fee payer), to, System Program.
        assert_eq!(tx.account_keys.len(), 3);
        assert_eq!(tx.account_keys[0], from);
        assert_eq!(tx.num_required_signatures, 1);
        assert_eq!(tx.num_readonly_signed, 0);
        assert_eq!(tx.num_readonly_unsigned, 1);
    }

    #[test]
    fn compiled_indices_reference_account_table() {
        let from = [1u8; 32];
        let to = [2u8; 32];
        let tx = build_native_transfer(&from, &to, 100, &[0u8; 32]).unwrap();

        assert_eq!(tx.instructions.len(), 1);
        let ix = &tx.instructions[0];

        let system_index = tx
            .account_keys
            .iter()
            .position(|k| *k == SYSTEM_PROGRAM_ID)
            .unwrap() as u8;
        assert_eq!(ix.program_id_index, system_index);
        assert_eq!(ix.account_indices, vec![0, 1]);
    }

    #[test]
    fn blockhash_is_carried_through() {
        let tx = build_native_transfer(&[1u8; 32], &[2u8; 32], 42, &[0xBB; 32]).unwrap();
        assert_eq!(tx.recent_blockhash, [0xBB; 32]);
    }

    #[test]
    fn self_transfer_deduplicates_accounts() {
        let key = [0xAAu8; 32];
        let tx = build_native_transfer(&key, &key, 100, &[0u8; 32]).unwrap();

        // from == to collapses to one entry plus the System Program.
        assert_eq!(tx.account_keys.len(), 2);
        assert_eq!(tx.num_required_signatures, 1);
    }

    // -- Serialization ------------------------------------------------------

    #[test]
    fn message_starts_with_header() {
        let tx = build_native_transfer(&[1u8; 32], &[2u8; 32], 100, &[0u8; 32]).unwrap();
        let msg = tx.serialize_message();

        assert_eq!(msg[0], tx.num_required_signatures);
        assert_eq!(msg[1], tx.num_readonly_signed);
        assert_eq!(msg[2], tx.num_readonly_unsigned);
    }

    #[test]
    fn message_contains_blockhash_at_fixed_offset() {
        let blockhash = [0xCCu8; 32];
        let tx = build_native_transfer(&[1u8; 32], &[2u8; 32], 500, &blockhash).unwrap();
        let msg = tx.serialize_message();

        // header(3) + compact-u16(num_accounts) + 32 * num_accounts
        let offset = 3 + 1 + 32 * tx.account_keys.len();
        assert_eq!(&msg[offset..offset + 32], &blockhash);
    }

    #[test]
    fn wire_format_has_zeroed_signature_placeholder() {
        let tx = build_native_transfer(&[1u8; 32], &[2u8; 32], 1_000, &[0xDD; 32]).unwrap();
        let wire = tx.serialize();

        // compact-u16 signature count 1, then a 64-byte zero placeholder.
        assert_eq!(wire[0], 0x01);
        assert_eq!(&wire[1..65], &[0u8; 64]);
        assert_eq!(&wire[65..], &tx.serialize_message()[..]);
    }

    #[test]
    fn native_transfer_wire_length() {
        let tx = build_native_transfer(&[1u8; 32], &[2u8; 32], 1_000, &[0u8; 32]).unwrap();

        // 1 sig count + 64 placeholder + 3 header + 1 account count
        // + 3*32 keys + 32 blockhash + 1 ix count
        // + (1 program index + 1 account count + 2 indices + 1 data len + 12 data)
        assert_eq!(tx.serialize().len(), 215);
    }

    #[test]
    fn base64_round_trips_to_wire_bytes() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let tx = build_native_transfer(&[3u8; 32], &[4u8; 32], 77, &[0xEE; 32]).unwrap();
        let decoded = STANDARD.decode(tx.to_base64()).unwrap();
        assert_eq!(decoded, tx.serialize());
    }
}
