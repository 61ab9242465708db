//! SPL Token transfers and associated token account derivation.
//!
//! The associated token account (ATA) for an owner/mint pair is a program
//! derived address computed from the seeds `[owner, token_program, mint]`
//! against the associated-token program, searching bump seeds from 255
//! downward for the first candidate that is not a valid Ed25519 point.

use sha2::{Digest, Sha256};

use crate::error::SolError;
use crate::transaction::{compile, AccountMeta, Instruction, Transaction};

/// SPL Token Program: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb,
    0x79, 0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85,
    0x7e, 0xff, 0x00, 0xa9,
];

/// Associated Token Account Program: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e,
    0x0d, 0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8,
    0xdb, 0xe9, 0xf8, 0x59,
];

/// SPL Token `Transfer` instruction discriminator.
const TOKEN_TRANSFER_INDEX: u8 = 3;

/// Domain-separation suffix for program derived addresses.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// An SPL Token `Transfer` instruction moving `amount` base units between
/// two token accounts.
///
/// Instruction data: u8 discriminator (3 = Transfer) + u64 LE amount,
/// 9 bytes total.
pub fn token_transfer_instruction(
    source: &[u8; 32],
    destination: &[u8; 32],
    owner: &[u8; 32],
    amount: u64,
) -> Result<Instruction, SolError> {
    if amount == 0 {
        return Err(SolError::TransactionBuildError(
            "token amount must be > 0".into(),
        ));
    }

    let mut data = Vec::with_capacity(9);
    data.push(TOKEN_TRANSFER_INDEX);
    data.extend_from_slice(&amount.to_le_bytes());

    Ok(Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta {
                pubkey: *source,
                is_signer: false,
                is_writable: true,
            },
            AccountMeta {
                pubkey: *destination,
                is_signer: false,
                is_writable: true,
            },
            AccountMeta {
                pubkey: *owner,
                is_signer: true,
                is_writable: false,
            },
        ],
        data,
    })
}

/// Build an SPL token transfer transaction with `owner` as fee payer and
/// transfer authority.
pub fn build_token_transfer(
    owner: &[u8; 32],
    source_ata: &[u8; 32],
    dest_ata: &[u8; 32],
    amount: u64,
    recent_blockhash: &[u8; 32],
) -> Result<Transaction, SolError> {
    let instruction = token_transfer_instruction(source_ata, dest_ata, owner, amount)?;
    compile(&[instruction], owner, recent_blockhash)
}

/// Derive the associated token account address for a wallet/mint pair.
pub fn derive_associated_token_address(
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], SolError> {
    find_program_address(
        &[wallet.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Find a program derived address for the given seeds and program.
///
/// Bump seeds are searched from 255 down to 0; the first candidate that is
/// not on the Ed25519 curve is the PDA.
fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), SolError> {
    for bump in (0u8..=255).rev() {
        if let Some(address) = create_program_address(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::InvalidAddress(
        "no valid PDA bump seed".into(),
    ))
}

/// Candidate PDA: SHA-256(seeds || bump || program_id || marker).
/// `None` when the hash lands on the curve and the bump must be retried.
fn create_program_address(seeds: &[&[u8]], bump: u8, program_id: &[u8; 32]) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();
    if is_on_curve(&hash) {
        return None;
    }
    Some(hash)
}

/// Whether 32 bytes decompress to a valid Ed25519 point.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}
