//! # Message Hashing
//!
//! Keccak-256 and the EIP-191 `personal_sign` envelope used by attestation
//! signers.

use shared_types::B256;

pub use shared_types::keccak256;

/// Prefix applied by `personal_sign` to a 32-byte message.
const ETH_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// EIP-191 digest of a 32-byte message hash.
pub fn eth_message_hash(message: &B256) -> B256 {
    let mut buf = Vec::with_capacity(ETH_MESSAGE_PREFIX.len() + 32);
    buf.extend_from_slice(ETH_MESSAGE_PREFIX);
    buf.extend_from_slice(message.as_slice());
    keccak256(buf)
}
