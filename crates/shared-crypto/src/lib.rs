//! # Shared Crypto
//!
//! secp256k1 primitives the name service needs to check attestations.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256, EIP-191 | Attestation digests |
//! | `ecdsa` | secp256k1 | Signer recovery, attestation signing |
//!
//! ## Security Properties
//!
//! - **Low-S only (EIP-2)**: recovery rejects malleable signatures outright
//! - **Strict shape**: signatures are exactly 65 bytes `r || s || v`
//! - **RFC 6979** deterministic nonces when signing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

pub use ecdsa::{address_from_pubkey, recover_signer, RecoverableSignature, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{eth_message_hash, keccak256};
