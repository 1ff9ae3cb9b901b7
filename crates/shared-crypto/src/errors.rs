//! Crypto error types.

use thiserror::Error;

/// Signature recovery errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature is not `r || s || v` (65 bytes)
    #[error("Invalid signature length: expected 65, got {0}")]
    InvalidSignatureLength(usize),

    /// Scalar out of range (zero or not below the curve order)
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Recovery ID must be 0, 1, 27 or 28
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// High S value (EIP-2)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// No public key could be recovered
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("Signing failed")]
    SigningFailed,
}
