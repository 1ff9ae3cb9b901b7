//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable Ethereum-style signatures: 65 bytes `r || s || v`.
//!
//! ## Security Properties
//!
//! - R and S must be in `[1, n-1]`
//! - S must be in the lower half of the curve order (EIP-2)
//! - `v` must be 0, 1, 27 or 28
//! - Signing uses RFC 6979 nonces and always emits low-S signatures

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::{Address, B256};
use zeroize::Zeroize;

/// Length of an encoded recoverable signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// A recoverable secp256k1 signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    r: [u8; 32],
    s: [u8; 32],
    v: u8,
}

impl RecoverableSignature {
    /// Parse `r || s || v`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoError::InvalidSignatureLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }

    /// Encode as `r || s || v`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Recover the signer address for a 32-byte prehash.
    pub fn recover(&self, prehash: &B256) -> Result<Address, CryptoError> {
        let recovery_id = parse_recovery_id(self.v)?;

        let mut sig_bytes = [0u8; 64];
        sig_bytes[..32].copy_from_slice(&self.r);
        sig_bytes[32..].copy_from_slice(&self.s);
        let parsed = Signature::from_slice(&sig_bytes);
        sig_bytes.zeroize();
        let sig = parsed.map_err(|_| CryptoError::InvalidSignatureFormat)?;

        // normalize_s only yields a value when S is in the upper half.
        if sig.normalize_s().is_some() {
            return Err(CryptoError::MalleableSignature);
        }

        let key = VerifyingKey::recover_from_prehash(prehash.as_slice(), &sig, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(address_from_pubkey(&key))
    }
}

/// Recover the signer of an encoded 65-byte signature.
pub fn recover_signer(prehash: &B256, signature: &[u8]) -> Result<Address, CryptoError> {
    RecoverableSignature::from_slice(signature)?.recover(prehash)
}

/// Derive an Ethereum-style address: last 20 bytes of keccak256(x || y).
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let point = public_key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidRecoveryId(v)),
    };
    RecoveryId::from_byte(id).ok_or(CryptoError::InvalidRecoveryId(v))
}

/// secp256k1 keypair producing recoverable signatures.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    #[cfg(test)]
    fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Address controlled by this key.
    pub fn address(&self) -> Address {
        address_from_pubkey(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash, returning `r || s || v` with `v` in {27, 28}.
    pub fn sign_prehash(&self, prehash: &B256) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash.as_slice())
            .map_err(|_| CryptoError::SigningFailed)?;

        let (sig, recovery_id) = match sig.normalize_s() {
            Some(low) => (
                low,
                RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
            ),
            None => (sig, recovery_id),
        };

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            v: recovery_id.to_byte() + 27,
        })
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}

/// secp256k1 curve order n.
#[cfg(test)]
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Invert S for malleability tests: s' = n - s.
#[cfg(test)]
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
