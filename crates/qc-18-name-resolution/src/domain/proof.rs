//! # Off-chain Attestations
//!
//! A gateway answers with `abi.encode(SignedRecord { value, signature })`.
//! The value is trusted only if the signature recovers to the node's owner
//! in the registry.
//!
//! ```text
//! digest = keccak256("\x19Ethereum Signed Message:\n32" || keccak256(node || value))
//! ```

use crate::abi::SignedRecord;
use crate::domain::errors::ProofError;
use alloy_sol_types::SolType;
use shared_crypto::{eth_message_hash, keccak256, recover_signer, CryptoError, Secp256k1KeyPair};
use shared_types::{Address, Bytes, Node, B256};

/// A gateway's claim about `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    pub node: Node,
    pub value: Bytes,
    pub signature: Bytes,
}

impl Attestation {
    /// Decode a gateway response body for `node`.
    pub fn decode(node: Node, body: &[u8]) -> Result<Self, ProofError> {
        let record = <SignedRecord as SolType>::abi_decode(body, true)
            .map_err(|e| ProofError::Malformed(e.to_string()))?;
        Ok(Self {
            node,
            value: record.value,
            signature: record.signature,
        })
    }

    /// Encode as a gateway response body.
    pub fn encode(&self) -> Bytes {
        <SignedRecord as SolType>::abi_encode(&SignedRecord {
            value: self.value.clone(),
            signature: self.signature.clone(),
        })
        .into()
    }

    pub fn digest(&self) -> B256 {
        attestation_digest(&self.node, &self.value)
    }
}

/// Digest an owner signs to vouch for `value` under `node`.
pub fn attestation_digest(node: &Node, value: &[u8]) -> B256 {
    let mut message = Vec::with_capacity(32 + value.len());
    message.extend_from_slice(node.as_slice());
    message.extend_from_slice(value);
    eth_message_hash(&keccak256(message))
}

/// Produce an attestation over `value` for `node`.
pub fn sign_attestation(
    signer: &Secp256k1KeyPair,
    node: Node,
    value: impl Into<Bytes>,
) -> Result<Attestation, CryptoError> {
    let value = value.into();
    let signature = signer.sign_prehash(&attestation_digest(&node, &value))?;
    Ok(Attestation {
        node,
        value,
        signature: Bytes::copy_from_slice(&signature.to_bytes()),
    })
}

/// Accept the attestation's value only if its signer is `owner`.
pub fn verify_attestation(attestation: &Attestation, owner: Address) -> Result<Bytes, ProofError> {
    if owner.is_zero() {
        return Err(ProofError::Unowned);
    }
    let signer = recover_signer(&attestation.digest(), &attestation.signature)?;
    if signer != owner {
        return Err(ProofError::SignerMismatch {
            expected: owner,
            actual: signer,
        });
    }
    Ok(attestation.value.clone())
}

/// The high-S twin of a valid signature: `s' = n - s`, recovery id flipped.
/// Recovers to the same key, so only the low-S rule rejects it.
#[cfg(test)]
pub(crate) fn high_s_twin(signature: &[u8]) -> Bytes {
    use alloy_primitives::{hex, U256};

    let order = U256::from_be_bytes(hex!(
        "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
    ));
    let mut twin = signature.to_vec();
    let s = U256::from_be_slice(&twin[32..64]);
    twin[32..64].copy_from_slice(&(order - s).to_be_bytes::<32>());
    twin[64] = if twin[64] == 27 { 28 } else { 27 };
    Bytes::from(twin)
}
