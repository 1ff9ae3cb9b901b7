//! # Core Name Entities
//!
//! - **Name**: ordered, validated label sequence (`foo.bar.eth`)
//! - **Node**: 32-byte namehash of a `Name`, derived from the root outward
//!
//! ## Namehash
//!
//! ```text
//! node("")        = 0x00..00
//! node(l.rest)    = keccak256(node(rest) || keccak256(l))
//! ```

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

use crate::errors::NameError;

/// A 32-byte namespace node identifier.
pub type Node = B256;

/// Node of the empty (root) name.
pub const ROOT_NODE: Node = B256::ZERO;

/// Longest label that fits one DNS wire length octet.
pub const MAX_LABEL_LEN: usize = 255;

/// Default suffix of the reverse namespace.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// Keccak-256 of arbitrary bytes.
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    B256::from_slice(&hasher.finalize())
}

/// Hash of a single label.
pub fn label_hash(label: &str) -> B256 {
    keccak256(label.as_bytes())
}

/// Node of `label.<parent>` given the parent's node and the label's hash.
pub fn child_node(parent: Node, label_hash: B256) -> Node {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent.as_slice());
    buf[32..].copy_from_slice(label_hash.as_slice());
    keccak256(buf)
}

/// A human-readable name: labels ordered leftmost (most specific) first.
///
/// The root name has no labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    /// The empty (root) name.
    pub fn root() -> Self {
        Self { labels: Vec::new() }
    }

    /// Parse a dotted name. The empty string is the root name.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Ok(Self::root());
        }
        Self::from_labels(name.split('.'))
    }

    /// Build a name from individual labels, validating each.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels
            .into_iter()
            .enumerate()
            .map(|(position, label)| {
                let label = label.into();
                validate_label(position, &label)?;
                Ok(label)
            })
            .collect::<Result<Vec<_>, NameError>>()?;
        Ok(Self { labels })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Compute the namehash of this name.
    pub fn node(&self) -> Node {
        self.labels
            .iter()
            .rev()
            .fold(ROOT_NODE, |parent, label| child_node(parent, label_hash(label)))
    }

    /// The name with its `skip` leftmost labels removed.
    pub fn suffix(&self, skip: usize) -> Name {
        Self {
            labels: self.labels.get(skip..).unwrap_or_default().to_vec(),
        }
    }

    /// `addr.reverse`, the default reverse namespace.
    pub fn default_reverse_suffix() -> Self {
        Self {
            labels: REVERSE_SUFFIX.split('.').map(str::to_owned).collect(),
        }
    }

    /// Reverse-namespace name for `address` under `suffix`
    /// (`<lowercase hex>.addr.reverse` by default).
    pub fn reverse(address: &Address, suffix: &Name) -> Self {
        let mut labels = Vec::with_capacity(suffix.label_count() + 1);
        labels.push(hex::encode(address.as_slice()));
        labels.extend(suffix.labels.iter().cloned());
        Self { labels }
    }
}

fn validate_label(position: usize, label: &str) -> Result<(), NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel { position });
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(NameError::LabelTooLong {
            position,
            len: label.len(),
        });
    }
    if label.contains('.') {
        return Err(NameError::DotInLabel { position });
    }
    Ok(())
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels.join("."))
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_string()
    }
}
