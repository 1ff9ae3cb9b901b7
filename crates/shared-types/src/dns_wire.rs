//! # DNS Wire Codec
//!
//! Names travel to wire-style resolvers as length-prefixed labels terminated
//! by a zero-length label:
//!
//! ```text
//! "foo.eth" => 03 'f' 'o' 'o' 03 'e' 't' 'h' 00
//! ""        => 00
//! ```

use crate::entities::Name;
use crate::errors::NameError;

impl Name {
    /// Encode into DNS wire format.
    pub fn to_dns_wire(&self) -> Vec<u8> {
        let len = self.labels().iter().map(|l| l.len() + 1).sum::<usize>() + 1;
        let mut out = Vec::with_capacity(len);
        for label in self.labels() {
            // Label length is bounded by MAX_LABEL_LEN at construction.
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);
        out
    }

    /// Decode a DNS wire name. The input must contain exactly one name.
    pub fn from_dns_wire(bytes: &[u8]) -> Result<Self, NameError> {
        let mut labels = Vec::new();
        let mut offset = 0;

        loop {
            let len = *bytes.get(offset).ok_or(NameError::Truncated { offset })? as usize;
            offset += 1;

            if len == 0 {
                break;
            }

            let end = offset + len;
            let raw = bytes
                .get(offset..end)
                .ok_or(NameError::Truncated { offset: bytes.len() })?;
            let label = std::str::from_utf8(raw).map_err(|_| NameError::InvalidUtf8 {
                position: labels.len(),
            })?;
            labels.push(label.to_owned());
            offset = end;
        }

        if offset != bytes.len() {
            return Err(NameError::TrailingBytes {
                count: bytes.len() - offset,
            });
        }

        Name::from_labels(labels)
    }
}
