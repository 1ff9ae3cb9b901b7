//! # Node Substitution
//!
//! Batch payloads are built before the caller knows which name an address
//! maps to. Each descriptor lists byte offsets where the 32-byte node goes.
//! Offsets must fit the payload and must not overlap; a bad descriptor is
//! rejected as a whole, never partially applied.

use crate::domain::errors::DescriptorError;
use shared_types::Node;

/// Bytes written at each offset.
pub const NODE_LEN: usize = 32;

/// Check that every `offset..offset + 32` lies inside `payload_len` and that
/// no two windows intersect.
pub fn validate_offsets(payload_len: usize, offsets: &[usize]) -> Result<(), DescriptorError> {
    for &offset in offsets {
        match offset.checked_add(NODE_LEN) {
            Some(end) if end <= payload_len => {}
            _ => {
                return Err(DescriptorError::OffsetOutOfBounds {
                    offset,
                    len: payload_len,
                })
            }
        }
    }

    let mut sorted = offsets.to_vec();
    sorted.sort_unstable();
    for pair in sorted.windows(2) {
        if pair[1] < pair[0] + NODE_LEN {
            return Err(DescriptorError::OverlappingOffsets {
                first: pair[0],
                second: pair[1],
            });
        }
    }
    Ok(())
}

/// Copy `payload` with `node` written at every offset.
pub fn substitute_node(
    payload: &[u8],
    offsets: &[usize],
    node: &Node,
) -> Result<Vec<u8>, DescriptorError> {
    validate_offsets(payload.len(), offsets)?;
    let mut out = payload.to_vec();
    for &offset in offsets {
        out[offset..offset + NODE_LEN].copy_from_slice(node.as_slice());
    }
    Ok(out)
}
