//! Contract ABI surface spoken to the registry, resolvers and gateways.

use alloy_sol_types::sol;

sol! {
    /// ERC-165 capability probe.
    interface IERC165 {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }

    /// Name registry.
    interface IRegistry {
        function owner(bytes32 node) external view returns (address);
        function resolver(bytes32 node) external view returns (address);
        function ttl(bytes32 node) external view returns (uint64);
    }

    interface IAddrResolver {
        function addr(bytes32 node) external view returns (address);
    }

    interface ITextResolver {
        function text(bytes32 node, string key) external view returns (string);
    }

    interface IContentHashResolver {
        function contenthash(bytes32 node) external view returns (bytes);
    }

    interface INameResolver {
        function name(bytes32 node) external view returns (string);
    }

    interface IMulticallable {
        function multicall(bytes[] data) external returns (bytes[] results);
    }

    /// Wire-style resolver: receives the DNS-encoded name plus the inner call.
    interface IExtendedResolver {
        function resolve(bytes name, bytes data) external view returns (bytes);
    }

    /// Result shape of universal-resolver batch slots.
    interface IUniversalResolver {
        function resolve(bytes name, bytes data) external view returns (bytes, address);
    }

    /// Token-ownership lookup keyed by node, as exposed by registrars.
    interface IOwnerOf {
        function ownerOf(uint256 tokenId) external view returns (address);
    }

    /// Revert raised by a resolver whose records live behind a gateway.
    error OffchainLookup(address sender, string[] urls, bytes callData, bytes4 callbackFunction, bytes extraData);

    /// Gateway response body.
    struct SignedRecord {
        bytes value;
        bytes signature;
    }
}

/// ERC-165 id of the wire-style resolver (selector of `resolve(bytes,bytes)`).
pub const EXTENDED_RESOLVER_INTERFACE_ID: [u8; 4] = [0x90, 0x61, 0xb9, 0x23];

/// ERC-165 id of `supportsInterface` itself.
pub const ERC165_INTERFACE_ID: [u8; 4] = [0x01, 0xff, 0xc9, 0xa7];

/// First four bytes of `data`, if present.
pub fn selector_of(data: &[u8]) -> Option<[u8; 4]> {
    data.get(..4).and_then(|s| s.try_into().ok())
}
