//! Authority walk: the name itself first, then each ancestor, stopping
//! before the root.

use super::{registry_error, NameResolutionService};
use crate::domain::entities::ResolverLocation;
use crate::domain::errors::ResolutionError;
use crate::ports::outbound::{Ledger, OffchainGateway, Registry};
use shared_types::{child_node, label_hash, Name, Node, ROOT_NODE};
use tracing::debug;

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    /// Nearest ancestor-or-self of `name` with a resolver set.
    ///
    /// The walk visits at most `label_count` nodes and never consults the
    /// root, so a resolver on the root does not act as a global wildcard.
    pub async fn find_resolver(
        &self,
        name: &Name,
    ) -> Result<Option<ResolverLocation>, ResolutionError> {
        let labels = name.label_count();
        if labels > self.config.max_labels {
            return Err(ResolutionError::NameTooDeep {
                labels,
                max: self.config.max_labels,
            });
        }

        // nodes[i] is the node of the suffix starting at label i.
        let mut nodes: Vec<Node> = vec![ROOT_NODE; labels + 1];
        for (i, label) in name.labels().iter().enumerate().rev() {
            nodes[i] = child_node(nodes[i + 1], label_hash(label));
        }

        for (depth, &node) in nodes[..labels].iter().enumerate() {
            let resolver = self
                .registry
                .resolver_of(node)
                .await
                .map_err(|e| registry_error(node, e))?;

            let Some(resolver) = resolver else {
                continue;
            };

            let ttl = self
                .registry
                .ttl_of(node)
                .await
                .map_err(|e| registry_error(node, e))?;
            let authority = name.suffix(depth);
            debug!(
                name = %name,
                authority = %authority,
                resolver = %resolver,
                wildcard = depth > 0,
                "Resolver found"
            );
            return Ok(Some(ResolverLocation {
                resolver,
                authority,
                authority_node: node,
                wildcard: depth > 0,
                ttl,
            }));
        }

        debug!(name = %name, "No resolver on any ancestor");
        Ok(None)
    }
}
