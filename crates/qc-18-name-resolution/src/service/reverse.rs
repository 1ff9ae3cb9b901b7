//! Reverse resolution: address to primary name through the reverse
//! namespace, using the ordinary forward path fixed to the `name` record.

use super::NameResolutionService;
use crate::domain::errors::ResolutionError;
use crate::domain::query::{RecordQuery, RecordValue};
use crate::ports::outbound::{Ledger, OffchainGateway, Registry};
use shared_types::{Address, Name};
use tracing::debug;

impl<R: Registry, L: Ledger, G: OffchainGateway> NameResolutionService<R, L, G> {
    /// Primary name of `address`, or `None` when no reverse record is set.
    pub async fn name_of(&self, address: Address) -> Result<Option<Name>, ResolutionError> {
        let reverse = Name::reverse(&address, &self.config.reverse_suffix);
        self.name_for_reverse_name(&reverse).await
    }

    pub(super) async fn name_for_reverse_name(
        &self,
        reverse: &Name,
    ) -> Result<Option<Name>, ResolutionError> {
        let Some(resolution) = self.resolve(reverse, &RecordQuery::Name).await? else {
            debug!(reverse = %reverse, "No resolver for reverse name");
            return Ok(None);
        };

        match resolution.value {
            RecordValue::Name(primary) if primary.is_empty() => {
                debug!(reverse = %reverse, "Reverse record unset");
                Ok(None)
            }
            RecordValue::Name(primary) => Ok(Some(Name::parse(&primary)?)),
            other => Err(ResolutionError::decode(
                "name",
                format!("unexpected record {other:?}"),
            )),
        }
    }
}
