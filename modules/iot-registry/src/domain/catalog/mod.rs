//! Per-resource leaf catalogs.
//!
//! Each catalog is a closed enum: translators and key generators match it
//! exhaustively, so a new variant does not compile until both handle it.
//! Every catalog has an `Id` variant through which authorization decisions
//! and point lookups flow.

mod actor;
mod automation;
mod device;
mod feed;
mod zone;

pub use actor::ActorLeaf;
pub use automation::AutomationLeaf;
pub use device::DeviceLeaf;
pub use feed::FeedLeaf;
pub use zone::ZoneLeaf;

use std::collections::BTreeSet;

use modkit_security::{IdFilter, ResourceId};

/// `Id(In{id})`, the leaf behind point reads.
#[must_use]
pub fn only<Id: ResourceId>(id: Id) -> IdFilter<Id> {
    IdFilter::In(BTreeSet::from([id]))
}
