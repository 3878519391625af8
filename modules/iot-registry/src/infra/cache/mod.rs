//! Cache key generators, one per leaf catalog.

mod keys;

pub use keys::{ActorKeys, AutomationKeys, DeviceKeys, FeedKeys, ZoneKeys};
