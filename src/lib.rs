//! clockpro: CLOCK-Pro eviction core for fixed-capacity in-memory caches.
//!
//! The crate decides *which* entry to evict; storing keys and values is left
//! to the cache that embeds it. Start from
//! [`ClockProBuilder`](builder::ClockProBuilder) and drive the result through
//! the [`Eviction`](traits::Eviction) trait.

pub mod builder;
pub mod ds;
pub mod error;
pub mod integrity;
pub mod metrics;
pub mod policy;

pub mod prelude;
pub mod traits;
