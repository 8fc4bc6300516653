//! Replacement policies.

pub mod clock_pro;

#[cfg(feature = "concurrency")]
pub mod segmented;
