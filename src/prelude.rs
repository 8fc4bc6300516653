pub use crate::builder::{ClockProBuilder, ClockProConfig};
pub use crate::ds::{GhostTable, SegmentSelector, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::integrity::IntegrityReport;
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::metrics::{ClockProMetrics, ClockProMetricsSnapshot};
pub use crate::policy::clock_pro::{
    ClockProEviction, DetachedEntry, EntryId, EntryState, Region, fingerprint_of,
};
#[cfg(feature = "concurrency")]
pub use crate::policy::segmented::{SegmentedClockPro, SegmentedEntryId};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentEviction;
pub use crate::traits::Eviction;
