//! Construction-time configuration for the eviction core.
//!
//! All tunables are fixed when a controller is built; there is no global or
//! mutable configuration afterwards.
//!
//! ## Example
//!
//! ```rust
//! use clockpro::builder::ClockProBuilder;
//!
//! let eviction = ClockProBuilder::new(100)
//!     .hot_max_percentage(90)
//!     .build();
//! assert_eq!(eviction.hot_max(), 90);
//! assert_eq!(eviction.ghost_max(), 51);
//! ```

use crate::error::ConfigError;
use crate::policy::clock_pro::ClockProEviction;

/// Default share of a segment's capacity reserved for hot entries.
pub const DEFAULT_HOT_MAX_PERCENTAGE: u32 = 97;

/// Default right shift applied when computing the hot-hand decay amount.
pub const DEFAULT_HIT_COUNTER_DECREASE_SHIFT: u32 = 6;

/// Validated parameters of a CLOCK-Pro controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockProConfig {
    /// Total entry capacity across all segments.
    pub capacity: usize,
    /// Percentage of a segment's capacity that may be hot.
    pub hot_max_percentage: u32,
    /// Shift used by the hot hand to derive its per-pass decay.
    pub hit_counter_decrease_shift: u32,
    /// Number of independent segments the capacity is split across.
    pub segment_count: usize,
}

impl ClockProConfig {
    /// Configuration with default tunables and a single segment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hot_max_percentage: DEFAULT_HOT_MAX_PERCENTAGE,
            hit_counter_decrease_shift: DEFAULT_HIT_COUNTER_DECREASE_SHIFT,
            segment_count: 1,
        }
    }

    /// Checks every parameter, reporting the first one out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("capacity", "must be > 0"));
        }
        if self.hot_max_percentage > 100 {
            return Err(ConfigError::new(
                "hot_max_percentage",
                format!("must be within 0..=100, got {}", self.hot_max_percentage),
            ));
        }
        if self.hit_counter_decrease_shift >= u64::BITS {
            return Err(ConfigError::new(
                "hit_counter_decrease_shift",
                format!("must be < 64, got {}", self.hit_counter_decrease_shift),
            ));
        }
        if self.segment_count == 0 {
            return Err(ConfigError::new("segment_count", "must be > 0"));
        }
        Ok(())
    }

    /// Capacity of one segment: the total split evenly, never below one.
    pub fn segment_capacity(&self) -> usize {
        (self.capacity / self.segment_count.max(1)).max(1)
    }
}

/// Builder for [`ClockProEviction`] and its segmented front.
#[derive(Debug, Clone)]
pub struct ClockProBuilder {
    config: ClockProConfig,
}

impl ClockProBuilder {
    /// Starts a builder for a cache holding `capacity` entries in total.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: ClockProConfig::new(capacity),
        }
    }

    pub fn hot_max_percentage(mut self, percentage: u32) -> Self {
        self.config.hot_max_percentage = percentage;
        self
    }

    pub fn hit_counter_decrease_shift(mut self, shift: u32) -> Self {
        self.config.hit_counter_decrease_shift = shift;
        self
    }

    pub fn segment_count(mut self, segments: usize) -> Self {
        self.config.segment_count = segments;
        self
    }

    /// Returns the validated configuration.
    pub fn try_config(&self) -> Result<ClockProConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Builds one segment's controller, rejecting invalid parameters.
    pub fn try_build(&self) -> Result<ClockProEviction, ConfigError> {
        ClockProEviction::try_new(self.config)
    }

    /// Builds one segment's controller.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; use [`try_build`](Self::try_build)
    /// for user-supplied parameters.
    pub fn build(&self) -> ClockProEviction {
        ClockProEviction::new(self.config)
    }

    /// Builds the segmented front with one controller per segment.
    #[cfg(feature = "concurrency")]
    pub fn try_build_segmented(
        &self,
    ) -> Result<crate::policy::segmented::SegmentedClockPro, ConfigError> {
        crate::policy::segmented::SegmentedClockPro::try_new(self.config)
    }
}
