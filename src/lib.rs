//! Blossom: status indicator animations for hosts that bring their own renderer.
//!
//! Re-exports the animation engine and the configuration loader, and wires
//! the two together.

use anyhow::Context;

pub use blossom_config::{BlossomConfig, ConfigError, TimingMode};
pub use blossom_indicator::animation;
pub use blossom_indicator::sim;
pub use blossom_indicator::tokens;
pub use blossom_indicator::{
    AnimationVariant, ColorTag, Compositor, IndicatorAnimator, SizeTag, StartRequest,
    TimingAdapter, TimingCapability, VisualTree,
};

/// Indicator defaults resolved from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSettings {
    pub timing: TimingMode,
    pub variant: AnimationVariant,
    pub size: SizeTag,
}

impl IndicatorSettings {
    /// Parse the variant and size names of `config`.
    pub fn from_config(config: &BlossomConfig) -> anyhow::Result<Self> {
        let variant = config
            .indicator
            .variant
            .parse::<AnimationVariant>()
            .with_context(|| format!("indicator.variant = {:?}", config.indicator.variant))?;
        let size = config
            .indicator
            .size
            .parse::<SizeTag>()
            .with_context(|| format!("indicator.size = {:?}", config.indicator.size))?;

        Ok(Self {
            timing: config.timing.mode,
            variant,
            size,
        })
    }

    /// Load `blossom.toml` plus environment overrides and resolve them.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_config(&BlossomConfig::load())
    }

    /// Session parameters for these defaults.
    pub fn start_request(&self) -> StartRequest {
        StartRequest::new(self.variant, self.size.pixels())
    }

    /// Animator for `compositor`, delaying on worker threads per the timing mode.
    pub fn animator<C: Compositor>(&self, compositor: C) -> IndicatorAnimator<C> {
        IndicatorAnimator::threaded(compositor, self.timing)
    }
}
