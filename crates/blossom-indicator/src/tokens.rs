//! Size and color tokens of the indicator.
//!
//! Pure lookups: the animation engine only ever needs a pixel size, and the
//! host maps a color tag to one of its theme resources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationVariant;

/// Named indicator size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeTag {
    ExtraSmall,
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl SizeTag {
    pub const ALL: [SizeTag; 5] = [
        Self::ExtraSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::ExtraLarge,
    ];

    /// Diameter of the dot.
    pub fn pixels(&self) -> f32 {
        match self {
            Self::ExtraSmall => 14.0,
            Self::Small => 20.0,
            Self::Medium => 26.0,
            Self::Large => 38.0,
            Self::ExtraLarge => 52.0,
        }
    }

    /// Padding around a dot whose effects stay inside it.
    pub fn padding(&self) -> f32 {
        match self {
            Self::ExtraSmall => 2.0,
            Self::Small => 3.0,
            Self::Medium => 4.0,
            Self::Large => 6.0,
            Self::ExtraLarge => 8.0,
        }
    }

    /// Padding leaving room for rings, glows and orbits.
    pub fn effect_padding(&self) -> f32 {
        match self {
            Self::ExtraSmall => 8.0,
            Self::Small => 10.0,
            Self::Medium => 12.0,
            Self::Large => 15.0,
            Self::ExtraLarge => 20.0,
        }
    }

    /// Outer size of the host container for `variant`.
    pub fn container_size(&self, variant: AnimationVariant) -> f32 {
        if variant.is_status_glyph() {
            return self.pixels();
        }
        let padding = if variant.uses_effect_padding() {
            self.effect_padding()
        } else {
            self.padding()
        };
        self.pixels() + 2.0 * padding
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ExtraSmall => "extra-small",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::ExtraLarge => "extra-large",
        }
    }
}

impl fmt::Display for SizeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown size `{0}`")]
pub struct UnknownSize(pub String);

impl FromStr for SizeTag {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        match wanted.as_str() {
            "xs" => return Ok(Self::ExtraSmall),
            "sm" => return Ok(Self::Small),
            "md" => return Ok(Self::Medium),
            "lg" => return Ok(Self::Large),
            "xl" => return Ok(Self::ExtraLarge),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| UnknownSize(s.to_string()))
    }
}

/// Semantic color of the dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    Primary,
    Secondary,
    Accent,
    #[default]
    Neutral,
    Info,
    Success,
    Warning,
    Error,
}

impl ColorTag {
    /// Theme resource key of the brush for this color.
    pub fn resource_key(&self) -> &'static str {
        match self {
            Self::Primary => "DaisyPrimaryBrush",
            Self::Secondary => "DaisySecondaryBrush",
            Self::Accent => "DaisyAccentBrush",
            Self::Neutral => "DaisyNeutralBrush",
            Self::Info => "DaisyInfoBrush",
            Self::Success => "DaisySuccessBrush",
            Self::Warning => "DaisyWarningBrush",
            Self::Error => "DaisyErrorBrush",
        }
    }

    /// Resolve this color through `lookup`, falling back to the neutral brush.
    pub fn resolve<T>(&self, lookup: impl Fn(&str) -> Option<T>) -> Option<T> {
        lookup(self.resource_key()).or_else(|| lookup(Self::Neutral.resource_key()))
    }
}
