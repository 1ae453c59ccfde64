//! The closed set of indicator animation variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named animation style of the status indicator.
///
/// Discriminants index the catalog's dispatch table; keep [`AnimationVariant::ALL`]
/// in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationVariant {
    /// Static dot.
    #[default]
    Default,
    Ping,
    Bounce,
    Pulse,
    Blink,
    Ripple,
    Heartbeat,
    Spin,
    Wave,
    Glow,
    Morph,
    Orbit,
    Radar,
    Sonar,
    Beacon,
    Shake,
    Wobble,
    Pop,
    Flicker,
    Breathe,
    Ring,
    Flash,
    Swing,
    Jiggle,
    Throb,
    Twinkle,
    Splash,
    Battery,
    TrafficLightVertical,
    TrafficLightHorizontal,
    WifiSignal,
    CellularSignal,
}

/// Secondary animation driven on the container layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerMotion {
    /// Halo pulse centered on the container's midpoint.
    Glow,
    /// Continuous rotation. `center_scale` multiplies the indicator size to
    /// give the pivot; `duration_ms` is one revolution.
    Orbit { center_scale: f32, duration_ms: u32 },
    /// Lighthouse flash ring.
    BeaconBurst,
}

impl AnimationVariant {
    pub const ALL: [AnimationVariant; 32] = [
        Self::Default,
        Self::Ping,
        Self::Bounce,
        Self::Pulse,
        Self::Blink,
        Self::Ripple,
        Self::Heartbeat,
        Self::Spin,
        Self::Wave,
        Self::Glow,
        Self::Morph,
        Self::Orbit,
        Self::Radar,
        Self::Sonar,
        Self::Beacon,
        Self::Shake,
        Self::Wobble,
        Self::Pop,
        Self::Flicker,
        Self::Breathe,
        Self::Ring,
        Self::Flash,
        Self::Swing,
        Self::Jiggle,
        Self::Throb,
        Self::Twinkle,
        Self::Splash,
        Self::Battery,
        Self::TrafficLightVertical,
        Self::TrafficLightHorizontal,
        Self::WifiSignal,
        Self::CellularSignal,
    ];

    /// Battery, traffic-light and signal glyphs. These never animate.
    pub fn is_status_glyph(&self) -> bool {
        matches!(
            self,
            Self::Battery
                | Self::TrafficLightVertical
                | Self::TrafficLightHorizontal
                | Self::WifiSignal
                | Self::CellularSignal
        )
    }

    /// Whether any animation at all runs for this variant.
    pub fn animates(&self) -> bool {
        !self.is_status_glyph() && *self != Self::Default
    }

    /// Variants whose effects extend past the dot and need the larger padding.
    pub fn uses_effect_padding(&self) -> bool {
        matches!(
            self,
            Self::Ping
                | Self::Ripple
                | Self::Sonar
                | Self::Splash
                | Self::Glow
                | Self::Ring
                | Self::Radar
                | Self::Beacon
                | Self::Orbit
                | Self::Spin
                | Self::Bounce
        )
    }

    /// Container animation re-derived from the variant on every start.
    pub fn container_motion(&self) -> Option<ContainerMotion> {
        match self {
            Self::Glow => Some(ContainerMotion::Glow),
            Self::Radar => Some(ContainerMotion::Orbit {
                center_scale: 1.1,
                duration_ms: 2000,
            }),
            Self::Beacon => Some(ContainerMotion::BeaconBurst),
            Self::Spin => Some(ContainerMotion::Orbit {
                center_scale: 1.0,
                duration_ms: 800,
            }),
            Self::Orbit => Some(ContainerMotion::Orbit {
                center_scale: 1.0,
                duration_ms: 1300,
            }),
            _ => None,
        }
    }

    /// Kebab-case name, as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ping => "ping",
            Self::Bounce => "bounce",
            Self::Pulse => "pulse",
            Self::Blink => "blink",
            Self::Ripple => "ripple",
            Self::Heartbeat => "heartbeat",
            Self::Spin => "spin",
            Self::Wave => "wave",
            Self::Glow => "glow",
            Self::Morph => "morph",
            Self::Orbit => "orbit",
            Self::Radar => "radar",
            Self::Sonar => "sonar",
            Self::Beacon => "beacon",
            Self::Shake => "shake",
            Self::Wobble => "wobble",
            Self::Pop => "pop",
            Self::Flicker => "flicker",
            Self::Breathe => "breathe",
            Self::Ring => "ring",
            Self::Flash => "flash",
            Self::Swing => "swing",
            Self::Jiggle => "jiggle",
            Self::Throb => "throb",
            Self::Twinkle => "twinkle",
            Self::Splash => "splash",
            Self::Battery => "battery",
            Self::TrafficLightVertical => "traffic-light-vertical",
            Self::TrafficLightHorizontal => "traffic-light-horizontal",
            Self::WifiSignal => "wifi-signal",
            Self::CellularSignal => "cellular-signal",
        }
    }
}

impl fmt::Display for AnimationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown animation variant `{0}`")]
pub struct UnknownVariant(pub String);

impl FromStr for AnimationVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
