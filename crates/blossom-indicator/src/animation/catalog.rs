//! Keyframe track catalog.
//!
//! Pure data: for every [`AnimationVariant`] the table below names the dot
//! tracks and the burst rings the variant uses. Adding a variant means adding
//! one row.
//!
//! Positional motion scales with the indicator's pixel size:
//!
//! | Variant        | Amplitude              |
//! |----------------|------------------------|
//! | Bounce, Swing  | `max(2, size * 0.5)`   |
//! | Shake          | `max(1, size * 0.25)`  |
//! | Jiggle         | `max(1, size * 0.1)`   |

use super::easing::EasingFunction;
use super::rings::{self, RingBurst};
use super::track::KeyframeTrack;
use super::types::{Channel, KeyValue, LayerRole};
use super::variant::AnimationVariant;

/// Builds the dot tracks of a variant for a given indicator size in pixels.
pub type DotRecipe = fn(f32) -> Vec<KeyframeTrack>;

/// One row of the dispatch table.
#[derive(Debug)]
pub struct CatalogEntry {
    pub variant: AnimationVariant,
    /// `None` when the variant leaves the dot still.
    pub dot: Option<DotRecipe>,
    /// Expand-fade rings created when a session starts.
    pub rings: &'static [RingBurst],
}

const PING_RINGS: &[RingBurst] = &[RingBurst::new(0.75, 0.0, 2.0, 1000, 0)];
const RIPPLE_RINGS: &[RingBurst] = &[
    RingBurst::new(0.35, 0.0, 2.1, 1200, 0),
    RingBurst::new(0.25, 0.0, 2.1, 1200, 400),
    RingBurst::new(0.2, 0.0, 2.1, 1200, 800),
];
const SONAR_RINGS: &[RingBurst] = &[
    RingBurst::new(0.55, 0.0, 2.2, 1400, 0),
    RingBurst::new(0.4, 0.0, 2.2, 1400, 700),
];
const SPLASH_RINGS: &[RingBurst] = &[
    RingBurst::new(0.6, 0.0, 2.0, 900, 0),
    RingBurst::new(0.45, 0.0, 2.0, 900, 300),
];
const RING_RINGS: &[RingBurst] = &[RingBurst::new(0.65, 0.0, 2.2, 1200, 0)];

macro_rules! entry {
    ($variant:ident) => {
        entry!($variant, None, &[])
    };
    ($variant:ident, $dot:expr) => {
        entry!($variant, Some($dot as DotRecipe), &[])
    };
    ($variant:ident, $dot:expr, $rings:expr) => {
        CatalogEntry {
            variant: AnimationVariant::$variant,
            dot: $dot,
            rings: $rings,
        }
    };
}

/// Indexed by `AnimationVariant as usize`.
static CATALOG: [CatalogEntry; 32] = [
    entry!(Default),
    entry!(Ping, None, PING_RINGS),
    entry!(Bounce, bounce),
    entry!(Pulse, pulse),
    entry!(Blink, blink),
    entry!(Ripple, None, RIPPLE_RINGS),
    entry!(Heartbeat, heartbeat),
    entry!(Spin),
    entry!(Wave, wave),
    entry!(Glow),
    entry!(Morph, morph),
    entry!(Orbit),
    entry!(Radar),
    entry!(Sonar, None, SONAR_RINGS),
    entry!(Beacon, beacon),
    entry!(Shake, shake),
    entry!(Wobble, wobble),
    entry!(Pop, pop),
    entry!(Flicker, flicker),
    entry!(Breathe, breathe),
    entry!(Ring, None, RING_RINGS),
    entry!(Flash, flash),
    entry!(Swing, swing),
    entry!(Jiggle, jiggle),
    entry!(Throb, throb),
    entry!(Twinkle, twinkle),
    entry!(Splash, Some(splash as DotRecipe), SPLASH_RINGS),
    entry!(Battery),
    entry!(TrafficLightVertical),
    entry!(TrafficLightHorizontal),
    entry!(WifiSignal),
    entry!(CellularSignal),
];

/// Look up the table row for `variant`.
pub fn entry(variant: AnimationVariant) -> &'static CatalogEntry {
    &CATALOG[variant as usize]
}

/// Dot tracks for `variant`; empty for variants that leave the dot still.
pub fn dot_tracks(variant: AnimationVariant, size_px: f32) -> Vec<KeyframeTrack> {
    match entry(variant).dot {
        Some(recipe) if !variant.is_status_glyph() => recipe(size_px),
        _ => Vec::new(),
    }
}

/// Ring bursts created when a session for `variant` starts.
pub fn ring_bursts(variant: AnimationVariant) -> &'static [RingBurst] {
    entry(variant).rings
}

/// Every dot and container track of `variant`, tagged with its target layer.
///
/// Ring tracks are not included: they come from the session's ring records.
pub fn tracks_for(variant: AnimationVariant, size_px: f32) -> Vec<(LayerRole, KeyframeTrack)> {
    let mut tracks: Vec<(LayerRole, KeyframeTrack)> = dot_tracks(variant, size_px)
        .into_iter()
        .map(|t| (LayerRole::Dot, t))
        .collect();

    if let Some(motion) = variant.container_motion() {
        tracks.extend(
            rings::container_tracks(motion)
                .into_iter()
                .map(|t| (LayerRole::Container, t)),
        );
    }

    tracks
}

fn bounce_amplitude(size_px: f32) -> f32 {
    (size_px * 0.5).max(2.0)
}

fn shake_amplitude(size_px: f32) -> f32 {
    (size_px * 0.25).max(1.0)
}

fn jiggle_step(size_px: f32) -> f32 {
    (size_px * 0.1).max(1.0)
}

fn opacity(name: &str, duration_ms: f32) -> KeyframeTrack {
    KeyframeTrack::new(name, Channel::Opacity).duration_ms(duration_ms)
}

fn scale(name: &str, duration_ms: f32) -> KeyframeTrack {
    KeyframeTrack::new(name, Channel::Scale).duration_ms(duration_ms)
}

fn translation(name: &str, duration_ms: f32) -> KeyframeTrack {
    KeyframeTrack::new(name, Channel::Translation).duration_ms(duration_ms)
}

fn pulse(_size: f32) -> Vec<KeyframeTrack> {
    vec![opacity("pulse", 1500.0)
        .keyframe(0.0, 1.0)
        .keyframe(0.5, 0.4)
        .keyframe(1.0, 1.0)]
}

fn blink(_size: f32) -> Vec<KeyframeTrack> {
    vec![opacity("blink", 1000.0)
        .keyframe(0.0, 1.0)
        .keyframe(0.49, 1.0)
        .keyframe(0.5, 0.0)
        .keyframe(0.99, 0.0)
        .keyframe(1.0, 1.0)]
}

fn bounce(size: f32) -> Vec<KeyframeTrack> {
    let a = bounce_amplitude(size);
    vec![translation("bounce", 500.0)
        .keyframe(0.0, KeyValue::offset(0.0, 0.0))
        .keyframe(0.5, KeyValue::offset(0.0, -a))
        .keyframe(1.0, KeyValue::offset(0.0, 0.0))]
}

fn heartbeat(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("heartbeat", 1200.0)
        .keyframe(0.0, KeyValue::scale(1.0))
        .keyframe(0.2, KeyValue::scale(1.3))
        .keyframe(0.35, KeyValue::scale(1.0))
        .keyframe(0.55, KeyValue::scale(1.2))
        .keyframe(0.75, KeyValue::scale(1.0))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn wave(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("wave", 900.0)
        .keyframe(0.0, KeyValue::scale(1.0))
        .keyframe(0.5, KeyValue::scale_xy(1.0, 1.55))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn morph(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("morph", 1400.0)
        .keyframe(0.0, KeyValue::scale(1.0))
        .keyframe(0.33, KeyValue::scale_xy(1.55, 0.75))
        .keyframe(0.66, KeyValue::scale_xy(0.8, 1.4))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn shake(size: f32) -> Vec<KeyframeTrack> {
    let a = shake_amplitude(size);
    vec![translation("shake", 500.0)
        .keyframe(0.0, KeyValue::offset(0.0, 0.0))
        .keyframe(0.2, KeyValue::offset(-a, 0.0))
        .keyframe(0.4, KeyValue::offset(a, 0.0))
        .keyframe(0.6, KeyValue::offset(-a * 0.66, 0.0))
        .keyframe(0.8, KeyValue::offset(a * 0.66, 0.0))
        .keyframe(1.0, KeyValue::offset(0.0, 0.0))]
}

// Rotation alone is invisible on a circle, so the squeeze carries the motion.
fn wobble(_size: f32) -> Vec<KeyframeTrack> {
    vec![
        KeyframeTrack::new("wobble.rotation", Channel::Rotation)
            .duration_ms(1000.0)
            .keyframe(0.0, 0.0)
            .keyframe(0.25, 15.0)
            .keyframe(0.5, 0.0)
            .keyframe(0.75, -15.0)
            .keyframe(1.0, 0.0),
        scale("wobble.scale", 1000.0)
            .keyframe(0.0, KeyValue::scale(1.0))
            .keyframe(0.25, KeyValue::scale_xy(1.1, 0.9))
            .keyframe(0.5, KeyValue::scale(1.0))
            .keyframe(0.75, KeyValue::scale_xy(0.9, 1.1))
            .keyframe(1.0, KeyValue::scale(1.0)),
    ]
}

fn pop(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("pop", 900.0)
        .keyframe(0.0, KeyValue::scale(0.65))
        .keyframe(0.5, KeyValue::scale(1.25))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn splash(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("splash", 900.0)
        .keyframe(0.0, KeyValue::scale(1.0))
        .keyframe(0.15, KeyValue::scale(0.5))
        .keyframe(0.4, KeyValue::scale(1.4))
        .keyframe(0.7, KeyValue::scale(0.9))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn flicker(_size: f32) -> Vec<KeyframeTrack> {
    vec![opacity("flicker", 1000.0)
        .keyframe(0.0, 1.0)
        .keyframe(0.15, 0.2)
        .keyframe(0.25, 0.85)
        .keyframe(0.35, 0.1)
        .keyframe(0.5, 0.9)
        .keyframe(0.65, 0.3)
        .keyframe(0.8, 1.0)
        .keyframe(1.0, 1.0)]
}

fn breathe(_size: f32) -> Vec<KeyframeTrack> {
    vec![scale("breathe", 1600.0)
        .keyframe(0.0, KeyValue::scale(1.0))
        .keyframe(0.5, KeyValue::scale(1.25))
        .keyframe(1.0, KeyValue::scale(1.0))]
}

fn flash(_size: f32) -> Vec<KeyframeTrack> {
    vec![opacity("flash", 900.0)
        .keyframe(0.0, 1.0)
        .keyframe(0.1, 0.2)
        .keyframe(0.2, 1.0)
        .keyframe(1.0, 1.0)]
}

fn swing(size: f32) -> Vec<KeyframeTrack> {
    let a = bounce_amplitude(size);
    vec![translation("swing", 1500.0)
        .keyframe(0.0, KeyValue::offset(0.0, 0.0))
        .keyframe(0.25, KeyValue::offset(a, 0.0))
        .keyframe(0.5, KeyValue::offset(0.0, 0.0))
        .keyframe(0.75, KeyValue::offset(-a, 0.0))
        .keyframe(1.0, KeyValue::offset(0.0, 0.0))]
}

fn jiggle(size: f32) -> Vec<KeyframeTrack> {
    let s = jiggle_step(size);
    vec![translation("jiggle", 300.0)
        .keyframe(0.0, KeyValue::offset(0.0, 0.0))
        .keyframe(0.25, KeyValue::offset(s, -s))
        .keyframe(0.5, KeyValue::offset(-s, s))
        .keyframe(0.75, KeyValue::offset(s, 0.0))
        .keyframe(1.0, KeyValue::offset(0.0, 0.0))]
}

fn throb(_size: f32) -> Vec<KeyframeTrack> {
    vec![
        scale("throb.scale", 1100.0)
            .keyframe(0.0, KeyValue::scale(1.0))
            .keyframe(0.5, KeyValue::scale(1.35))
            .keyframe(1.0, KeyValue::scale(1.0)),
        opacity("throb.opacity", 1100.0)
            .keyframe(0.0, 1.0)
            .keyframe(0.5, 0.55)
            .keyframe(1.0, 1.0),
    ]
}

fn twinkle(_size: f32) -> Vec<KeyframeTrack> {
    vec![
        opacity("twinkle.opacity", 1000.0)
            .keyframe(0.0, 0.5)
            .keyframe(0.25, 1.0)
            .keyframe(0.5, 0.4)
            .keyframe(0.75, 1.0)
            .keyframe(1.0, 0.5),
        scale("twinkle.scale", 1000.0)
            .keyframe(0.0, KeyValue::scale(0.9))
            .keyframe(0.25, KeyValue::scale(1.2))
            .keyframe(0.5, KeyValue::scale(0.85))
            .keyframe(0.75, KeyValue::scale(1.15))
            .keyframe(1.0, KeyValue::scale(0.9)),
    ]
}

// Quick flash at the start of a 2s loop, then settle.
fn beacon(_size: f32) -> Vec<KeyframeTrack> {
    vec![opacity("beacon", 2000.0)
        .default_easing(EasingFunction::Linear)
        .keyframe(0.0, 0.3)
        .keyframe(0.05, 1.0)
        .keyframe(0.15, 0.3)
        .keyframe(1.0, 0.3)]
}
