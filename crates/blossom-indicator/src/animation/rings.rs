//! Secondary animations for burst rings and the effect container.
//!
//! Four behaviors, each parameterized independently of the dot:
//! expand-fade bursts on rings, and glow, orbit and beacon motions on the
//! container. All of them loop forever and use linear easing except glow,
//! which keeps the default curve.

use serde::{Deserialize, Serialize};

use super::easing::EasingFunction;
use super::track::KeyframeTrack;
use super::types::{Channel, KeyValue, LayerRole};
use super::variant::ContainerMotion;

/// Recipe for one expand-fade ring, as listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingBurst {
    pub start_opacity: f32,
    pub end_opacity: f32,
    pub end_scale: f32,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl RingBurst {
    pub const fn new(
        start_opacity: f32,
        end_opacity: f32,
        end_scale: f32,
        duration_ms: u32,
        delay_ms: u32,
    ) -> Self {
        Self {
            start_opacity,
            end_opacity,
            end_scale,
            duration_ms,
            delay_ms,
        }
    }
}

/// Restart-survivable parameters of one ring.
///
/// Created once per ring when a session starts and replayed as-is on
/// restart. `element` is a structural role, never a resolved handle, so a
/// rebuilt tree is looked up afresh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingAnimationRecord {
    pub element: LayerRole,
    pub size_at_creation: f32,
    pub start_opacity: f32,
    pub end_opacity: f32,
    pub end_scale: f32,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl RingAnimationRecord {
    /// Record for the `index`-th ring of a session started at `size_px`.
    pub fn from_burst(index: usize, size_px: f32, burst: &RingBurst) -> Self {
        Self {
            element: LayerRole::Ring(index),
            size_at_creation: size_px,
            start_opacity: burst.start_opacity,
            end_opacity: burst.end_opacity,
            end_scale: burst.end_scale,
            duration_ms: burst.duration_ms,
            delay_ms: burst.delay_ms,
        }
    }

    /// Records for every burst of a recipe, in ring order.
    pub fn from_recipe(size_px: f32, bursts: &[RingBurst]) -> Vec<Self> {
        bursts
            .iter()
            .enumerate()
            .map(|(index, burst)| Self::from_burst(index, size_px, burst))
            .collect()
    }

    pub fn burst(&self) -> RingBurst {
        RingBurst::new(
            self.start_opacity,
            self.end_opacity,
            self.end_scale,
            self.duration_ms,
            self.delay_ms,
        )
    }

    /// Pivot for the ring's scale: the midpoint of a `size_at_creation` box.
    pub fn center(&self) -> (f32, f32) {
        let half = self.size_at_creation / 2.0;
        (half, half)
    }
}

/// Scale 1 to `end_scale` and opacity `start_opacity` to `end_opacity`.
///
/// The delay is not part of the tracks; callers route it through the timing
/// adapter.
pub fn expand_fade_tracks(burst: &RingBurst) -> Vec<KeyframeTrack> {
    let duration = burst.duration_ms as f32;
    vec![
        KeyframeTrack::new("ring.scale", Channel::Scale)
            .duration_ms(duration)
            .default_easing(EasingFunction::Linear)
            .keyframe(0.0, KeyValue::scale(1.0))
            .keyframe(1.0, KeyValue::scale(burst.end_scale)),
        KeyframeTrack::new("ring.opacity", Channel::Opacity)
            .duration_ms(duration)
            .default_easing(EasingFunction::Linear)
            .keyframe(0.0, burst.start_opacity)
            .keyframe(1.0, burst.end_opacity),
    ]
}

fn glow_tracks() -> Vec<KeyframeTrack> {
    vec![
        KeyframeTrack::new("glow.scale", Channel::Scale)
            .duration_ms(1400.0)
            .keyframe(0.0, KeyValue::scale(1.2))
            .keyframe(0.5, KeyValue::scale(2.0))
            .keyframe(1.0, KeyValue::scale(1.2)),
        KeyframeTrack::new("glow.opacity", Channel::Opacity)
            .duration_ms(1400.0)
            .keyframe(0.0, 0.12)
            .keyframe(0.5, 0.28)
            .keyframe(1.0, 0.12),
    ]
}

// Ends short of 360 so backends that snap equivalent angles don't hitch at the loop.
fn orbit_tracks(duration_ms: u32) -> Vec<KeyframeTrack> {
    vec![KeyframeTrack::new("orbit.rotation", Channel::Rotation)
        .duration_ms(duration_ms as f32)
        .default_easing(EasingFunction::Linear)
        .keyframe(0.0, 0.0)
        .keyframe(1.0, 359.99)]
}

fn beacon_burst_tracks() -> Vec<KeyframeTrack> {
    vec![
        KeyframeTrack::new("beacon.scale", Channel::Scale)
            .duration_ms(2000.0)
            .default_easing(EasingFunction::Linear)
            .keyframe(0.0, KeyValue::scale(1.0))
            .keyframe(0.05, KeyValue::scale(1.2))
            .keyframe(0.25, KeyValue::scale(2.0))
            .keyframe(1.0, KeyValue::scale(2.0)),
        KeyframeTrack::new("beacon.opacity", Channel::Opacity)
            .duration_ms(2000.0)
            .default_easing(EasingFunction::Linear)
            .keyframe(0.0, 0.0)
            .keyframe(0.05, 0.6)
            .keyframe(0.25, 0.0)
            .keyframe(1.0, 0.0),
    ]
}

/// Tracks of a container motion.
pub fn container_tracks(motion: ContainerMotion) -> Vec<KeyframeTrack> {
    match motion {
        ContainerMotion::Glow => glow_tracks(),
        ContainerMotion::Orbit { duration_ms, .. } => orbit_tracks(duration_ms),
        ContainerMotion::BeaconBurst => beacon_burst_tracks(),
    }
}

/// Pivot of the container for an indicator of `size_px`.
///
/// Orbits pivot on the far corner of a `size * center_scale` box; the other
/// motions scale about the container's midpoint.
pub fn container_center(motion: ContainerMotion, size_px: f32) -> (f32, f32) {
    match motion {
        ContainerMotion::Orbit { center_scale, .. } => {
            let c = size_px * center_scale;
            (c, c)
        }
        ContainerMotion::Glow | ContainerMotion::BeaconBurst => (size_px / 2.0, size_px / 2.0),
    }
}

/// Opacity to set before the first frame, hiding the layer until the
/// animation takes over.
pub fn container_initial_opacity(motion: ContainerMotion) -> Option<f32> {
    match motion {
        ContainerMotion::BeaconBurst => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_from_recipe() {
        let bursts = [
            RingBurst::new(0.35, 0.0, 2.1, 1200, 0),
            RingBurst::new(0.25, 0.0, 2.1, 1200, 400),
        ];
        let records = RingAnimationRecord::from_recipe(20.0, &bursts);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].element, LayerRole::Ring(0));
        assert_eq!(records[1].element, LayerRole::Ring(1));
        assert_eq!(records[1].delay_ms, 400);
        assert_eq!(records[1].burst(), bursts[1]);
        assert_eq!(records[0].center(), (10.0, 10.0));
    }

    #[test]
    fn test_expand_fade_is_linear() {
        let tracks = expand_fade_tracks(&RingBurst::new(0.8, 0.0, 2.0, 1000, 0));
        let scale = &tracks[0];
        let opacity = &tracks[1];

        assert_eq!(scale.default_easing, EasingFunction::Linear);
        let mid = scale.value_at(0.5).unwrap().as_vector().unwrap();
        assert!((mid[0] - 1.5).abs() < 1e-4);
        let mid = opacity.value_at(0.5).unwrap().as_scalar().unwrap();
        assert!((mid - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_orbit_stops_short_of_full_turn() {
        let tracks = container_tracks(ContainerMotion::Orbit {
            center_scale: 1.0,
            duration_ms: 800,
        });
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].channel, Channel::Rotation);
        assert_eq!(tracks[0].duration_ms, 800.0);
        assert_eq!(tracks[0].keyframes[1].value, KeyValue::Scalar(359.99));
    }

    #[test]
    fn test_container_centers() {
        let radar = ContainerMotion::Orbit {
            center_scale: 1.1,
            duration_ms: 2000,
        };
        let (x, y) = container_center(radar, 20.0);
        assert!((x - 22.0).abs() < 1e-4 && (y - 22.0).abs() < 1e-4);
        assert_eq!(container_center(ContainerMotion::Glow, 20.0), (10.0, 10.0));
    }

    #[test]
    fn test_beacon_burst_guard() {
        assert_eq!(container_initial_opacity(ContainerMotion::BeaconBurst), Some(0.0));
        assert_eq!(container_initial_opacity(ContainerMotion::Glow), None);

        for track in container_tracks(ContainerMotion::BeaconBurst) {
            assert_eq!(track.duration_ms, 2000.0);
            track.validate().unwrap();
        }
    }
}
