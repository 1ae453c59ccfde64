use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blossom_config::TimingMode;
use blossom_indicator::animation::timing::DispatchQueue;
use blossom_indicator::animation::{
    AnimationVariant, Channel, IndicatorAnimator, KeyValue, LayerRole, RingAnimationRecord,
    StartRequest, TimingAdapter, VisualTree,
};
use blossom_indicator::sim::{SimCompositor, SimTimer, SimTree};

fn animator(compositor: SimCompositor) -> (IndicatorAnimator<SimCompositor>, SimTimer) {
    let (dispatcher, queue) = DispatchQueue::channel();
    let timer = SimTimer::new(dispatcher);
    let timing = TimingAdapter::new(TimingMode::Auto, timer.clone(), queue);
    (IndicatorAnimator::new(compositor, timing), timer)
}

fn ring(index: usize, size: f32, end_scale: f32, delay_ms: u32) -> RingAnimationRecord {
    RingAnimationRecord {
        element: LayerRole::Ring(index),
        size_at_creation: size,
        start_opacity: 0.6,
        end_opacity: 0.0,
        end_scale,
        duration_ms: 1000,
        delay_ms,
    }
}

/// Advance both virtual clocks, then run due continuations.
fn step(animator: &mut IndicatorAnimator<SimCompositor>, timer: &SimTimer, ms: u64) -> usize {
    timer.advance(ms);
    animator.compositor_mut().advance(ms as f32);
    animator.pump()
}

#[test]
fn second_start_replaces_first_session() -> Result<()> {
    let mut tree = SimTree::new(1, false);
    let (mut animator, _) = animator(SimCompositor::native());

    animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Ping, 20.0));
    let first: Vec<_> = animator.tracked_handles().to_vec();
    assert_eq!(first.len(), 2);

    tree.rebuild();
    animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Ping, 20.0));

    let second = animator.tracked_handles();
    assert_eq!(second.len(), 2);
    for old in &first {
        assert!(second.iter().all(|h| h.id != old.id));
        assert_eq!(animator.compositor().running(old.id), 0);
    }
    let dot = tree.resolve(LayerRole::Dot).context("dot")?;
    assert_eq!(animator.dot(), Some(dot));
    Ok(())
}

#[test]
fn manual_backend_holds_identity_until_delay_elapses() -> Result<()> {
    let tree = SimTree::new(1, false);
    let ring_id = tree.resolve(LayerRole::Ring(0)).context("ring")?.id;
    let (mut animator, timer) = animator(SimCompositor::manual());

    let request =
        StartRequest::new(AnimationVariant::Ping, 20.0).with_rings(vec![ring(0, 20.0, 2.0, 300)]);
    animator.start_dot_animation(&tree, request);

    assert_eq!(step(&mut animator, &timer, 299), 0);
    let compositor = animator.compositor();
    assert_eq!(compositor.sample(ring_id, Channel::Scale), None);
    assert_eq!(compositor.value_or_identity(ring_id, Channel::Scale), KeyValue::scale(1.0));
    assert_eq!(compositor.value_or_identity(ring_id, Channel::Opacity), KeyValue::Scalar(1.0));

    assert_eq!(step(&mut animator, &timer, 2), 1);
    let compositor = animator.compositor();
    assert_eq!(compositor.sample(ring_id, Channel::Scale), Some(KeyValue::scale(1.0)));
    assert_eq!(compositor.sample(ring_id, Channel::Opacity), Some(KeyValue::Scalar(0.6)));

    step(&mut animator, &timer, 500);
    let opacity = animator
        .compositor()
        .sample(ring_id, Channel::Opacity)
        .and_then(|v| v.as_scalar())
        .context("ring opacity")?;
    assert!((opacity - 0.3).abs() < 1e-3, "opacity {opacity}");
    Ok(())
}

#[test]
fn stop_during_delay_starts_nothing() -> Result<()> {
    let tree = SimTree::new(1, false);
    let ring_id = tree.resolve(LayerRole::Ring(0)).context("ring")?.id;
    let (mut animator, timer) = animator(SimCompositor::manual());

    let request =
        StartRequest::new(AnimationVariant::Ping, 20.0).with_rings(vec![ring(0, 20.0, 2.0, 300)]);
    animator.start_dot_animation(&tree, request);
    step(&mut animator, &timer, 100);
    animator.stop_animation();

    assert_eq!(step(&mut animator, &timer, 400), 0);
    assert!(animator.tracked_handles().is_empty());
    assert_eq!(animator.compositor().running(ring_id), 0);
    Ok(())
}

#[test]
fn continuation_of_previous_session_is_dropped() -> Result<()> {
    let tree = SimTree::new(1, false);
    let (mut animator, timer) = animator(SimCompositor::manual());

    let request =
        StartRequest::new(AnimationVariant::Ping, 20.0).with_rings(vec![ring(0, 20.0, 2.0, 300)]);
    animator.start_dot_animation(&tree, request);
    step(&mut animator, &timer, 100);
    animator.restart_animations(&tree, None, None);

    // The first session's ring would be due here.
    assert_eq!(step(&mut animator, &timer, 200), 0);
    assert_eq!(step(&mut animator, &timer, 100), 1);
    assert_eq!(animator.tracked_handles().len(), 2);
    Ok(())
}

#[test]
fn restart_replays_ring_records_exactly() -> Result<()> {
    let mut tree = SimTree::new(2, false);
    let (mut animator, _) = animator(SimCompositor::native());

    let request = StartRequest::new(AnimationVariant::Ripple, 20.0)
        .with_rings(vec![ring(0, 20.0, 1.8, 0), ring(1, 20.0, 1.8, 150)]);
    animator.start_dot_animation(&tree, request);
    let before = animator.ring_records().to_vec();

    tree.rebuild();
    animator.restart_animations(&tree, None, None);
    let after = animator.ring_records();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after) {
        assert_eq!(a.element, b.element);
        assert_eq!(a.size_at_creation.to_bits(), b.size_at_creation.to_bits());
        assert_eq!(a.start_opacity.to_bits(), b.start_opacity.to_bits());
        assert_eq!(a.end_opacity.to_bits(), b.end_opacity.to_bits());
        assert_eq!(a.end_scale.to_bits(), b.end_scale.to_bits());
        assert_eq!(a.duration_ms, b.duration_ms);
        assert_eq!(a.delay_ms, b.delay_ms);
    }

    // Handles come from the rebuilt tree, not the previous one.
    for role in [LayerRole::Dot, LayerRole::Ring(0), LayerRole::Ring(1)] {
        let current = tree.resolve(role).context("layer")?;
        assert!(animator.tracked_handles().contains(&current));
    }
    Ok(())
}

#[test]
fn missing_layer_is_skipped_on_restart() -> Result<()> {
    let mut tree = SimTree::new(2, false);
    let (mut animator, _) = animator(SimCompositor::native());
    animator.start_dot_animation(&tree, StartRequest::new(AnimationVariant::Sonar, 20.0));

    tree.remove(LayerRole::Ring(1));
    animator.restart_animations(&tree, None, None);

    assert!(animator.is_animating());
    let roles: Vec<LayerRole> = animator.tracked_handles().iter().map(|h| h.role).collect();
    assert_eq!(roles, vec![LayerRole::Dot, LayerRole::Ring(0)]);
    assert_eq!(animator.ring_records().len(), 2);
    Ok(())
}

#[test]
fn static_variants_restart_to_nothing() -> Result<()> {
    let tree = SimTree::new(1, true);
    for variant in [
        AnimationVariant::Default,
        AnimationVariant::TrafficLightHorizontal,
        AnimationVariant::CellularSignal,
    ] {
        let (mut animator, _) = animator(SimCompositor::native());
        animator.on_attached(&tree, variant, 26.0);
        animator.restart_animations(&tree, None, None);

        assert!(!animator.is_animating());
        assert!(animator.tracked_handles().is_empty());
        assert_eq!(animator.compositor().start_count(), 0);
    }
    Ok(())
}

#[test]
fn threaded_timer_starts_delayed_ring() -> Result<()> {
    let tree = SimTree::new(1, false);
    let ring_id = tree.resolve(LayerRole::Ring(0)).context("ring")?.id;
    let mut animator = IndicatorAnimator::threaded(SimCompositor::manual(), TimingMode::Auto);

    let request =
        StartRequest::new(AnimationVariant::Ping, 20.0).with_rings(vec![ring(0, 20.0, 2.0, 30)]);
    animator.start_dot_animation(&tree, request);
    assert_eq!(animator.compositor().running(ring_id), 0);

    let deadline = Instant::now() + Duration::from_secs(5);
    while animator.pump() == 0 {
        anyhow::ensure!(Instant::now() < deadline, "deferred ring never started");
        std::thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(animator.compositor().running(ring_id), 2);
    assert_eq!(animator.tracked_handles().len(), 2);
    Ok(())
}
