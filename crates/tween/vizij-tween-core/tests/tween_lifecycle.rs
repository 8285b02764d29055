use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vizij_tween::{
    ease, interpolate, ColorRgba, Ease, Target, TweenError, TweenManager, TweenState, Value,
    ValueKind,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn recorder<V: 'static>() -> (Rc<RefCell<Vec<V>>>, impl FnMut(V) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |v| sink.borrow_mut().push(v))
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move || c.set(c.get() + 1))
}

/// it should report the midpoint, then the end, then fire on_complete once
#[test]
fn linear_scenario_half_then_full() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let (completions, on_complete) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 10.0, 1.0, sink)
        .unwrap();
    tween.set_ease(Ease::Linear).set_on_complete(on_complete);

    manager.tick(0.5, 0.5);
    approx(*seen.borrow().last().unwrap(), 5.0, 1e-5);
    assert!(!tween.is_complete());
    assert_eq!(completions.get(), 0);

    let summary = manager.tick(0.5, 0.5);
    approx(*seen.borrow().last().unwrap(), 10.0, 1e-5);
    assert!(tween.is_complete());
    assert_eq!(completions.get(), 1);
    assert_eq!(summary.completed, 1);
    assert!(manager.is_empty());

    manager.tick(0.5, 0.5);
    assert_eq!(completions.get(), 1);
    assert_eq!(seen.borrow().len(), 2);
}

/// it should deliver interpolate(start, end, ease(curve, 1)) on the final tick
#[test]
fn final_value_matches_eased_endpoint() {
    for curve in [Ease::Linear, Ease::InOutBack, Ease::OutBounce, Ease::InElastic] {
        let manager = TweenManager::new();
        let (seen, sink) = recorder::<[f32; 3]>();
        let start = [1.0, -2.0, 0.5];
        let end = [4.0, 6.0, -1.5];
        let tween = manager
            .tween(Target::none(), "pos", start, end, 0.5, sink)
            .unwrap();
        tween.set_ease(curve);
        manager.tick(0.25, 0.25);
        manager.tick(0.25, 0.25);
        assert!(tween.is_complete());
        let expected = interpolate(
            &Value::Vec3(start),
            &Value::Vec3(end),
            ease(curve, 1.0),
        )
        .unwrap();
        assert_eq!(Value::Vec3(*seen.borrow().last().unwrap()), expected);
    }
}

/// it should not consume time or fire anything while paused
#[test]
fn pause_freezes_counters_and_callbacks() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let (updates, on_update) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 1.0, sink)
        .unwrap();
    tween.set_on_update(on_update);
    tween.set_start_delay(0.1).unwrap();

    manager.tick(0.05, 0.05);
    tween.pause();
    let (delay_before, elapsed_before) = (tween.delay_elapsed(), tween.elapsed());
    for _ in 0..5 {
        manager.tick(0.2, 0.2);
    }
    assert!(tween.is_paused());
    assert_eq!(tween.delay_elapsed(), delay_before);
    assert_eq!(tween.elapsed(), elapsed_before);
    assert!(seen.borrow().is_empty());
    assert_eq!(updates.get(), 0);

    tween.resume();
    manager.tick(0.25, 0.25);
    approx(tween.elapsed(), 0.2, 1e-5);
    assert_eq!(updates.get(), 1);
    approx(*seen.borrow().last().unwrap(), 0.2, 1e-5);
}

/// it should hold callbacks until the delay has elapsed and carry only the excess
#[test]
fn delay_scenario() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 1.0, sink)
        .unwrap();
    tween.set_start_delay(0.2).unwrap();

    manager.tick(0.1, 0.1);
    assert!(seen.borrow().is_empty());
    assert_eq!(tween.state(), TweenState::Delaying);

    manager.tick(0.15, 0.15);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(tween.state(), TweenState::Running);
    approx(tween.elapsed(), 0.05, 1e-5);
    approx(seen.borrow()[0], 0.05, 1e-5);
}

/// it should never move the delay clock backwards when the delay shrinks
#[test]
fn shrinking_delay_mid_flight() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 1.0, sink)
        .unwrap();
    tween.set_start_delay(1.0).unwrap();

    manager.tick(0.8, 0.8);
    let before = tween.delay_elapsed();
    tween.set_start_delay(0.5).unwrap();
    manager.tick(0.1, 0.1);

    assert!(tween.delay_elapsed() >= before);
    assert_eq!(tween.state(), TweenState::Running);
    approx(tween.elapsed(), 0.1, 1e-6);
    approx(seen.borrow()[0], 0.1, 1e-5);
}

/// it should keep a killed tween silent forever
#[test]
fn kill_then_advance_stays_killed() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let (updates, on_update) = counter();
    let (completions, on_complete) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 0.5, sink)
        .unwrap();
    tween.set_on_update(on_update).set_on_complete(on_complete);

    manager.tick(0.1, 0.1);
    tween.kill();
    assert!(tween.was_killed());
    assert!(tween.is_complete());
    // removal is deferred to the next tick
    assert!(manager.contains("x"));

    for _ in 0..4 {
        manager.tick(0.5, 0.5);
        tween.advance(vizij_tween::TimeStep::uniform(0.5));
    }
    assert_eq!(tween.state(), TweenState::Killed);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(updates.get(), 1);
    assert_eq!(completions.get(), 0);
    assert!(!manager.contains("x"));
}

/// it should fire the percent watchpoint exactly once
#[test]
fn percent_threshold_fires_once() {
    let manager = TweenManager::new();
    let (hits, on_half) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 1.0, |_| {})
        .unwrap();
    tween.set_on_percent_completed(0.5, on_half);

    manager.tick(0.3, 0.3);
    assert_eq!(hits.get(), 0);
    manager.tick(0.3, 0.3);
    assert_eq!(hits.get(), 1);
    manager.tick(0.3, 0.3);
    manager.tick(0.3, 0.3);
    assert_eq!(hits.get(), 1);
    assert!(tween.is_complete());
}

/// it should fire the watchpoint once even when one delta jumps far past it
#[test]
fn percent_threshold_with_overshooting_delta() {
    let manager = TweenManager::new();
    let (hits, on_hit) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 1.0, |_| {})
        .unwrap();
    tween.set_loops(0).set_on_percent_completed(0.25, on_hit);
    for _ in 0..6 {
        manager.tick(0.9, 0.9);
    }
    assert_eq!(hits.get(), 1);
}

/// it should play start→end then end→start under ping-pong with two loops
#[test]
fn ping_pong_two_loops() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let (completions, on_complete) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 10.0, 1.0, sink)
        .unwrap();
    tween.set_ping_pong(2).set_on_complete(on_complete);

    for _ in 0..4 {
        manager.tick(0.5, 0.5);
    }
    let values = seen.borrow().clone();
    assert_eq!(values.len(), 4);
    approx(values[0], 5.0, 1e-5);
    approx(values[1], 10.0, 1e-5);
    approx(values[2], 5.0, 1e-5);
    approx(values[3], 0.0, 1e-5);
    assert_eq!(tween.loops_completed(), 2);
    assert!(tween.is_complete());
    assert_eq!(completions.get(), 1);
}

/// it should loop forever when the loop count is not positive
#[test]
fn infinite_loops_never_complete() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<f32>();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 0.5, sink)
        .unwrap();
    tween.set_loops(-1);
    for _ in 0..40 {
        manager.tick(0.125, 0.125);
    }
    assert!(!tween.is_complete());
    assert_eq!(tween.loops_completed(), 10);
    assert!(tween.progress() <= 1.0);
    approx(tween.elapsed(), 5.0, 1e-4);
    // restart looping never reverses
    assert!(seen.borrow().iter().all(|v| (0.0..=1.0).contains(v)));
    assert!(manager.contains("x"));
}

/// it should pick the unscaled clock only for tweens that ignore time scale
#[test]
fn ignore_time_scale_selects_clock() {
    let manager = TweenManager::new();
    let scaled = manager
        .tween(Target::none(), "scaled", 0.0_f32, 1.0, 1.0, |_| {})
        .unwrap();
    let unscaled = manager
        .tween(Target::none(), "unscaled", 0.0_f32, 1.0, 1.0, |_| {})
        .unwrap();
    unscaled.set_ignore_time_scale();

    // host is in full slow motion
    manager.tick(0.0, 0.25);
    assert_eq!(scaled.elapsed(), 0.0);
    approx(unscaled.elapsed(), 0.25, 1e-6);
    assert!(unscaled.ignores_time_scale());
    assert!(!scaled.ignores_time_scale());
}

/// it should round integer tweens and blend colors component-wise
#[test]
fn int_and_color_kinds() {
    let manager = TweenManager::new();
    let (ints, int_sink) = recorder::<i32>();
    let (colors, color_sink) = recorder::<ColorRgba>();
    manager
        .tween(Target::none(), "score", 0_i32, 10, 1.0, int_sink)
        .unwrap();
    manager
        .tween(
            Target::none(),
            "tint",
            ColorRgba::new(1.0, 0.0, 0.0, 1.0),
            ColorRgba::new(0.0, 0.0, 1.0, 0.0),
            1.0,
            color_sink,
        )
        .unwrap();

    manager.tick(0.25, 0.25);
    assert_eq!(*ints.borrow(), vec![3]);
    assert_eq!(
        colors.borrow()[0],
        ColorRgba::new(0.75, 0.0, 0.25, 0.75)
    );
}

/// it should reject step-only and mismatched dynamic values at construction
#[test]
fn dynamic_values_are_validated_up_front() {
    let manager = TweenManager::new();
    let err = manager
        .tween(
            Target::none(),
            "flag",
            Value::Bool(false),
            Value::Bool(true),
            1.0,
            |_| {},
        )
        .unwrap_err();
    assert_eq!(
        err,
        TweenError::UnsupportedValueKind {
            kind: ValueKind::Bool
        }
    );

    let err = manager
        .tween(
            Target::none(),
            "mixed",
            Value::Float(0.0),
            Value::Vec2([1.0, 1.0]),
            1.0,
            |_| {},
        )
        .unwrap_err();
    assert!(matches!(err, TweenError::ValueKindMismatch { .. }));

    let err = manager
        .tween(Target::none(), "neg", 0.0_f32, 1.0, -1.0, |_| {})
        .unwrap_err();
    assert!(matches!(err, TweenError::InvalidDuration { .. }));

    assert!(manager.is_empty());
}

/// it should animate a dynamically typed Value like its typed counterpart
#[test]
fn dynamic_value_tween() {
    let manager = TweenManager::new();
    let (seen, sink) = recorder::<Value>();
    manager
        .tween(
            Target::none(),
            "dyn",
            Value::Vec2([0.0, 0.0]),
            Value::Vec2([2.0, 4.0]),
            1.0,
            sink,
        )
        .unwrap();
    manager.tick(0.5, 0.5);
    assert_eq!(seen.borrow()[0], Value::Vec2([1.0, 2.0]));
}

/// it should ignore callbacks set after the tween has finished
#[test]
fn callbacks_after_completion_are_dropped() {
    let manager = TweenManager::new();
    let (updates, on_update) = counter();
    let tween = manager
        .tween(Target::none(), "x", 0.0_f32, 1.0, 0.1, |_| {})
        .unwrap();
    manager.tick(0.2, 0.2);
    assert!(tween.is_complete());
    tween.set_on_update(on_update);
    tween.advance(vizij_tween::TimeStep::uniform(0.1));
    assert_eq!(updates.get(), 0);
}
