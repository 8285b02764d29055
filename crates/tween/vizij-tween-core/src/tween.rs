//! Tween: one eased start→end interpolation and its lifecycle.
//!
//! State machine: `Delaying → Running → {Complete | Killed}`, with pausing
//! and the ping-pong `reverse` flag orthogonal to it. The registry owns one
//! reference to each tween and callers hold [`TweenHandle`]s to the same
//! allocation, so configuration can change mid-flight.
//!
//! Callbacks are invoked with no borrow held on the tween. A callback may
//! reconfigure or kill its own tween, or start new tweens on the manager.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, error};

use crate::binding::Target;
use crate::ease::{ease, Ease};
use crate::error::{Result, TweenError};
use crate::interp::{interpolate, validate_pair};
use crate::manager::AnyTween;
use crate::state::TweenState;
use crate::time::TimeStep;
use crate::value::{Tweenable, Value};

/// Shared no-argument callback slot.
pub type Callback = Rc<RefCell<dyn FnMut()>>;
/// Shared callback slot receiving the interpolated value.
pub type ValueCallback<V> = Rc<RefCell<dyn FnMut(V)>>;

fn callback(f: impl FnMut() + 'static) -> Callback {
    Rc::new(RefCell::new(f))
}

/// Invoke a callback unless it is already running further up the stack.
pub(crate) fn invoke(cb: &Callback) {
    if let Ok(mut f) = cb.try_borrow_mut() {
        (&mut *f)();
    }
}

fn invoke_with<V>(cb: &ValueCallback<V>, value: V) {
    if let Ok(mut f) = cb.try_borrow_mut() {
        (&mut *f)(value);
    }
}

struct Callbacks<V> {
    on_update: Option<Callback>,
    on_value_update: Option<ValueCallback<V>>,
    on_percent_completed: Option<Callback>,
    on_complete: Option<Callback>,
}

impl<V> Callbacks<V> {
    fn clear_progress(&mut self) {
        self.on_update = None;
        self.on_value_update = None;
        self.on_percent_completed = None;
    }

    fn clear_all(&mut self) {
        self.clear_progress();
        self.on_complete = None;
    }
}

/// What one advancing tick has to deliver once the borrow is released.
struct Frame<V> {
    /// `TweenCore::stops` when the frame was built.
    stops: u32,
    value: V,
    on_update: Option<Callback>,
    on_value_update: Option<ValueCallback<V>>,
    on_percent_completed: Option<Callback>,
}

struct TweenCore<V> {
    start: V,
    end: V,
    start_value: Value,
    end_value: Value,
    duration: f32,
    delay: f32,

    /// Total running time since the delay elapsed; never decreases.
    elapsed: f32,
    /// Position inside the current loop, in [0, duration).
    loop_elapsed: f32,
    delay_elapsed: f32,
    loops_completed: u32,

    /// Target loop completions; <= 0 loops forever.
    loop_count: i32,
    ping_pong: bool,
    reverse: bool,
    ease: Ease,

    state: TweenState,
    paused: bool,
    ignore_time_scale: bool,
    percent_threshold: Option<f32>,
    current: Option<V>,
    callbacks: Callbacks<V>,
    /// Bumped by every kill or supersede.
    stops: u32,
}

impl<V: Tweenable> TweenCore<V> {
    /// Natural completion: progress callbacks go away, `on_complete` stays
    /// for the registry to fire once.
    fn finish(&mut self) {
        self.state = TweenState::Complete;
        self.percent_threshold = None;
        self.callbacks.clear_progress();
    }

    fn kill(&mut self) {
        self.stops = self.stops.wrapping_add(1);
        self.state = TweenState::Killed;
        self.percent_threshold = None;
        self.callbacks.clear_all();
    }

    /// Force completion without `on_complete`.
    fn supersede(&mut self) {
        self.stops = self.stops.wrapping_add(1);
        if self.state != TweenState::Killed {
            self.state = TweenState::Complete;
        }
        self.percent_threshold = None;
        self.callbacks.clear_all();
    }

    #[inline]
    fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.loop_elapsed / self.duration).min(1.0)
        } else if self.state == TweenState::Delaying {
            0.0
        } else {
            1.0
        }
    }

    /// Advance the timeline by `dt` seconds on this tween's clock.
    fn step(&mut self, dt: f32) -> Option<Frame<V>> {
        let mut dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        if self.state == TweenState::Delaying {
            let remaining = self.delay - self.delay_elapsed;
            if dt < remaining {
                self.delay_elapsed += dt;
                return None;
            }
            // only the part of the delta past the delay counts as running time
            self.delay_elapsed = self.delay_elapsed.max(self.delay);
            dt -= remaining.max(0.0);
            self.state = TweenState::Running;
        }

        self.elapsed += dt;
        self.loop_elapsed += dt;

        let raw = if self.duration > 0.0 {
            self.loop_elapsed / self.duration
        } else {
            1.0
        };
        let t = raw.min(1.0);
        let eased = ease(self.ease, t);
        let (from, to) = if self.reverse {
            (&self.end_value, &self.start_value)
        } else {
            (&self.start_value, &self.end_value)
        };

        let value = match interpolate(from, to, eased).map(V::from_value) {
            Ok(Some(value)) => value,
            Ok(None) => {
                error!("tween produced a value of the wrong kind; killing it");
                self.kill();
                return None;
            }
            Err(err) => {
                error!("tween interpolation failed after validation: {err}");
                self.kill();
                return None;
            }
        };
        self.current = Some(value.clone());

        let mut frame = Frame {
            stops: self.stops,
            value,
            on_update: self.callbacks.on_update.clone(),
            on_value_update: self.callbacks.on_value_update.clone(),
            on_percent_completed: None,
        };

        if let Some(threshold) = self.percent_threshold {
            if t >= threshold {
                self.percent_threshold = None;
                frame.on_percent_completed = self.callbacks.on_percent_completed.take();
            }
        }

        if raw >= 1.0 {
            self.loops_completed += 1;
            if self.ping_pong {
                self.reverse = !self.reverse;
            }
            if self.loop_count > 0 && self.loops_completed >= self.loop_count as u32 {
                self.finish();
            } else if self.duration > 0.0 {
                self.loop_elapsed = (self.loop_elapsed - self.duration).rem_euclid(self.duration);
            } else {
                self.loop_elapsed = 0.0;
            }
        }

        Some(frame)
    }
}

/// Shared allocation behind a [`TweenHandle`] and its registry entry.
pub(crate) struct TweenCell<V> {
    identifier: String,
    target: Target,
    core: RefCell<TweenCore<V>>,
}

impl<V: Tweenable> TweenCell<V> {
    pub(crate) fn new<F>(
        identifier: String,
        target: Target,
        start: V,
        end: V,
        duration: f32,
        ease: Ease,
        on_value_update: F,
    ) -> Result<Self>
    where
        F: FnMut(V) + 'static,
    {
        if !duration.is_finite() || duration < 0.0 {
            return Err(TweenError::InvalidDuration { duration });
        }
        let start_value = start.clone().into_value();
        let end_value = end.clone().into_value();
        validate_pair(&start_value, &end_value)?;

        let on_value_update: ValueCallback<V> = Rc::new(RefCell::new(on_value_update));
        Ok(Self {
            identifier,
            target,
            core: RefCell::new(TweenCore {
                start,
                end,
                start_value,
                end_value,
                duration,
                delay: 0.0,
                elapsed: 0.0,
                loop_elapsed: 0.0,
                delay_elapsed: 0.0,
                loops_completed: 0,
                loop_count: 1,
                ping_pong: false,
                reverse: false,
                ease,
                state: TweenState::Delaying,
                paused: false,
                ignore_time_scale: false,
                percent_threshold: None,
                current: None,
                stops: 0,
                callbacks: Callbacks {
                    on_update: None,
                    on_value_update: Some(on_value_update),
                    on_percent_completed: None,
                    on_complete: None,
                },
            }),
        })
    }

    /// True once the tween has been killed or superseded since `stops` was read.
    fn stopped_since(&self, stops: u32) -> bool {
        self.core.borrow().stops != stops
    }

    fn emit(&self, frame: Frame<V>) {
        if let Some(cb) = &frame.on_update {
            invoke(cb);
            if self.stopped_since(frame.stops) {
                return;
            }
        }
        if let Some(cb) = &frame.on_value_update {
            invoke_with(cb, frame.value);
            if self.stopped_since(frame.stops) {
                return;
            }
        }
        if let Some(cb) = &frame.on_percent_completed {
            invoke(cb);
        }
    }
}

impl<V: Tweenable> AnyTween for TweenCell<V> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn advance(&self, step: TimeStep) {
        let dt = {
            let core = self.core.borrow();
            if core.paused || core.state.is_terminal() {
                return;
            }
            step.select(core.ignore_time_scale)
        };

        if !self.target.is_alive() {
            debug!("tween '{}' target is gone; killing", self.identifier);
            self.core.borrow_mut().kill();
            return;
        }

        let frame = self.core.borrow_mut().step(dt);
        if let Some(frame) = frame {
            self.emit(frame);
        }
    }

    fn state(&self) -> TweenState {
        self.core.borrow().state
    }

    fn is_paused(&self) -> bool {
        self.core.borrow().paused
    }

    fn ignores_time_scale(&self) -> bool {
        self.core.borrow().ignore_time_scale
    }

    fn take_on_complete(&self) -> Option<Callback> {
        let mut core = self.core.borrow_mut();
        if core.state == TweenState::Complete {
            core.callbacks.on_complete.take()
        } else {
            None
        }
    }

    fn kill(&self) {
        let mut core = self.core.borrow_mut();
        if core.state != TweenState::Killed {
            core.kill();
        }
    }

    fn supersede(&self) {
        self.core.borrow_mut().supersede();
    }
}

/// Caller-side handle to a registered tween.
///
/// Cloning is cheap and every clone refers to the same tween. Setters take
/// `&self` and return `&Self` so they chain:
///
/// ```ignore
/// manager
///     .tween(Target::none(), "logo_Scale", 1.0_f32, 1.25, 0.75, |s| set_scale(s))?
///     .set_ease(Ease::InOutBack)
///     .set_ping_pong(-1)
///     .set_on_percent_completed(0.5, on_half_way);
/// ```
pub struct TweenHandle<V: Tweenable> {
    pub(crate) inner: Rc<TweenCell<V>>,
}

impl<V: Tweenable> Clone for TweenHandle<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: Tweenable> fmt::Debug for TweenHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.core.borrow();
        f.debug_struct("TweenHandle")
            .field("identifier", &self.inner.identifier)
            .field("state", &core.state)
            .field("paused", &core.paused)
            .field("elapsed", &core.elapsed)
            .field("loops_completed", &core.loops_completed)
            .finish()
    }
}

impl<V: Tweenable> TweenHandle<V> {
    pub(crate) fn new(cell: TweenCell<V>) -> Self {
        Self {
            inner: Rc::new(cell),
        }
    }

    pub(crate) fn erased(&self) -> Rc<dyn AnyTween> {
        self.inner.clone()
    }

    /// Returns true if both handles refer to the same tween.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn identifier(&self) -> &str {
        &self.inner.identifier
    }

    /// Advance this tween directly, outside the registry.
    ///
    /// The registry normally does this once per frame; completion callbacks
    /// are only fired by the registry.
    pub fn advance(&self, step: TimeStep) {
        AnyTween::advance(&*self.inner, step);
    }

    // ----- fluent configuration -----

    /// Apply `f` to the tween state and hand back `self` for chaining.
    fn configure(&self, f: impl FnOnce(&mut TweenCore<V>)) -> &Self {
        f(&mut *self.inner.core.borrow_mut());
        self
    }

    /// Like [`configure`](Self::configure), skipped once the tween is terminal.
    fn configure_live(&self, f: impl FnOnce(&mut TweenCore<V>)) -> &Self {
        self.configure(|core| {
            if !core.state.is_terminal() {
                f(core);
            }
        })
    }

    pub fn set_ease(&self, curve: Ease) -> &Self {
        self.configure(|core| core.ease = curve)
    }

    /// Reverse direction on every loop boundary; `loop_count <= 0` loops forever.
    pub fn set_ping_pong(&self, loop_count: i32) -> &Self {
        self.configure(|core| {
            core.loop_count = loop_count;
            core.ping_pong = true;
        })
    }

    /// Restart from the start value on every loop boundary; `loop_count <= 0`
    /// loops forever.
    pub fn set_loops(&self, loop_count: i32) -> &Self {
        self.configure(|core| {
            core.loop_count = loop_count;
            core.ping_pong = false;
        })
    }

    pub fn set_on_complete(&self, f: impl FnMut() + 'static) -> &Self {
        self.configure_live(|core| core.callbacks.on_complete = Some(callback(f)))
    }

    /// Run on the unscaled clock.
    pub fn set_ignore_time_scale(&self) -> &Self {
        self.configure(|core| core.ignore_time_scale = true)
    }

    pub fn set_on_update(&self, f: impl FnMut() + 'static) -> &Self {
        self.configure_live(|core| core.callbacks.on_update = Some(callback(f)))
    }

    pub fn set_on_value_update(&self, f: impl FnMut(V) + 'static) -> &Self {
        self.configure_live(|core| {
            let cb: ValueCallback<V> = Rc::new(RefCell::new(f));
            core.callbacks.on_value_update = Some(cb);
        })
    }

    /// Fire `f` once, the first tick progress reaches `percent` (clamped to [0, 1]).
    pub fn set_on_percent_completed(&self, percent: f32, f: impl FnMut() + 'static) -> &Self {
        self.configure_live(|core| {
            core.percent_threshold = Some(percent.clamp(0.0, 1.0));
            core.callbacks.on_percent_completed = Some(callback(f));
        })
    }

    /// Seconds to wait before the timeline starts.
    ///
    /// Setting it after the delay has already elapsed has no effect on the
    /// running timeline.
    pub fn set_start_delay(&self, delay: f32) -> Result<&Self> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(TweenError::InvalidDelay { delay });
        }
        Ok(self.configure(|core| core.delay = delay))
    }

    // ----- controls -----

    pub fn pause(&self) {
        self.inner.core.borrow_mut().paused = true;
    }

    pub fn resume(&self) {
        self.inner.core.borrow_mut().paused = false;
    }

    /// Stop immediately without firing any callback. Removal from the
    /// registry happens on its next tick.
    pub fn kill(&self) {
        AnyTween::kill(&*self.inner);
    }

    // ----- status -----

    pub fn state(&self) -> TweenState {
        self.inner.core.borrow().state
    }

    pub fn is_complete(&self) -> bool {
        self.state().is_complete()
    }

    pub fn was_killed(&self) -> bool {
        self.state().was_killed()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.core.borrow().paused
    }

    pub fn ignores_time_scale(&self) -> bool {
        self.inner.core.borrow().ignore_time_scale
    }

    pub fn is_reversed(&self) -> bool {
        self.inner.core.borrow().reverse
    }

    /// Total running time since the delay elapsed.
    pub fn elapsed(&self) -> f32 {
        self.inner.core.borrow().elapsed
    }

    /// Running time inside the current loop.
    pub fn loop_elapsed(&self) -> f32 {
        self.inner.core.borrow().loop_elapsed
    }

    pub fn delay_elapsed(&self) -> f32 {
        self.inner.core.borrow().delay_elapsed
    }

    /// Linear progress through the current loop, in [0, 1].
    pub fn progress(&self) -> f32 {
        self.inner.core.borrow().progress()
    }

    pub fn loops_completed(&self) -> u32 {
        self.inner.core.borrow().loops_completed
    }

    pub fn ease(&self) -> Ease {
        self.inner.core.borrow().ease
    }

    pub fn duration(&self) -> f32 {
        self.inner.core.borrow().duration
    }

    pub fn delay(&self) -> f32 {
        self.inner.core.borrow().delay
    }

    pub fn start_value(&self) -> V {
        self.inner.core.borrow().start.clone()
    }

    pub fn end_value(&self) -> V {
        self.inner.core.borrow().end.clone()
    }

    /// Last value delivered to `on_value_update`, if any tick has advanced.
    pub fn current_value(&self) -> Option<V> {
        self.inner.core.borrow().current.clone()
    }
}
