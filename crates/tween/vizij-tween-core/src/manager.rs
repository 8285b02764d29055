//! TweenManager: keyed registry of active tweens, driven once per frame.
//!
//! - `tween` constructs and registers in one step; there is no way to build
//!   a tween the registry cannot see.
//! - At most one tween per identifier. Registering over an occupied
//!   identifier forces the previous occupant to `Complete` without firing its
//!   `on_complete`.
//! - `tick` walks a snapshot of the registry, so callbacks fired during the
//!   tick may register, unregister or kill tweens freely. Changes show up on
//!   the next tick.
//!
//! Single-threaded by construction (`Rc`/`RefCell`); the host's frame loop
//! is the only driver.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::binding::{rc_property_key, Target};
use crate::config::Config;
use crate::error::Result;
use crate::state::TweenState;
use crate::time::TimeStep;
use crate::tween::{invoke, Callback, TweenCell, TweenHandle};
use crate::value::Tweenable;

/// Value-kind-erased view of a tween, as stored in the registry.
pub trait AnyTween {
    fn identifier(&self) -> &str;
    /// Advance by this frame's delta on the tween's own clock.
    fn advance(&self, step: TimeStep);
    fn state(&self) -> TweenState;
    fn is_paused(&self) -> bool;
    fn ignores_time_scale(&self) -> bool;
    /// Hand out `on_complete` once, and only after a natural completion.
    fn take_on_complete(&self) -> Option<Callback>;
    fn kill(&self);
    /// Force `Complete` and drop every callback, `on_complete` included.
    fn supersede(&self);

    #[inline]
    fn is_complete(&self) -> bool {
        self.state().is_complete()
    }

    #[inline]
    fn was_killed(&self) -> bool {
        self.state().was_killed()
    }
}

#[inline]
fn same_tween(a: &Rc<dyn AnyTween>, b: &Rc<dyn AnyTween>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// Per-tick counts returned by [`TweenManager::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    /// Entries visited this tick
    pub advanced: usize,
    /// Entries that completed naturally, whether or not their identifier was
    /// reused by an `on_complete` callback
    pub completed: usize,
    /// Entries removed after being killed
    pub killed: usize,
}

struct Registry {
    cfg: Config,
    entries: IndexMap<String, Rc<dyn AnyTween>>,
    /// Reused per-tick snapshot buffer.
    scratch: Vec<Rc<dyn AnyTween>>,
}

thread_local! {
    static GLOBAL: TweenManager = TweenManager::new();
}

/// Handle to a tween registry. Clones share the same registry.
#[derive(Clone)]
pub struct TweenManager {
    inner: Rc<RefCell<Registry>>,
}

impl Default for TweenManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TweenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("TweenManager")
            .field("cfg", &reg.cfg)
            .field("identifiers", &reg.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TweenManager {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(cfg: Config) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                entries: IndexMap::with_capacity(cfg.registry_capacity),
                scratch: Vec::with_capacity(cfg.registry_capacity),
                cfg,
            })),
        }
    }

    /// This thread's default registry, created on first use and kept for the
    /// lifetime of the thread.
    pub fn global() -> TweenManager {
        GLOBAL.with(|manager| manager.clone())
    }

    pub fn config(&self) -> Config {
        self.inner.borrow().cfg.clone()
    }

    /// Build a tween and register it under `identifier`.
    ///
    /// `on_value_update` receives the interpolated value on every advancing
    /// tick. Fails if `start`/`end` cannot be interpolated or `duration` is
    /// negative or not finite.
    pub fn tween<V, F>(
        &self,
        target: Target,
        identifier: impl Into<String>,
        start: V,
        end: V,
        duration: f32,
        on_value_update: F,
    ) -> Result<TweenHandle<V>>
    where
        V: Tweenable,
        F: FnMut(V) + 'static,
    {
        let ease = self.inner.borrow().cfg.default_ease;
        let cell = TweenCell::new(
            identifier.into(),
            target,
            start,
            end,
            duration,
            ease,
            on_value_update,
        )?;
        let handle = TweenHandle::new(cell);
        self.register(&handle);
        Ok(handle)
    }

    /// Tween one property of an `Rc`-owned object.
    ///
    /// The identifier is derived from the owner's address and `property`, and
    /// the tween dies with the owner.
    pub fn tween_with<T, V, F>(
        &self,
        owner: &Rc<T>,
        property: &str,
        start: V,
        end: V,
        duration: f32,
        on_value_update: F,
    ) -> Result<TweenHandle<V>>
    where
        T: 'static,
        V: Tweenable,
        F: FnMut(V) + 'static,
    {
        self.tween(
            Target::weak(owner),
            rc_property_key(owner, property),
            start,
            end,
            duration,
            on_value_update,
        )
    }

    /// Insert under the tween's identifier, superseding any other occupant.
    ///
    /// Registering the tween that already holds the identifier is a no-op.
    pub fn register<V: Tweenable>(&self, tween: &TweenHandle<V>) {
        self.register_erased(tween.erased());
    }

    fn register_erased(&self, tween: Rc<dyn AnyTween>) {
        let previous = {
            let mut reg = self.inner.borrow_mut();
            match reg.entries.get(tween.identifier()) {
                Some(prev) if same_tween(prev, &tween) => return,
                _ => {}
            }
            reg.entries.insert(tween.identifier().to_string(), tween)
        };
        if let Some(prev) = previous {
            debug!("tween '{}' superseded", prev.identifier());
            prev.supersede();
        }
    }

    /// Remove the entry for `identifier`. Returns false if there was none.
    pub fn unregister(&self, identifier: &str) -> bool {
        let removed = self.inner.borrow_mut().entries.shift_remove(identifier);
        if removed.is_some() {
            trace!("tween '{identifier}' unregistered");
        }
        removed.is_some()
    }

    /// Kill the tween registered under `identifier`; it is removed next tick.
    pub fn kill(&self, identifier: &str) -> bool {
        let tween = self.inner.borrow().entries.get(identifier).cloned();
        match tween {
            Some(tween) => {
                tween.kill();
                true
            }
            None => false,
        }
    }

    /// Kill every registered tween.
    pub fn kill_all(&self) {
        let tweens: Vec<_> = self.inner.borrow().entries.values().cloned().collect();
        for tween in tweens {
            tween.kill();
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.borrow().entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Registered identifiers in tick order.
    pub fn identifiers(&self) -> Vec<String> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    /// Per-frame entry point: `real_delta` is scaled by the host's time scale,
    /// `unscaled_delta` is not.
    pub fn tick(&self, real_delta: f32, unscaled_delta: f32) -> TickSummary {
        self.tick_step(TimeStep::new(real_delta, unscaled_delta))
    }

    pub fn tick_step(&self, step: TimeStep) -> TickSummary {
        let mut snapshot = {
            let mut reg = self.inner.borrow_mut();
            let mut snapshot = std::mem::take(&mut reg.scratch);
            snapshot.extend(reg.entries.values().cloned());
            snapshot
        };

        let mut summary = TickSummary::default();
        for tween in &snapshot {
            tween.advance(step);
            summary.advanced += 1;

            if tween.was_killed() {
                if self.remove_if_current(tween) {
                    summary.killed += 1;
                }
            } else if tween.is_complete() {
                let on_complete = tween.take_on_complete();
                if let Some(on_complete) = &on_complete {
                    invoke(on_complete);
                }
                // the identifier may already belong to a tween started by on_complete
                let removed = self.remove_if_current(tween);
                if on_complete.is_some() || removed {
                    summary.completed += 1;
                }
            }
        }

        snapshot.clear();
        let mut reg = self.inner.borrow_mut();
        if snapshot.capacity() > reg.scratch.capacity() {
            reg.scratch = snapshot;
        }
        summary
    }

    /// Remove `tween`'s entry unless the identifier now belongs to another tween.
    fn remove_if_current(&self, tween: &Rc<dyn AnyTween>) -> bool {
        let removed = {
            let mut reg = self.inner.borrow_mut();
            match reg.entries.get(tween.identifier()) {
                Some(current) if same_tween(current, tween) => {
                    reg.entries.shift_remove(tween.identifier())
                }
                _ => None,
            }
        };
        if removed.is_some() {
            trace!("tween '{}' removed", tween.identifier());
        }
        removed.is_some()
    }
}
