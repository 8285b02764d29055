//! Target liveness and identifier helpers for binding code.
//!
//! A tween never touches the object it animates; it only asks a [`Target`]
//! whether that object still exists before each advancing tick. Identifiers
//! are plain strings, conventionally `"{owner}_{property}"` so that starting a
//! new tween on the same property supersedes the old one.

use std::fmt;
use std::rc::{Rc, Weak};

/// Capability answering "is the animated object still alive".
pub trait Liveness {
    fn is_alive(&self) -> bool;
}

/// Liveness probe for targets that never go away.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysAlive;

impl Liveness for AlwaysAlive {
    #[inline]
    fn is_alive(&self) -> bool {
        true
    }
}

/// Alive while at least one strong reference exists.
impl<T> Liveness for Weak<T> {
    #[inline]
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }
}

/// Closure-backed probe.
pub struct AliveFn<F>(pub F);

impl<F: Fn() -> bool> Liveness for AliveFn<F> {
    #[inline]
    fn is_alive(&self) -> bool {
        (self.0)()
    }
}

/// Opaque handle to whatever a tween animates, used only for liveness checks.
///
/// A target without a probe is treated as always alive.
#[derive(Default)]
pub struct Target {
    probe: Option<Box<dyn Liveness>>,
}

impl Target {
    /// Target with no liveness probe.
    pub fn none() -> Self {
        Self::default()
    }

    /// Track an `Rc`-owned object without keeping it alive.
    pub fn weak<T: 'static>(owner: &Rc<T>) -> Self {
        Self::from_weak(Rc::downgrade(owner))
    }

    pub fn from_weak<T: 'static>(weak: Weak<T>) -> Self {
        Self::custom(weak)
    }

    pub fn from_fn<F>(probe: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::custom(AliveFn(probe))
    }

    pub fn custom<L: Liveness + 'static>(probe: L) -> Self {
        Self {
            probe: Some(Box::new(probe)),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.probe.as_ref().map_or(true, |probe| probe.is_alive())
    }

    #[inline]
    pub fn has_probe(&self) -> bool {
        self.probe.is_some()
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("probe", &self.probe.is_some())
            .finish()
    }
}

impl<T: 'static> From<&Rc<T>> for Target {
    fn from(owner: &Rc<T>) -> Self {
        Target::weak(owner)
    }
}

/// Conventional identifier for one animated property of one owner.
pub fn property_key(owner: impl fmt::Display, property: &str) -> String {
    format!("{owner}_{property}")
}

/// Identifier derived from the address of an `Rc` allocation.
///
/// Stable for as long as the allocation lives, which is exactly as long as a
/// tween bound to it can run.
pub fn rc_property_key<T>(owner: &Rc<T>, property: &str) -> String {
    let addr = Rc::as_ptr(owner) as *const () as usize;
    property_key(format_args!("{addr:#x}"), property)
}
