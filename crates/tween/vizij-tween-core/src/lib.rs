//! Vizij Tween Core (engine-agnostic)
//!
//! Time-driven interpolation of a single value from a start to an end over a
//! duration, shaped by an easing curve and delivered to a callback every
//! frame. A [`TweenManager`] owns every active tween and is ticked once per
//! frame by the host loop.
//!
//! ```ignore
//! use vizij_tween::{Ease, Target, TweenManager};
//!
//! let tweens = TweenManager::global();
//! tweens
//!     .tween(Target::none(), "panel_Alpha", 0.0_f32, 1.0, 0.3, |a| panel.set_alpha(a))?
//!     .set_ease(Ease::OutQuad)
//!     .set_on_complete(|| println!("shown"));
//!
//! // every frame
//! tweens.tick(dt * time_scale, dt);
//! ```

pub mod binding;
pub mod config;
pub mod ease;
pub mod error;
pub mod interp;
pub mod manager;
pub mod state;
pub mod time;
pub mod tween;
pub mod value;

// Re-exports for consumers (binding layers)
pub use binding::{property_key, rc_property_key, AliveFn, AlwaysAlive, Liveness, Target};
pub use config::Config;
pub use ease::{ease, Ease};
pub use error::{Result, TweenError};
pub use interp::interpolate;
pub use manager::{AnyTween, TickSummary, TweenManager};
pub use state::TweenState;
pub use time::TimeStep;
pub use tween::{Callback, TweenHandle, ValueCallback};
pub use value::{ColorRgba, Tweenable, Value, ValueKind};
