//! Interpolation over the closed value set.
//!
//! `interpolate` dispatches on the pair of [`Value`] variants; the per-shape
//! helpers live in [`functions`].

pub mod functions;

use crate::error::{Result, TweenError};
use crate::value::Value;

pub use functions::{lerp_color, lerp_f32, lerp_i32, lerp_vec2, lerp_vec3};

/// Unclamped interpolation between `start` and `end` at `t`.
///
/// `t` outside [0, 1] extrapolates, which is what overshooting curves rely on.
/// Step-only kinds and mismatched pairs are rejected.
pub fn interpolate(start: &Value, end: &Value, t: f32) -> Result<Value> {
    let value = match (start, end) {
        (Value::Float(a), Value::Float(b)) => Value::Float(lerp_f32(*a, *b, t)),
        (Value::Int(a), Value::Int(b)) => Value::Int(lerp_i32(*a, *b, t)),
        (Value::Vec2(a), Value::Vec2(b)) => Value::Vec2(lerp_vec2(*a, *b, t)),
        (Value::Vec3(a), Value::Vec3(b)) => Value::Vec3(lerp_vec3(*a, *b, t)),
        (Value::Color(a), Value::Color(b)) => Value::Color(lerp_color(*a, *b, t)),
        (Value::Bool(_), Value::Bool(_)) | (Value::Text(_), Value::Text(_)) => {
            return Err(TweenError::UnsupportedValueKind { kind: start.kind() });
        }
        _ => {
            return Err(TweenError::ValueKindMismatch {
                start: start.kind(),
                end: end.kind(),
            });
        }
    };
    Ok(value)
}

/// Check that a start/end pair can be tweened without producing a value.
pub fn validate_pair(start: &Value, end: &Value) -> Result<()> {
    if start.kind() != end.kind() {
        return Err(TweenError::ValueKindMismatch {
            start: start.kind(),
            end: end.kind(),
        });
    }
    if !start.kind().is_interpolable() {
        return Err(TweenError::UnsupportedValueKind { kind: start.kind() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn dispatches_on_matching_kinds() {
        assert_eq!(
            interpolate(&Value::Float(0.0), &Value::Float(10.0), 0.5).unwrap(),
            Value::Float(5.0)
        );
        assert_eq!(
            interpolate(&Value::Vec2([0.0, 2.0]), &Value::Vec2([4.0, 6.0]), 0.25).unwrap(),
            Value::Vec2([1.0, 3.0])
        );
        assert_eq!(
            interpolate(&Value::Int(0), &Value::Int(10), 0.34).unwrap(),
            Value::Int(3)
        );
    }

    #[test]
    fn rejects_step_only_kinds() {
        let err = interpolate(&Value::Bool(false), &Value::Bool(true), 0.5).unwrap_err();
        assert_eq!(
            err,
            TweenError::UnsupportedValueKind {
                kind: ValueKind::Bool
            }
        );
        assert!(validate_pair(&Value::Text("a".into()), &Value::Text("b".into())).is_err());
    }

    #[test]
    fn rejects_mismatched_pairs() {
        let err = interpolate(&Value::Float(0.0), &Value::Vec3([1.0; 3]), 0.5).unwrap_err();
        assert_eq!(
            err,
            TweenError::ValueKindMismatch {
                start: ValueKind::Float,
                end: ValueKind::Vec3,
            }
        );
        assert!(validate_pair(&Value::Int(0), &Value::Float(1.0)).is_err());
        assert!(validate_pair(&Value::Color([0.0; 4]), &Value::Color([1.0; 4])).is_ok());
    }
}
