//! Core value kinds and the typed bridge used by tweens.
//!
//! The set of kinds is closed: adding a kind means adding a `Value` variant,
//! a `ValueKind` variant and an arm in `interp::interpolate`.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Color,
    Bool,
    Text,
}

impl ValueKind {
    /// Step-only kinds carry a value but cannot be blended.
    #[inline]
    pub fn is_interpolable(&self) -> bool {
        !matches!(self, ValueKind::Bool | ValueKind::Text)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    Float(f32),
    /// Integer, rounded to nearest after blending
    Int(i32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    /// RGBA color, blended component-wise in linear space
    Color([f32; 4]),
    /// Step-only boolean value (no blending)
    Bool(bool),
    /// Step-only string/text value (no blending)
    Text(String),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Color(_) => ValueKind::Color,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

/// RGBA color with components nominally in [0, 1].
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba(pub [f32; 4]);

impl ColorRgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    #[inline]
    pub fn alpha(&self) -> f32 {
        self.0[3]
    }
}

/// A value type a tween can animate.
///
/// Implemented for the typed members of the closed [`Value`] set and for
/// `Value` itself, which gives a dynamically typed tween.
pub trait Tweenable: Clone + 'static {
    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

impl Tweenable for f32 {
    #[inline]
    fn into_value(self) -> Value {
        Value::Float(self)
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl Tweenable for i32 {
    #[inline]
    fn into_value(self) -> Value {
        Value::Int(self)
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl Tweenable for [f32; 2] {
    #[inline]
    fn into_value(self) -> Value {
        Value::Vec2(self)
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Vec2(v) => Some(v),
            _ => None,
        }
    }
}

impl Tweenable for [f32; 3] {
    #[inline]
    fn into_value(self) -> Value {
        Value::Vec3(self)
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Vec3(v) => Some(v),
            _ => None,
        }
    }
}

impl Tweenable for ColorRgba {
    #[inline]
    fn into_value(self) -> Value {
        Value::Color(self.0)
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Color(c) => Some(ColorRgba(c)),
            _ => None,
        }
    }
}

impl Tweenable for Value {
    #[inline]
    fn into_value(self) -> Value {
        self
    }
    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}
