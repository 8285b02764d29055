//! Interpolation helpers:
//! - lerp_f32 / lerp_i32 (scalars)
//! - lerp_vec2 / lerp_vec3 (component-wise)
//! - lerp_color (linear RGBA, component-wise)
//!
//! None of these clamp `t`.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Integer lerp computed in f32, rounded to nearest (halves away from zero).
#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    lerp_f32(a as f32, b as f32, t).round() as i32
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

/// RGBA lerp in linear space, alpha included. Results may leave [0, 1]
/// when `t` does.
#[inline]
pub fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_lerp_extrapolates() {
        assert_eq!(lerp_f32(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp_f32(0.0, 10.0, 1.2), 12.0);
        assert_eq!(lerp_f32(0.0, 10.0, -0.1), -1.0);
    }

    #[test]
    fn int_lerp_rounds_to_nearest() {
        assert_eq!(lerp_i32(0, 10, 0.25), 3);
        assert_eq!(lerp_i32(0, 10, 0.24), 2);
        assert_eq!(lerp_i32(0, -10, 0.25), -3);
        assert_eq!(lerp_i32(0, 3, 1.0), 3);
    }

    #[test]
    fn color_lerp_is_component_wise() {
        let c = lerp_color([0.0, 0.0, 1.0, 1.0], [1.0, 0.5, 0.0, 0.0], 0.5);
        assert_eq!(c, [0.5, 0.25, 0.5, 0.5]);
    }
}
