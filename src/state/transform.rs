/// Overlay transform parameters
///
/// The two scalars that drive the 3D overlay's presentation: a clamped
/// scale factor shared by all three models, and an accumulating yaw
/// rotation applied to the cube only. These are the only values a user
/// can adjust while viewing a captured photo.

/// Smallest allowed model scale
pub const SCALE_MIN: f32 = 0.2;
/// Largest allowed model scale
pub const SCALE_MAX: f32 = 3.0;
/// Scale change per zoom button press
pub const SCALE_STEP: f32 = 0.2;
/// Rotation change per rotate button press, in degrees
pub const ROTATE_STEP_DEG: f32 = 45.0;

/// Transform parameters for the overlay models
///
/// `rotation` accumulates without bound; consumers reduce it modulo 360
/// for display. `scale` is always kept inside `[SCALE_MIN, SCALE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Uniform scale factor applied to the models (clamped)
    pub scale: f32,
    /// Extra yaw applied to the cube, in degrees (unbounded)
    pub rotation: f32,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl TransformParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the scale by one step, saturating at `SCALE_MAX`.
    /// Pressing the button at the ceiling is a no-op.
    pub fn increase_scale(&mut self) {
        self.scale = (self.scale + SCALE_STEP).min(SCALE_MAX);
    }

    /// Shrink the scale by one step, saturating at `SCALE_MIN`.
    pub fn decrease_scale(&mut self) {
        self.scale = (self.scale - SCALE_STEP).max(SCALE_MIN);
    }

    /// Add one rotation step. Never clamps or wraps; the accumulated
    /// angle keeps the spin animation phase-continuous.
    pub fn rotate_step(&mut self) {
        self.rotation += ROTATE_STEP_DEG;
    }

    /// Rotation reduced to `[0, 360)` for display purposes
    pub fn display_rotation(&self) -> f32 {
        self.rotation.rem_euclid(360.0)
    }

    /// Reset to the defaults for a fresh capture session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let params = TransformParams::default();
        assert_eq!(params.scale, 1.0);
        assert_eq!(params.rotation, 0.0);
    }

    #[test]
    fn test_scale_up_then_down_roughly_round_trips() {
        // Property: below the ceiling's clamp region, up-then-down never
        // loses more than float noise and never escapes the clamp range.
        let mut s = SCALE_MIN;
        while s <= SCALE_MAX - SCALE_STEP {
            let mut params = TransformParams {
                scale: s,
                rotation: 0.0,
            };
            params.increase_scale();
            assert!(params.scale <= SCALE_MAX);
            params.decrease_scale();
            assert!(params.scale >= s - 1e-4);
            assert!(params.scale >= SCALE_MIN);
            s += 0.07;
        }
    }

    #[test]
    fn test_scale_converges_to_ceiling_and_stays() {
        let mut params = TransformParams::default();
        for _ in 0..20 {
            params.increase_scale();
        }
        assert_eq!(params.scale, SCALE_MAX);

        // Idempotent at the ceiling
        params.increase_scale();
        assert_eq!(params.scale, SCALE_MAX);
    }

    #[test]
    fn test_scale_converges_to_floor_and_stays() {
        let mut params = TransformParams::default();
        for _ in 0..20 {
            params.decrease_scale();
        }
        assert_eq!(params.scale, SCALE_MIN);

        params.decrease_scale();
        assert_eq!(params.scale, SCALE_MIN);
    }

    #[test]
    fn test_rotation_is_unbounded() {
        let mut params = TransformParams::default();
        for _ in 0..8 {
            params.rotate_step();
        }
        // 8 steps of 45 degrees = a full turn, not wrapped
        assert_eq!(params.rotation, 360.0);

        params.rotate_step();
        assert_eq!(params.rotation, 405.0);
        assert_eq!(params.display_rotation(), 45.0);
    }

    #[test]
    fn test_reset() {
        let mut params = TransformParams::default();
        params.increase_scale();
        params.rotate_step();
        assert_ne!(params, TransformParams::default());

        params.reset();
        assert_eq!(params, TransformParams::default());
    }
}
