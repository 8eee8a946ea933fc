//! Time-step sanitizing and constant-acceleration integration

use glam::Vec2;

use crate::consts::MAX_DT;

/// Coerce a frame delta into a safe simulation step.
///
/// NaN, infinite and negative deltas become zero so entities never teleport;
/// long deltas are clamped to `MAX_DT`.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_DT)
    }
}

/// Advance `pos`/`vel` under constant `accel` for `dt` seconds.
///
/// Uses the closed-form update, so `n` steps of `dt` land on the same state as
/// one step of `n * dt`.
#[inline]
pub fn integrate(pos: &mut Vec2, vel: &mut Vec2, accel: Vec2, dt: f32) {
    *pos += *vel * dt + 0.5 * accel * dt * dt;
    *vel += accel * dt;
}

/// Scalar form of [`integrate`] for a single axis
#[inline]
pub fn integrate_axis(pos: &mut f32, vel: &mut f32, accel: f32, dt: f32) {
    *pos += *vel * dt + 0.5 * accel * dt * dt;
    *vel += accel * dt;
}

/// Per-frame damping factor expressed at `hz`, rescaled to `dt`
#[inline]
pub fn damping(factor_per_frame: f32, dt: f32, hz: f32) -> f32 {
    factor_per_frame.clamp(0.0, 1.0).powf(dt * hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
        assert_eq!(sanitize_dt(-0.5), 0.0);
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(2.0), MAX_DT);
    }

    #[test]
    fn test_gravity_single_frame() {
        let mut y = 0.0;
        let mut vy = 0.0;
        integrate_axis(&mut y, &mut vy, 2200.0, 0.016);
        assert!((vy - 35.2).abs() < 1e-4);
        assert!((y - 0.2816).abs() < 1e-4);
    }

    #[test]
    fn test_damping_matches_per_frame_at_nominal_rate() {
        assert!((damping(0.9, 1.0 / 60.0, 60.0) - 0.9).abs() < 1e-6);
        assert_eq!(damping(0.9, 0.0, 60.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_integration_is_step_size_independent(
            n in 1u32..8,
            frac in 0.0f32..1.0,
            p0 in -500.0f32..500.0,
            v0 in -800.0f32..800.0,
            a in -3000.0f32..3000.0,
        ) {
            // Keep n * dt within the clamp so both paths are legal steps
            let dt = frac * MAX_DT / n as f32;

            let (mut p_many, mut v_many) = (p0, v0);
            for _ in 0..n {
                integrate_axis(&mut p_many, &mut v_many, a, dt);
            }

            let (mut p_one, mut v_one) = (p0, v0);
            integrate_axis(&mut p_one, &mut v_one, a, n as f32 * dt);

            let tol = 1e-3 * (1.0 + p0.abs() + v0.abs());
            prop_assert!((p_many - p_one).abs() < tol, "pos {} vs {}", p_many, p_one);
            prop_assert!((v_many - v_one).abs() < tol, "vel {} vs {}", v_many, v_one);
        }
    }
}
