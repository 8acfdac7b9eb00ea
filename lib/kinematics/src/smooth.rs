use serde::{Deserialize, Serialize};

/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0., 1.)
}

/// Round to 3 decimal places
pub fn round3(value: f32) -> f32 {
    (value * 1000.).round() / 1000.
}

/// Shortest signed difference between two angles in degrees, in `(-180, 180]`
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(360.);
    if delta > 180. { delta - 360. } else { delta }
}

/// Critically damped value with its own velocity, so each instance carries
/// its integrator state across ticks instead of sharing it.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SmoothDamped {
    pub value: f32,
    pub velocity: f32,
}

impl SmoothDamped {
    pub fn new(value: f32) -> Self {
        Self { value, velocity: 0. }
    }

    /// Approach `target` without overshoot over roughly `smooth_time` seconds.
    ///
    /// A zero or negative `dt` leaves the state untouched.
    pub fn damp_toward(&mut self, target: f32, smooth_time: f32, dt: f32) -> f32 {
        if dt <= 0. { return self.value; }

        let smooth_time = smooth_time.max(0.0001);
        let omega = 2. / smooth_time;
        let x = omega * dt;
        let exp = 1. / (1. + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = self.value - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * exp;
        let mut output = target + (change + temp) * exp;

        // never pass the target
        if (target - self.value > 0.) == (output > target) {
            output = target;
            self.velocity = 0.;
        }

        self.value = output;
        output
    }

    /// Same as [`damp_toward`](Self::damp_toward) but for angles in degrees,
    /// taking the short way around.
    pub fn damp_angle_toward(&mut self, target: f32, smooth_time: f32, dt: f32) -> f32 {
        let target = self.value + delta_angle(self.value, target);
        self.damp_toward(target, smooth_time, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp(0., 10., 2.), 10.);
        assert_eq!(lerp(0., 10., -1.), 0.);
        assert_eq!(lerp(0., 10., 0.25), 2.5);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), 0.);
    }

    #[test]
    fn test_delta_angle_wraps() {
        assert_eq!(delta_angle(350., 10.), 20.);
        assert_eq!(delta_angle(10., 350.), -20.);
        assert_eq!(delta_angle(0., 180.), 180.);
    }

    #[test]
    fn test_damp_converges_without_overshoot() {
        let mut damped = SmoothDamped::new(0.);
        let mut last = 0.;
        for _ in 0..200 {
            let v = damped.damp_toward(10., 0.12, 1. / 60.);
            assert!(v <= 10., "Smooth damp should never overshoot, got {v}");
            assert!(v >= last, "Smooth damp should approach monotonically");
            last = v;
        }
        assert!((damped.value - 10.).abs() < 0.01, "Should settle on target, got {}", damped.value);
    }

    #[test]
    fn test_damp_zero_dt_is_noop() {
        let mut damped = SmoothDamped { value: 3., velocity: 1. };
        damped.damp_toward(10., 0.12, 0.);
        assert_eq!(damped, SmoothDamped { value: 3., velocity: 1. });
    }

    #[test]
    fn test_damp_angle_takes_short_way() {
        let mut damped = SmoothDamped::new(350.);
        damped.damp_angle_toward(10., 0.12, 1. / 60.);
        assert!(damped.value > 350., "Should rotate forward through 360, got {}", damped.value);
    }

    #[test]
    fn test_instances_do_not_share_velocity() {
        let mut a = SmoothDamped::new(0.);
        let b = SmoothDamped::new(0.);
        a.damp_toward(5., 0.1, 0.016);
        assert_ne!(a.velocity, 0.);
        assert_eq!(b.velocity, 0.);
    }
}
