//! WheelMotion: eases the displayed wheel angle toward a spin target.
//!
//! The core only reports where the wheel must end up; everything in between
//! is presentation. Angles are degrees, clockwise, unbounded.

use std::time::{Duration, Instant};

/// Control points of the spin easing curve (CSS `ease`).
pub const EASE: (f64, f64, f64, f64) = (0.25, 0.1, 0.25, 1.0);

#[derive(Debug, Clone)]
pub struct WheelMotion {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl WheelMotion {
    pub fn new() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            started: Instant::now(),
            duration: Duration::ZERO,
        }
    }

    /// Begin animating from wherever the wheel is at `now` toward `target`.
    pub fn start(&mut self, target: f64, now: Instant, duration: Duration) {
        self.from = self.angle_at(now);
        self.to = target;
        self.started = now;
        self.duration = duration;
    }

    /// Jump straight to `angle`, ending any animation.
    pub fn snap(&mut self, angle: f64) {
        self.from = angle;
        self.to = angle;
        self.duration = Duration::ZERO;
    }

    pub fn is_running(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.started) < self.duration
    }

    pub fn angle_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = now.saturating_duration_since(self.started).as_secs_f64()
            / self.duration.as_secs_f64();
        if t >= 1.0 {
            return self.to;
        }
        let (x1, y1, x2, y2) = EASE;
        self.from + (self.to - self.from) * cubic_bezier(x1, y1, x2, y2, t)
    }
}

impl Default for WheelMotion {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress along a CSS-style cubic bezier for time fraction `x`.
///
/// Solves x(s) = x by bisection (x is monotone when x1, x2 are in [0, 1])
/// and returns y(s).
pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let curve = |p1: f64, p2: f64, s: f64| {
        let u = 1.0 - s;
        3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
    };
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..48 {
        let mid = (lo + hi) / 2.0;
        if curve(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve(y1, y2, (lo + hi) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ease(x: f64) -> f64 {
        let (x1, y1, x2, y2) = EASE;
        cubic_bezier(x1, y1, x2, y2, x)
    }

    #[test]
    fn test_ease_endpoints_and_shape() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        // front-loaded: most of the travel happens in the first half
        assert!(ease(0.5) > 0.7);
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = ease(i as f64 / 100.0);
            assert!(y >= prev - 1e-9);
            prev = y;
        }
    }

    #[test]
    fn test_linear_control_points() {
        let y = cubic_bezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0, 0.3);
        assert!((y - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_motion_reaches_target() {
        let t0 = Instant::now();
        let mut m = WheelMotion::new();
        m.snap(135.0);
        m.start(1935.0, t0, Duration::from_secs(6));

        assert_eq!(m.angle_at(t0), 135.0);
        assert!(m.is_running(t0 + Duration::from_secs(3)));
        let mid = m.angle_at(t0 + Duration::from_secs(3));
        assert!(mid > 135.0 && mid < 1935.0);
        assert_eq!(m.angle_at(t0 + Duration::from_secs(6)), 1935.0);
        assert!(!m.is_running(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn test_snap_stops_animation() {
        let t0 = Instant::now();
        let mut m = WheelMotion::new();
        m.start(1800.0, t0, Duration::from_secs(6));
        m.snap(90.0);
        assert!(!m.is_running(t0 + Duration::from_secs(1)));
        assert_eq!(m.angle_at(t0 + Duration::from_secs(1)), 90.0);
    }
}
