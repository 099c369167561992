//! Rendered opacity of the button.
//!
//! The widget flips its inline opacity between 0 and 1. The terminal eases
//! the rendered value toward that target, which is what the widget's
//! deferred hide waits for.

use std::time::Duration;

use backtop::transitions::lerp;
use backtop::TransitionConfig;

#[derive(Debug, Clone)]
pub struct Fade {
    config: TransitionConfig,
    from: f32,
    target: f32,
    elapsed: Duration,
    value: f32,
}

impl Fade {
    pub fn new(config: TransitionConfig, initial: f32) -> Self {
        Self {
            config,
            from: initial,
            target: initial,
            elapsed: Duration::ZERO,
            value: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_active(&self) -> bool {
        self.value != self.target
    }

    /// Start easing toward `target` from wherever the fade currently is.
    pub fn retarget(&mut self, target: f32) {
        if target == self.target {
            return;
        }
        self.from = self.value;
        self.target = target;
        self.elapsed = Duration::ZERO;
    }

    /// Jump straight to `value`, dropping any transition in progress.
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.target = value;
        self.value = value;
        self.elapsed = Duration::ZERO;
    }

    pub fn tick(&mut self, dt: Duration) {
        if !self.is_active() {
            return;
        }
        self.elapsed += dt;
        let progress = self.config.progress(self.elapsed);
        self.value = if progress >= 1.0 {
            self.target
        } else {
            lerp(self.from, self.target, progress)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backtop::Easing;

    fn fade() -> Fade {
        Fade::new(
            TransitionConfig::new(Duration::from_millis(300), Easing::Linear),
            0.0,
        )
    }

    #[test]
    fn test_fade_in_reaches_target() {
        let mut f = fade();
        f.retarget(1.0);
        assert!(f.is_active());

        f.tick(Duration::from_millis(150));
        assert!((f.value() - 0.5).abs() < 0.01);

        f.tick(Duration::from_millis(150));
        assert_eq!(f.value(), 1.0);
        assert!(!f.is_active());
    }

    #[test]
    fn test_retarget_midway_starts_from_current_value() {
        let mut f = fade();
        f.retarget(1.0);
        f.tick(Duration::from_millis(150));

        f.retarget(0.0);
        f.tick(Duration::from_millis(150));
        assert!((f.value() - 0.25).abs() < 0.01);
    }

    #[test]
    fn test_snap_stops_transition() {
        let mut f = fade();
        f.retarget(1.0);
        f.snap(0.0);
        assert!(!f.is_active());
        assert_eq!(f.value(), 0.0);
    }
}
