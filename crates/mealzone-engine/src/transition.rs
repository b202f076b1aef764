//! Timed opacity interpolation.
//!
//! Time is passed in explicitly as the elapsed [`Duration`] since the chart
//! was created, so transitions are deterministic and host-agnostic.

use std::time::Duration;

/// Easing curve applied to the normalised transition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Symmetric cubic ease in/out.
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply the curve to `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// An opacity animation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityTransition {
    pub from: f64,
    pub to: f64,
    pub started_at: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl OpacityTransition {
    /// Interpolated value at `now`.
    pub fn value_at(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = self.easing.apply(t);
        self.from + (self.to - self.from) * eased
    }

    /// Whether the transition has reached its end value at `now`.
    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }
}

/// A value that fades between opacities, supporting interruption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fader {
    resting: f64,
    active: Option<OpacityTransition>,
    duration: Duration,
    easing: Easing,
}

impl Fader {
    /// A fader resting at `initial`.
    pub fn new(initial: f64, duration: Duration) -> Self {
        Self {
            resting: initial,
            active: None,
            duration,
            easing: Easing::default(),
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Current value at `now`.
    pub fn value(&self, now: Duration) -> f64 {
        self.active.map_or(self.resting, |t| t.value_at(now))
    }

    /// Start fading to `target`. A running transition is superseded and
    /// the new one starts from its current value.
    pub fn fade_to(&mut self, target: f64, now: Duration) {
        let from = self.value(now);
        self.resting = target;
        self.active = Some(OpacityTransition {
            from,
            to: target,
            started_at: now,
            duration: self.duration,
            easing: self.easing,
        });
    }

    /// Whether a transition is still running at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.active.is_some_and(|t| !t.is_finished(now))
    }

    /// Value the fader settles at.
    pub fn target(&self) -> f64 {
        self.resting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::CubicInOut] {
            assert!(easing.apply(0.0).abs() < 1e-12);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-12);
        }
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
        assert!(Easing::CubicInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn test_transition_progress() {
        let t = OpacityTransition {
            from: 0.0,
            to: 1.0,
            started_at: ms(100),
            duration: ms(200),
            easing: Easing::Linear,
        };
        assert!(t.value_at(ms(0)).abs() < 1e-12);
        assert!((t.value_at(ms(200)) - 0.5).abs() < 1e-12);
        assert!((t.value_at(ms(300)) - 1.0).abs() < 1e-12);
        assert!((t.value_at(ms(10_000)) - 1.0).abs() < 1e-12);
        assert!(!t.is_finished(ms(299)));
        assert!(t.is_finished(ms(300)));
    }

    #[test]
    fn test_fader_interruption_starts_from_current_value() {
        let mut fader = Fader::new(0.0, ms(200)).with_easing(Easing::Linear);
        fader.fade_to(1.0, ms(0));
        assert!((fader.value(ms(100)) - 0.5).abs() < 1e-12);

        fader.fade_to(0.0, ms(100));
        assert!((fader.value(ms(100)) - 0.5).abs() < 1e-12);
        assert!((fader.value(ms(200)) - 0.25).abs() < 1e-12);
        assert!(fader.value(ms(300)).abs() < 1e-12);
        assert!(!fader.is_animating(ms(300)));
        assert!(fader.target().abs() < 1e-12);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut fader = Fader::new(0.0, Duration::ZERO);
        fader.fade_to(1.0, ms(5));
        assert!((fader.value(ms(5)) - 1.0).abs() < 1e-12);
        assert!(!fader.is_animating(ms(5)));
    }
}
