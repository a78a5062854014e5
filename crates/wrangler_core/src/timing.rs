//! Wall-clock helpers.
//!
//! Delays and fades are evaluated by reading the host clock on every draw;
//! nothing is scheduled.

/// Whether `delay` seconds have passed since `since`.
///
/// `None` means the timer was never started, which counts as elapsed.
#[must_use]
pub fn has_elapsed(since: Option<f64>, now: f64, delay: f64) -> bool {
    since.is_none_or(|start| now - start >= delay)
}

/// Linear opacity animation between two values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    start: f64,
    duration: f64,
}

impl Fade {
    /// A fade resting at `value`.
    #[must_use]
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
        }
    }

    /// Starts moving toward `target` from wherever the fade is at `now`.
    pub fn retarget(&mut self, target: f32, now: f64, duration: f64) {
        self.from = self.value(now);
        self.to = target;
        self.start = now;
        self.duration = duration;
    }

    #[must_use]
    pub fn value(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * t
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[must_use]
    pub fn is_animating(&self, now: f64) -> bool {
        self.duration > 0.0 && now - self.start < self.duration
    }
}
