/// Time-driven visual transitions: counter roll-ups, the panel fade-in and
/// the Go button reveal.
///
/// Nothing here owns a clock. Callers pass `now` on every query, which keeps
/// the UI's frame loop in charge and makes every transition deterministic
/// under test.
use crate::error::Result;
use crate::format::{FormatKind, NumberLocale};
use crate::fragment::CounterSpec;
use std::time::{Duration, Instant};

/// Counter roll-up length.
pub const COUNT_DURATION: Duration = Duration::from_millis(1500);
/// Panel fade-in length.
pub const FADE_DURATION: Duration = Duration::from_millis(1000);
/// Go button inline-reveal length.
pub const REVEAL_DURATION: Duration = Duration::from_millis(50);

/// Ease-in-out curve (`0.5 - cos(p·π) / 2`), `p` clamped to 0 – 1.
pub fn swing(p: f64) -> f64 {
    0.5 - (p.clamp(0.0, 1.0) * std::f64::consts::PI).cos() / 2.0
}

/// Linear progress of a transition, 0.0 – 1.0.
fn progress(started: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(started).as_secs_f64();
    (elapsed / duration.as_secs_f64()).min(1.0)
}

/// Where a counter is in its one-shot animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    /// Showing the server-rendered start text.
    Idle,
    /// Interpolating toward the target.
    Animating,
    /// Showing the formatted target; static from here on.
    Done,
}

/// A counter element and its roll-up.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    spec: CounterSpec,
    start: f64,
    run: Option<(Instant, Duration)>,
}

impl CounterAnimation {
    /// Prepare a counter. The start value is the displayed text read as a
    /// number (group separators ignored), or 0 if it is not one.
    ///
    /// Fails if the target cannot be rendered in the counter's kind, so a
    /// bad counter is reported when the panel loads rather than mid-animation.
    pub fn new(spec: CounterSpec, locale: &NumberLocale) -> Result<Self> {
        spec.kind.format(spec.target, locale)?;
        let mut start = locale
            .strip_grouping(&spec.text)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        if spec.kind == FormatKind::Space && start < 0.0 {
            start = 0.0;
        }
        Ok(Self { spec, start, run: None })
    }

    /// Begin animating. A counter animates at most once; later calls are ignored.
    pub fn start(&mut self, now: Instant, duration: Duration) {
        if self.run.is_none() {
            self.run = Some((now, duration));
        }
    }

    pub fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    pub fn start_value(&self) -> f64 {
        self.start
    }

    pub fn phase(&self, now: Instant) -> CounterPhase {
        match self.run {
            None => CounterPhase::Idle,
            Some((started, duration)) if progress(started, duration, now) < 1.0 => {
                CounterPhase::Animating
            }
            Some(_) => CounterPhase::Done,
        }
    }

    /// Current numeric value.
    pub fn value(&self, now: Instant) -> f64 {
        match self.run {
            None => self.start,
            Some((started, duration)) => {
                let eased = swing(progress(started, duration, now));
                if eased >= 1.0 {
                    self.spec.target
                } else {
                    self.start + (self.spec.target - self.start) * eased
                }
            }
        }
    }

    /// Text to display at `now`.
    pub fn text(&self, now: Instant, locale: &NumberLocale) -> Result<String> {
        match self.phase(now) {
            CounterPhase::Idle => Ok(self.spec.text.clone()),
            CounterPhase::Animating | CounterPhase::Done => {
                self.spec.kind.format(self.value(now), locale)
            }
        }
    }
}

/// Opacity ramp from 0.0 to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct FadeIn {
    started: Instant,
    duration: Duration,
}

impl FadeIn {
    pub fn new(started: Instant, duration: Duration) -> Self {
        Self { started, duration }
    }

    pub fn opacity(&self, now: Instant) -> f32 {
        progress(self.started, self.duration, now) as f32
    }

    pub fn is_running(&self, now: Instant) -> bool {
        progress(self.started, self.duration, now) < 1.0
    }
}

/// Width reveal for an element that starts hidden.
///
/// Showing an already shown element does nothing, and there is no hide.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reveal {
    run: Option<(Instant, Duration)>,
}

impl Reveal {
    pub fn show(&mut self, now: Instant, duration: Duration) {
        if self.run.is_none() {
            self.run = Some((now, duration));
        }
    }

    /// Fraction of full width, 0.0 (hidden) to 1.0.
    pub fn width_fraction(&self, now: Instant) -> f32 {
        self.run
            .map_or(0.0, |(started, duration)| progress(started, duration, now) as f32)
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.run
            .is_some_and(|(started, duration)| progress(started, duration, now) < 1.0)
    }
}
