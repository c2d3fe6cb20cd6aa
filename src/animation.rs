//! Animation controller: advances arc progress over time.
//!
//! Time only moves when the host calls [`AnimationController::advance`];
//! each tracker that changes during an advance yields one [`Redraw`].

use std::f64::consts::PI;
use std::time::Duration;

use crate::config::AnimationMode;

/// Length of the single synchronized sweep.
pub const SYNCHRONIZED_DURATION: Duration = Duration::from_millis(1500);
/// Length of each staggered segment sweep, and the delay between them.
pub const STAGGER_STEP: Duration = Duration::from_millis(300);

/// Slow start, fast middle, slow end.
pub fn accelerate_decelerate(t: f64) -> f64 {
    ((t + 1.0) * PI).cos() / 2.0 + 0.5
}

/// Request to repaint, tagged with the animation generation that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redraw {
    pub generation: u64,
}

/// Read-only view of the current progress values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress<'a> {
    /// Whole ring sweeps and rotates together.
    Synchronized(f64),
    /// One value per segment.
    Staggered(&'a [f64]),
}

impl Progress<'_> {
    /// Progress of the given segment.
    pub fn for_segment(&self, index: usize) -> f64 {
        match self {
            Progress::Synchronized(p) => *p,
            Progress::Staggered(values) => values.get(index).copied().unwrap_or(0.0),
        }
    }

    /// Extra rotation applied to every start angle, in degrees.
    pub fn rotation(&self) -> f64 {
        match self {
            Progress::Synchronized(p) => 360.0 * p,
            Progress::Staggered(_) => 0.0,
        }
    }
}

/// One eased 0→1 value that starts after a delay.
#[derive(Debug, Clone)]
struct Tracker {
    delay: Duration,
    duration: Duration,
    finished: bool,
}

impl Tracker {
    fn new(delay: Duration, duration: Duration) -> Self {
        Self {
            delay,
            duration,
            finished: false,
        }
    }

    fn started(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay
    }

    fn value_at(&self, elapsed: Duration) -> f64 {
        if !self.started(elapsed) {
            return 0.0;
        }
        let local = (elapsed - self.delay).as_secs_f64() / self.duration.as_secs_f64();
        accelerate_decelerate(local.clamp(0.0, 1.0))
    }
}

/// Owns progress state for one widget.
///
/// Restarting discards every tracker of the previous generation before new
/// ones exist, so two generations never write the same progress values.
#[derive(Debug, Clone)]
pub struct AnimationController {
    mode: AnimationMode,
    generation: u64,
    elapsed: Duration,
    trackers: Vec<Tracker>,
    values: Vec<f64>,
}

impl AnimationController {
    pub fn new(mode: AnimationMode) -> Self {
        Self {
            mode,
            generation: 0,
            elapsed: Duration::ZERO,
            trackers: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Generation of the trackers currently armed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel everything in flight, zero all progress and arm fresh trackers
    /// for `segments` segments.
    pub fn restart(&mut self, segments: usize) -> Redraw {
        self.trackers.clear();
        self.values.clear();
        self.generation += 1;
        self.elapsed = Duration::ZERO;

        match self.mode {
            AnimationMode::Synchronized => {
                self.trackers
                    .push(Tracker::new(Duration::ZERO, SYNCHRONIZED_DURATION));
            }
            AnimationMode::Staggered => {
                self.trackers.extend(
                    (0..segments).map(|i| Tracker::new(STAGGER_STEP * i as u32, STAGGER_STEP)),
                );
            }
        }
        self.values.resize(self.trackers.len(), 0.0);

        tracing::debug!(
            generation = self.generation,
            mode = ?self.mode,
            trackers = self.trackers.len(),
            "animation restarted"
        );
        Redraw {
            generation: self.generation,
        }
    }

    /// Move time forward and update every tracker that is running.
    pub fn advance(&mut self, dt: Duration) -> Vec<Redraw> {
        self.elapsed += dt;
        let elapsed = self.elapsed;
        let generation = self.generation;
        let mut redraws = Vec::new();

        for (tracker, value) in self.trackers.iter_mut().zip(self.values.iter_mut()) {
            if tracker.finished || !tracker.started(elapsed) {
                continue;
            }
            *value = tracker.value_at(elapsed);
            tracker.finished = elapsed >= tracker.delay + tracker.duration;
            redraws.push(Redraw { generation });
        }

        if !redraws.is_empty() {
            tracing::trace!(
                generation,
                elapsed_ms = elapsed.as_millis() as u64,
                ticks = redraws.len(),
                "animation tick"
            );
        }
        redraws
    }

    /// Jump to an absolute time since the last restart.
    pub fn seek(&mut self, elapsed: Duration) -> Vec<Redraw> {
        let dt = elapsed.saturating_sub(self.elapsed);
        self.advance(dt)
    }

    /// True while any tracker still has progress to make.
    pub fn is_running(&self) -> bool {
        self.trackers.iter().any(|tracker| !tracker.finished)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn progress(&self) -> Progress<'_> {
        match self.mode {
            AnimationMode::Synchronized => {
                Progress::Synchronized(self.values.first().copied().unwrap_or(0.0))
            }
            AnimationMode::Staggered => Progress::Staggered(&self.values),
        }
    }
}
