//! Tick rate limiting and offline export framing.
//!
//! The scheduler never reads a clock. The driver passes `now` in
//! milliseconds, so a headless run is as deterministic as its timestamps.

/// Default minimum spacing between visual ticks, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: f64 = 250.0;

/// Export duration bounds in seconds.
pub const EXPORT_DURATION_RANGE: (f32, f32) = (1.0, 600.0);

/// Export frame rate bounds.
pub const EXPORT_FPS_RANGE: (u32, u32) = (1, 60);

/// Rate limiter for visual ticks.
///
/// # Example
///
/// ```rust
/// use avfx_engine::RenderScheduler;
///
/// let mut scheduler = RenderScheduler::new(250.0);
/// assert!(scheduler.should_run(0.0));
/// assert!(!scheduler.should_run(100.0));
/// assert!(scheduler.should_run(251.0));
/// ```
#[derive(Debug, Clone)]
pub struct RenderScheduler {
    min_interval_ms: f64,
    last_tick_ms: Option<f64>,
    ticks: u64,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(MIN_TICK_INTERVAL_MS)
    }
}

impl RenderScheduler {
    /// Scheduler enforcing `min_interval_ms` between ticks.
    pub fn new(min_interval_ms: f64) -> Self {
        let min_interval_ms = if min_interval_ms.is_finite() {
            min_interval_ms.max(0.0)
        } else {
            MIN_TICK_INTERVAL_MS
        };
        Self {
            min_interval_ms,
            last_tick_ms: None,
            ticks: 0,
        }
    }

    /// Minimum spacing between ticks.
    pub fn min_interval_ms(&self) -> f64 {
        self.min_interval_ms
    }

    /// Whether a tick is due at `now_ms`. A due tick is recorded.
    ///
    /// The first call always runs; after that a tick runs once more than
    /// the minimum interval has passed.
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        let due = match self.last_tick_ms {
            None => true,
            Some(last) => now_ms - last > self.min_interval_ms,
        };
        if due {
            self.last_tick_ms = Some(now_ms);
            self.ticks += 1;
        }
        due
    }

    /// Ticks granted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forget the last tick so the next call runs immediately.
    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }
}

/// Offline export framing: one virtual time per frame.
///
/// # Example
///
/// ```rust
/// use avfx_engine::ExportPlan;
///
/// let plan = ExportPlan::new(2.5, 4);
/// assert_eq!(plan.frame_count(), 10);
/// let times: Vec<f64> = plan.frame_times().collect();
/// assert_eq!(times[0], 0.0);
/// assert_eq!(times[9], 2.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportPlan {
    duration_sec: f32,
    fps: u32,
}

impl ExportPlan {
    /// Plan for `duration_sec` (1..600) at `fps` (1..60).
    pub fn new(duration_sec: f32, fps: u32) -> Self {
        let (lo, hi) = EXPORT_DURATION_RANGE;
        let duration_sec = if duration_sec.is_finite() {
            duration_sec.clamp(lo, hi)
        } else {
            lo
        };
        Self {
            duration_sec,
            fps: fps.clamp(EXPORT_FPS_RANGE.0, EXPORT_FPS_RANGE.1),
        }
    }

    /// Clamped duration.
    pub fn duration_sec(&self) -> f32 {
        self.duration_sec
    }

    /// Clamped frame rate.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// `max(1, floor(duration · fps))`.
    pub fn frame_count(&self) -> usize {
        ((f64::from(self.duration_sec) * f64::from(self.fps)).floor() as usize).max(1)
    }

    /// `index / fps` for every frame.
    pub fn frame_times(&self) -> impl Iterator<Item = f64> + use<> {
        let fps = f64::from(self.fps);
        (0..self.frame_count()).map(move |i| i as f64 / fps)
    }
}
