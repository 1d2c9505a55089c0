//! Harmonizer step sequencer.
//!
//! One row of cells per voice slot. On each step the playhead moves to
//! `(step + 1) % length` and every enabled cell in the rows currently in
//! play writes its semitone offset into that voice.

use avfx_core::NoteDivision;

use crate::params::{MAX_VOICE_SEMITONES, ParamStore, VOICE_SLOTS};

/// Longest pattern.
pub const MAX_STEPS: usize = 64;

/// Tempo bounds in BPM.
pub const BPM_RANGE: (f32, f32) = (20.0, 300.0);

const DEFAULT_LENGTH: usize = 16;
const DEFAULT_BPM: f32 = 120.0;

/// One sequencer cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCell {
    /// Cell fires when reached
    pub enabled: bool,
    /// Offset written to the voice, -24..24
    pub semitones: i32,
}

impl StepCell {
    /// Enabled cell at `semitones` (clamped).
    pub fn on(semitones: i32) -> Self {
        Self {
            enabled: true,
            semitones: semitones.clamp(-MAX_VOICE_SEMITONES, MAX_VOICE_SEMITONES),
        }
    }
}

/// Tempo-driven pattern of voice retunings.
///
/// # Example
///
/// ```rust
/// use avfx_engine::{ParamStore, StepCell, StepSequencer};
///
/// let mut seq = StepSequencer::new();
/// seq.set_cell(0, 1, StepCell::on(5));
/// seq.play(0.0);
///
/// let mut store = ParamStore::new();
/// // 120 BPM eighths: one step every 250 ms
/// assert_eq!(seq.advance(250.0, &mut store), 1);
/// assert_eq!(seq.current_step(), 1);
/// assert_eq!(store.voice(0).unwrap().semitones, 5);
/// ```
#[derive(Debug, Clone)]
pub struct StepSequencer {
    rows: [[StepCell; MAX_STEPS]; VOICE_SLOTS],
    bpm: f32,
    division: NoteDivision,
    length: usize,
    step: usize,
    playing: bool,
    last_step_ms: f64,
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepSequencer {
    /// Empty 16-step pattern at 120 BPM in eighths, stopped.
    pub fn new() -> Self {
        Self {
            rows: [[StepCell::default(); MAX_STEPS]; VOICE_SLOTS],
            bpm: DEFAULT_BPM,
            division: NoteDivision::Eighth,
            length: DEFAULT_LENGTH,
            step: 0,
            playing: false,
            last_step_ms: 0.0,
        }
    }

    /// Tempo, clamped to 20..300 BPM.
    pub fn set_bpm(&mut self, bpm: f32) {
        if bpm.is_finite() {
            self.bpm = bpm.clamp(BPM_RANGE.0, BPM_RANGE.1);
        }
    }

    /// Tempo in BPM.
    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Step division.
    pub fn set_division(&mut self, division: NoteDivision) {
        self.division = division;
    }

    /// Step division.
    pub fn division(&self) -> NoteDivision {
        self.division
    }

    /// Pattern length, clamped to 1..64. The playhead wraps into range.
    pub fn set_length(&mut self, length: usize) {
        self.length = length.clamp(1, MAX_STEPS);
        self.step %= self.length;
    }

    /// Pattern length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Step length in milliseconds.
    pub fn step_ms(&self) -> f64 {
        f64::from(self.division.to_ms(self.bpm))
    }

    /// Replace one cell. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, row: usize, step: usize, cell: StepCell) {
        if let Some(slot) = self.rows.get_mut(row).and_then(|r| r.get_mut(step)) {
            *slot = StepCell {
                enabled: cell.enabled,
                semitones: cell
                    .semitones
                    .clamp(-MAX_VOICE_SEMITONES, MAX_VOICE_SEMITONES),
            };
        }
    }

    /// Cell at `row`, `step`.
    pub fn cell(&self, row: usize, step: usize) -> Option<StepCell> {
        self.rows.get(row).and_then(|r| r.get(step)).copied()
    }

    /// Playhead position.
    pub fn current_step(&self) -> usize {
        self.step
    }

    /// Start the clock at `now_ms`. A non-finite time leaves it stopped.
    pub fn play(&mut self, now_ms: f64) {
        if !now_ms.is_finite() {
            return;
        }
        self.playing = true;
        self.last_step_ms = now_ms;
    }

    /// Stop the clock. The playhead stays where it is.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Clock running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fire every step due by `now_ms`; returns how many fired.
    ///
    /// After a long gap only the last pattern's worth of steps is replayed,
    /// which leaves the voices exactly where a continuous run would.
    pub fn advance(&mut self, now_ms: f64, store: &mut ParamStore) -> usize {
        if !self.playing || !now_ms.is_finite() {
            return 0;
        }
        let step_ms = self.step_ms();
        let due = ((now_ms - self.last_step_ms) / step_ms).floor();
        if due < 1.0 {
            return 0;
        }
        self.last_step_ms += due * step_ms;

        let due = due as usize;
        let replayed = due.min(self.length);
        self.step = (self.step + due - replayed) % self.length;

        let rows = store.snapshot().voice_count();
        for _ in 0..replayed {
            self.step = (self.step + 1) % self.length;
            for (row, cells) in self.rows.iter().enumerate().take(rows) {
                let cell = cells[self.step];
                if cell.enabled {
                    store.set_voice_semitones(row, cell.semitones);
                }
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamId;

    #[test]
    fn test_stopped_does_nothing() {
        let mut seq = StepSequencer::new();
        seq.set_cell(0, 1, StepCell::on(3));
        let mut store = ParamStore::new();
        assert_eq!(seq.advance(10_000.0, &mut store), 0);
        assert_eq!(store.voice(0).map(|v| v.semitones), Some(7));
    }

    #[test]
    fn test_wraps_at_length() {
        let mut seq = StepSequencer::new();
        seq.set_length(4);
        seq.set_division(NoteDivision::Quarter);
        seq.play(0.0);
        let mut store = ParamStore::new();
        for i in 1..=5 {
            seq.advance(f64::from(i) * 500.0, &mut store);
        }
        assert_eq!(seq.current_step(), 1);
    }

    #[test]
    fn test_only_rows_in_play_fire() {
        let mut seq = StepSequencer::new();
        seq.set_cell(0, 1, StepCell::on(-3));
        seq.set_cell(1, 1, StepCell::on(4));
        seq.play(0.0);
        let mut store = ParamStore::new();
        seq.advance(250.0, &mut store);
        assert_eq!(store.voice(0).map(|v| v.semitones), Some(-3));
        assert_eq!(store.voice(1).map(|v| v.semitones), Some(12));

        store.set(ParamId::VoiceCount, 2.0);
        seq.set_cell(1, 2, StepCell::on(4));
        seq.advance(500.0, &mut store);
        assert_eq!(store.voice(1).map(|v| v.semitones), Some(4));
    }

    #[test]
    fn test_non_finite_time_is_ignored() {
        let mut seq = StepSequencer::new();
        seq.set_cell(0, 2, StepCell::on(5));
        seq.play(f64::NAN);
        assert!(!seq.is_playing());

        seq.play(0.0);
        let mut store = ParamStore::new();
        assert_eq!(seq.advance(f64::NAN, &mut store), 0);
        assert_eq!(seq.advance(f64::INFINITY, &mut store), 0);
        assert_eq!(seq.advance(500.0, &mut store), 2);
        assert_eq!(store.voice(0).map(|v| v.semitones), Some(5));
    }

    #[test]
    fn test_long_gap_matches_continuous_run() {
        let mut pattern = StepSequencer::new();
        pattern.set_length(5);
        for step in 0..5 {
            pattern.set_cell(0, step, StepCell::on(step as i32 * 2));
        }

        let mut stepwise = pattern.clone();
        let mut jumped = pattern;
        stepwise.play(0.0);
        jumped.play(0.0);

        let mut a = ParamStore::new();
        let mut b = ParamStore::new();
        for i in 1..=37 {
            stepwise.advance(f64::from(i) * 250.0, &mut a);
        }
        assert_eq!(jumped.advance(37.0 * 250.0, &mut b), 37);
        assert_eq!(stepwise.current_step(), jumped.current_step());
        assert_eq!(a.voice(0), b.voice(0));
    }

    #[test]
    fn test_setters_clamp() {
        let mut seq = StepSequencer::new();
        seq.set_bpm(1000.0);
        seq.set_length(0);
        seq.set_cell(0, 0, StepCell { enabled: true, semitones: 60 });
        seq.set_cell(5, 0, StepCell::on(1));
        assert_eq!(seq.bpm(), 300.0);
        assert_eq!(seq.length(), 1);
        assert_eq!(seq.cell(0, 0).map(|c| c.semitones), Some(24));
        assert_eq!(seq.cell(5, 0), None);
    }
}
