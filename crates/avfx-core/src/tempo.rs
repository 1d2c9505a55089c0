//! Musical step lengths for tempo-driven sequencing.

/// Note division of one sequencer step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoteDivision {
    /// Quarter note (1 beat)
    Quarter,
    /// Eighth note (1/2 beat)
    #[default]
    Eighth,
    /// Sixteenth note (1/4 beat)
    Sixteenth,
    /// Thirty-second note (1/8 beat)
    ThirtySecond,
}

impl NoteDivision {
    /// Every division, longest first.
    pub const ALL: [NoteDivision; 4] = [
        NoteDivision::Quarter,
        NoteDivision::Eighth,
        NoteDivision::Sixteenth,
        NoteDivision::ThirtySecond,
    ];

    /// Number of beats this division represents.
    pub fn beats(self) -> f32 {
        match self {
            NoteDivision::Quarter => 1.0,
            NoteDivision::Eighth => 0.5,
            NoteDivision::Sixteenth => 0.25,
            NoteDivision::ThirtySecond => 0.125,
        }
    }

    /// Step length in milliseconds at `bpm`.
    ///
    /// ```rust
    /// use avfx_core::NoteDivision;
    ///
    /// assert!((NoteDivision::Quarter.to_ms(120.0) - 500.0).abs() < 0.1);
    /// assert!((NoteDivision::Eighth.to_ms(120.0) - 250.0).abs() < 0.1);
    /// ```
    pub fn to_ms(self, bpm: f32) -> f32 {
        self.beats() * 60000.0 / bpm.max(1.0)
    }

    /// Fraction label, e.g. `"1/16"`.
    pub const fn label(self) -> &'static str {
        match self {
            NoteDivision::Quarter => "1/4",
            NoteDivision::Eighth => "1/8",
            NoteDivision::Sixteenth => "1/16",
            NoteDivision::ThirtySecond => "1/32",
        }
    }

    /// Parse a fraction label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.label() == label.trim())
    }
}
