//! Parameter metadata: ranges, defaults, units and normalization.
//!
//! A [`ParamDescriptor`] is the declared contract of one named control: what
//! range it lives in, what it starts at, and how it should be displayed. The
//! parameter store clamps every assignment through [`ParamDescriptor::clamp`],
//! so an out-of-range value is never an error, only a clamped write.
//!
//! # Example
//!
//! ```rust
//! use avfx_core::{ParamDescriptor, ParamUnit};
//!
//! let volume = ParamDescriptor::gain_db("Volume", "Vol", -60.0, 0.0, -20.0)
//!     .with_string_id("volume");
//!
//! assert_eq!(volume.clamp(12.0), 0.0);
//! assert_eq!(volume.unit, ParamUnit::Decibels);
//! assert_eq!(volume.format_value(-6.0), "-6.0 dB");
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, string::String};

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`, requires `min > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Used for frequency-like parameters.
    Logarithmic,
}

/// Unit of a parameter value, used for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Decibels (dB)
    Decibels,
    /// Hertz (Hz)
    Hertz,
    /// Milliseconds (ms)
    Milliseconds,
    /// Seconds (s)
    Seconds,
    /// Pixels (px)
    Pixels,
    /// Dimensionless factor, usually a 0..1 amount
    #[default]
    None,
}

impl ParamUnit {
    /// Display suffix for this unit (empty for [`ParamUnit::None`]).
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Seconds => " s",
            ParamUnit::Pixels => " px",
            ParamUnit::None => "",
        }
    }
}

/// Declared range and presentation of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Carrier Frequency").
    pub name: &'static str,

    /// Short name for compact displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value at initialization.
    pub default: f32,

    /// Recommended step increment. `1.0` marks an integer-valued parameter.
    pub step: f32,

    /// Stable string id used by scene files and the command line
    /// (e.g. `"ring_freq"`).
    pub string_id: &'static str,

    /// Normalization curve.
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Generic descriptor with an explicit range and default.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// A 0..1 amount (mix, depth, intensity).
    pub const fn amount(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::custom(name, short_name, 0.0, 1.0, default)
    }

    /// A gain in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, min, max, default)
            .with_unit(ParamUnit::Decibels)
            .with_step(0.5)
    }

    /// Set the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Set the normalization curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Set the stable string id.
    pub const fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.string_id = string_id;
        self
    }

    /// Whether values are integers (step of exactly 1).
    pub fn is_stepped(&self) -> bool {
        self.step == 1.0
    }

    /// Clamp a value into `[min, max]`.
    ///
    /// Non-finite input maps to the default so a NaN can never reach a
    /// pipeline.
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            if value == f32::INFINITY {
                return self.max;
            }
            if value == f32::NEG_INFINITY {
                return self.min;
            }
            return self.default;
        }
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to the normalized range 0.0..=1.0.
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return (value - self.min) / range;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value back to the plain range.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min + normalized * (self.max - self.min);
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }

    /// Format a value with its unit, e.g. `"440.0 Hz"`.
    pub fn format_value(&self, value: f32) -> String {
        if self.is_stepped() {
            format!("{}{}", libm::roundf(value) as i32, self.unit.suffix())
        } else {
            format!("{:.1}{}", value, self.unit.suffix())
        }
    }
}
