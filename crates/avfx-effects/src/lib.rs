//! avfx Effects - the audio nodes of the avfx audio graph
//!
//! Every node implements [`avfx_core::Effect`] and ramps its parameters
//! through [`avfx_core::SmoothedParam`], so retargeting from the parameter
//! store never produces a step discontinuity.
//!
//! - [`RingMod`] - Amplitude modulation by a carrier oscillator, cross-faded with dry
//! - [`Bitcrusher`] - Bit depth reduction
//! - [`FeedbackDelay`] - Delay line with a feedback tap
//! - [`Chorus`] - Two-voice modulated delay ("warp")
//! - [`ThreeBandEq`] - Low shelf, peaking mid, high shelf
//! - [`Gate`] - Level-detecting noise gate with metering
//! - [`PitchShifter`] - Crossfaded two-tap delay-line pitch shifter
//!
//! ## Example
//!
//! ```rust
//! use avfx_core::Effect;
//! use avfx_effects::{Bitcrusher, FeedbackDelay};
//!
//! let mut crush = Bitcrusher::new(48000.0);
//! crush.set_bits(4);
//! let mut delay = FeedbackDelay::new(48000.0);
//! delay.set_feedback(0.4);
//!
//! let out = delay.process(crush.process(0.3));
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bitcrusher;
pub mod chorus;
pub mod delay;
pub mod eq;
pub mod gate;
pub mod pitch_shift;
pub mod ring_mod;

// Re-export main types at crate root
pub use bitcrusher::Bitcrusher;
pub use chorus::Chorus;
pub use delay::FeedbackDelay;
pub use eq::ThreeBandEq;
pub use gate::{Gate, GateState};
pub use pitch_shift::{PitchShiftError, PitchShifter};
pub use ring_mod::RingMod;
