//! avfx Core - DSP primitives for the audio side of the engine
//!
//! This crate provides the building blocks the audio graph is assembled from,
//! designed for real-time processing with zero allocation in the audio path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for every audio node
//!
//! ## Parameter Smoothing
//!
//! Zipper-free parameter changes for click-free automation:
//!
//! - [`SmoothedParam`] - Exponential smoothing (RC-like response)
//! - [`LinearSmoothedParam`] - Linear ramps (constant rate), used for fades
//!
//! ## Parameter Metadata
//!
//! - [`ParamDescriptor`] - Range, default, unit and scaling of a parameter
//!
//! ## Filters and Delay Lines
//!
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//! - [`InterpolatedDelay`] - Variable-length delay with linear interpolation
//!
//! ## Modulation & Dynamics
//!
//! - [`Lfo`] - Phase-accumulating oscillator over the shared [`Waveform`] set
//! - [`EnvelopeFollower`] - Amplitude envelope detection
//! - [`NoteDivision`] - Musical step lengths for tempo-driven sequencing
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`semitones_to_ratio`], etc.
//! - [`Lcg`] - Allocation-free deterministic pseudo-random source
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! avfx-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod delay;
pub mod effect;
pub mod envelope;
pub mod lfo;
pub mod math;
pub mod param;
pub mod param_info;
pub mod rng;
pub mod tempo;

// Re-export main types at crate root
pub use biquad::{
    Biquad, Coefficients, high_shelf_coefficients, low_shelf_coefficients,
    peaking_eq_coefficients,
};
pub use delay::InterpolatedDelay;
pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use lfo::{Lfo, Waveform};
pub use math::{
    clamp01, db_to_linear, flush_denormal, lerp, linear_to_db, ms_to_samples, semitones_to_ratio,
    wet_dry_mix,
};
pub use param::{LinearSmoothedParam, PARAM_RAMP_MS, SmoothedParam};
pub use param_info::{ParamDescriptor, ParamScale, ParamUnit};
pub use rng::Lcg;
pub use tempo::NoteDivision;
