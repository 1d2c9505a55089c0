//! Property-based tests for the avfx audio nodes.
//!
//! Finite output for any settings, bypass identities, and bounded output
//! where the node's math guarantees it.

use avfx_core::{Effect, Waveform};
use avfx_effects::{Bitcrusher, Chorus, FeedbackDelay, Gate, PitchShifter, RingMod, ThreeBandEq};
use proptest::prelude::*;

fn build(kind: usize, params: &[f32; 6]) -> Box<dyn Effect> {
    let sr = 48000.0;
    match kind % 7 {
        0 => {
            let mut ring = RingMod::new(sr);
            ring.set_frequency(1.0 + params[0] * 1999.0);
            ring.set_mix(params[1]);
            ring.set_waveform(Waveform::ALL[(params[2] * 4.99) as usize]);
            Box::new(ring)
        }
        1 => {
            let mut crush = Bitcrusher::new(sr);
            crush.set_bits(1 + (params[0] * 15.0) as u8);
            Box::new(crush)
        }
        2 => {
            let mut delay = FeedbackDelay::new(sr);
            delay.set_delay_seconds(params[0]);
            delay.set_feedback(params[1]);
            Box::new(delay)
        }
        3 => {
            let mut chorus = Chorus::new(sr);
            chorus.set_rate(0.05 + params[0] * 1.95);
            chorus.set_base_delay_ms(2.0 + params[1] * 23.0);
            chorus.set_depth(params[2]);
            chorus.set_mix(params[3]);
            Box::new(chorus)
        }
        4 => {
            let mut eq = ThreeBandEq::new(sr);
            eq.set_gains(
                params[0] * 48.0 - 24.0,
                params[1] * 48.0 - 24.0,
                params[2] * 48.0 - 24.0,
            );
            Box::new(eq)
        }
        5 => {
            let mut gate = Gate::new(sr);
            gate.set_threshold_db(-100.0 * params[0]);
            gate.set_release_sec(params[1] * 2.0);
            Box::new(gate)
        }
        _ => {
            let semis = (params[0] * 48.0) as i32 - 24;
            Box::new(PitchShifter::try_new(sr, semis).unwrap())
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every node produces finite output for any in-range settings.
    #[test]
    fn all_nodes_finite_output(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        params in prop::array::uniform6(0.0f32..=1.0f32),
        kind in 0usize..7,
    ) {
        let mut effect = build(kind, &params);
        for _ in 0..64 {
            effect.process(0.0);
        }
        for &sample in &input {
            let out = effect.process(sample);
            prop_assert!(out.is_finite(), "node {} produced {}", kind, out);
        }
    }

    /// A ring modulator at zero mix passes the input through unchanged.
    #[test]
    fn ring_mod_zero_mix_identity(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        freq in 1.0f32..2000.0f32,
        wave in 0usize..5,
    ) {
        let mut ring = RingMod::new(48000.0);
        ring.set_frequency(freq);
        ring.set_waveform(Waveform::ALL[wave]);
        for &x in &input {
            prop_assert_eq!(ring.process(x), x);
        }
    }

    /// Ring modulation never amplifies.
    #[test]
    fn ring_mod_never_amplifies(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        mix in 0.0f32..=1.0f32,
        wave in 0usize..5,
    ) {
        let mut ring = RingMod::new(48000.0);
        ring.set_mix(mix);
        ring.set_waveform(Waveform::ALL[wave]);
        ring.reset();
        for &x in &input {
            prop_assert!(ring.process(x).abs() <= x.abs() + 1e-6);
        }
    }

    /// Quantized output lies on the bit grid.
    #[test]
    fn bitcrusher_on_grid(x in -1.0f32..=1.0f32, bits in 1u8..=16) {
        let mut crush = Bitcrusher::new(48000.0);
        crush.set_bits(bits);
        let y = crush.process(x);
        let step = 0.5f32.powi(i32::from(bits) - 1);
        let k = y / step;
        prop_assert!((k - k.round()).abs() < 1e-3);
        prop_assert!((y - x).abs() <= step * 0.5 + 1e-6);
    }

    /// The gate never amplifies.
    #[test]
    fn gate_never_amplifies(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        threshold in -100.0f32..=0.0f32,
    ) {
        let mut gate = Gate::new(48000.0);
        gate.set_threshold_db(threshold);
        for &x in &input {
            prop_assert!(gate.process(x).abs() <= x.abs());
        }
    }
}
