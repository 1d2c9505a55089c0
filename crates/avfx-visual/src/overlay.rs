//! Additive colour overlay for the harmonizer voices.

use core::f32::consts::PI;

use avfx_core::semitones_to_ratio;

use crate::frame::{Frame, to_u8};

/// Colour of each voice slot: red, green, blue.
pub const VOICE_COLOURS: [[f32; 3]; 3] = [[255.0, 0.0, 0.0], [0.0, 255.0, 0.0], [0.0, 0.0, 255.0]];

/// One active voice as the overlay sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayVoice {
    /// Pitch offset; sets the pattern's spatial frequency `2^(s/12)`.
    pub semitones: i32,
    /// Pattern strength (0..1).
    pub mix: f32,
}

/// Add each voice's oscillating colour pattern to the frame.
///
/// `voices[k]` uses [`VOICE_COLOURS`]`[k]`; `None` and zero-mix slots add
/// nothing, and slots past the third are ignored. For pixel `n`:
///
/// ```text
/// amp = (sin(n · 0.0001 · ratio + phase · 2π) · 0.5 + 0.5) · mix
/// phase = fract(time · ratio)
/// ```
///
/// Channels saturate at 255; alpha passes through.
pub fn harmonizer_overlay(img: &Frame, voices: &[Option<OverlayVoice>], time: f32) -> Frame {
    let time = if time.is_finite() { time } else { 0.0 };
    let active: Vec<([f32; 3], f32, f32, f32)> = voices
        .iter()
        .zip(VOICE_COLOURS)
        .filter_map(|(voice, colour)| {
            let voice = (*voice)?;
            if voice.mix.is_nan() || voice.mix <= 0.0 {
                return None;
            }
            let ratio = semitones_to_ratio(voice.semitones as f32);
            let phase = (time * ratio).rem_euclid(1.0);
            Some((colour, ratio, phase * 2.0 * PI, voice.mix.min(1.0)))
        })
        .collect();
    if active.is_empty() {
        return img.clone();
    }

    let mut out = img.blank_like();
    for (n, (o, p)) in out
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(img.pixels().chunks_exact(4))
        .enumerate()
    {
        let mut add = [0.0f32; 3];
        for &(colour, ratio, phase, mix) in &active {
            let amp = ((n as f32 * 0.0001 * ratio + phase).sin() * 0.5 + 0.5) * mix;
            for c in 0..3 {
                add[c] += colour[c] * amp;
            }
        }
        for c in 0..3 {
            o[c] = to_u8(f32::from(p[c]) + add[c]);
        }
        o[3] = p[3];
    }
    out
}
