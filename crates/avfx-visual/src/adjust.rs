//! Global tone adjustment: contrast, gamma, threshold.

use crate::frame::{Frame, to_u8};

/// Tone settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalAdjust {
    /// Contrast about mid-gray 128; `1` is neutral.
    pub contrast: f32,
    /// Luma cutoff in `[0, 1]`; `0` disables thresholding.
    pub threshold: f32,
    /// Gamma; `1` is neutral. Non-positive values are treated as `1`.
    pub gamma: f32,
    /// Pixels below the threshold go black instead of to their luma.
    pub preserve_bright: bool,
}

impl Default for GlobalAdjust {
    fn default() -> Self {
        Self {
            contrast: 1.0,
            threshold: 0.0,
            gamma: 1.0,
            preserve_bright: true,
        }
    }
}

/// Apply contrast, then gamma `255 · (v / 255)^(1 / gamma)`, then the luma
/// threshold. Alpha passes through, so default settings are an exact
/// identity.
pub fn global_adjust(img: &Frame, settings: GlobalAdjust) -> Frame {
    let contrast = if settings.contrast.is_finite() {
        settings.contrast
    } else {
        1.0
    };
    let gamma = if settings.gamma.is_finite() && settings.gamma > 0.0 {
        settings.gamma
    } else {
        1.0
    };
    let inv_gamma = 1.0 / gamma;
    let cutoff = settings.threshold * 255.0;

    let mut out = img.blank_like();
    for (o, p) in out
        .pixels_mut()
        .chunks_exact_mut(4)
        .zip(img.pixels().chunks_exact(4))
    {
        let mut rgb = [0.0f32; 3];
        for c in 0..3 {
            let mut v = ((f32::from(p[c]) - 128.0) * contrast + 128.0).clamp(0.0, 255.0);
            if gamma != 1.0 {
                v = 255.0 * (v / 255.0).powf(inv_gamma);
            }
            rgb[c] = v;
        }
        if settings.threshold > 0.0 {
            let luma = (rgb[0] + rgb[1] + rgb[2]) / 3.0;
            if luma < cutoff {
                let v = if settings.preserve_bright { 0.0 } else { luma };
                rgb = [v; 3];
            }
        }
        o[0] = to_u8(rgb[0]);
        o[1] = to_u8(rgb[1]);
        o[2] = to_u8(rgb[2]);
        o[3] = p[3];
    }
    out
}
