//! The node trait every audio processor implements.
//!
//! Mono `f32` in, `f32` out. The trait is object-safe so the audio graph can
//! hold harmonizer voices behind `Box<dyn Effect>`, but the fixed nodes are
//! held by value and dispatched statically.
//!
//! No method may allocate: `process` runs on the audio clock.

/// Core trait for all audio nodes.
///
/// # Example
///
/// ```rust
/// use avfx_core::Effect;
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// let mut buf = [1.0, -1.0];
/// gain.process_block_inplace(&mut buf);
/// assert_eq!(buf, [0.5, -0.5]);
/// ```
pub trait Effect {
    /// Process a single sample, advancing internal state by one sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls `process()` for each sample.
    /// `input` and `output` must have the same length.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate and recompute rate-dependent coefficients.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear delay lines and filter history without touching parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Most nodes have none.
    fn latency_samples(&self) -> usize {
        0
    }
}

impl<E: Effect + ?Sized> Effect for &mut E {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        (**self).process(input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        (**self).set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn latency_samples(&self) -> usize {
        (**self).latency_samples()
    }
}
