//! Bundled default chime synthesis
//!
//! A two-tone notification: the first half at a mid tone, the second half
//! slightly higher, with a short linear fade at both ends to avoid clicks.

use std::f32::consts::PI;

/// Parameters of the synthesized chime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChimeSpec {
    pub sample_rate: u32,
    pub duration_secs: f32,
    pub first_hz: f32,
    pub second_hz: f32,
    pub amplitude: f32,
    pub fade_secs: f32,
}

impl Default for ChimeSpec {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            duration_secs: 0.6,
            first_hz: 800.0,
            second_hz: 1000.0,
            amplitude: 0.4,
            fade_secs: 0.05,
        }
    }
}

impl ChimeSpec {
    pub fn sample_count(&self) -> usize {
        (self.duration_secs * self.sample_rate as f32) as usize
    }

    /// Mono 16-bit PCM samples
    pub fn samples(&self) -> Vec<i16> {
        let half = self.duration_secs / 2.0;
        (0..self.sample_count())
            .map(|i| {
                let t = i as f32 / self.sample_rate as f32;
                let freq = if t < half { self.first_hz } else { self.second_hz };

                let envelope = if t < self.fade_secs {
                    t / self.fade_secs
                } else if t > self.duration_secs - self.fade_secs {
                    ((self.duration_secs - t) / self.fade_secs).max(0.0)
                } else {
                    1.0
                };

                let sample = self.amplitude * envelope * (2.0 * PI * freq * t).sin();
                (sample * i16::MAX as f32) as i16
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chime_length() {
        let spec = ChimeSpec::default();
        assert_eq!(spec.sample_count(), 26_460);
        assert_eq!(spec.samples().len(), 26_460);
    }

    #[test]
    fn chime_starts_silent_and_stays_within_amplitude() {
        let spec = ChimeSpec::default();
        let samples = spec.samples();
        assert_eq!(samples[0], 0);

        let limit = (spec.amplitude * i16::MAX as f32) as i16 + 1;
        assert!(samples.iter().all(|s| s.abs() <= limit));
        assert!(samples.iter().any(|s| s.abs() > limit / 2));
    }
}
