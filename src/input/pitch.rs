//! Pitch detection over raw time-domain samples
//!
//! Normalized square difference (McLeod's method): autocorrelation scaled so
//! a perfectly periodic signal peaks at 1.0, which doubles as the clarity
//! measure. The voice input polls this against the analyser buffer; the math
//! itself has no platform dependencies.

/// A detected fundamental
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pitch {
    /// Fundamental frequency, Hz
    pub frequency: f32,
    /// Periodicity measure in [0, 1]
    pub clarity: f32,
}

/// Minimum key-maximum height relative to the highest peak for a candidate to
/// win. Picking the first peak above this cutoff selects the fundamental
/// instead of a strong harmonic.
const PEAK_CUTOFF: f32 = 0.9;

/// Detect the dominant pitch in `samples`. Returns `None` for silence or
/// aperiodic input.
pub fn detect(samples: &[f32], sample_rate: f32) -> Option<Pitch> {
    let n = samples.len();
    if n < 4 {
        return None;
    }

    // nsdf(tau) = 2 * sum(x[i] * x[i+tau]) / sum(x[i]^2 + x[i+tau]^2)
    let max_lag = n / 2;
    let mut nsdf = vec![0.0f32; max_lag];
    for (tau, value) in nsdf.iter_mut().enumerate() {
        let mut acf = 0.0f32;
        let mut norm = 0.0f32;
        for i in 0..(n - tau) {
            let (a, b) = (samples[i], samples[i + tau]);
            acf += a * b;
            norm += a * a + b * b;
        }
        *value = if norm > 0.0 { 2.0 * acf / norm } else { 0.0 };
    }

    // Key maxima: the highest value of each positive lobe after the initial
    // one around tau = 0.
    let mut maxima: Vec<(usize, f32)> = Vec::new();
    let mut tau = 1;
    while tau < max_lag && nsdf[tau] > 0.0 {
        tau += 1;
    }
    while tau < max_lag {
        while tau < max_lag && nsdf[tau] <= 0.0 {
            tau += 1;
        }
        let mut best = (0usize, 0.0f32);
        while tau < max_lag && nsdf[tau] > 0.0 {
            if nsdf[tau] > best.1 {
                best = (tau, nsdf[tau]);
            }
            tau += 1;
        }
        if best.1 > 0.0 {
            maxima.push(best);
        }
    }

    let highest = maxima
        .iter()
        .map(|m| m.1)
        .fold(0.0f32, f32::max);
    if highest <= 0.0 {
        return None;
    }

    let threshold = PEAK_CUTOFF * highest;
    let (lag, clarity) = *maxima.iter().find(|m| m.1 >= threshold)?;
    if lag == 0 || lag + 1 >= max_lag {
        return None;
    }

    // Parabolic interpolation around the winning lag for sub-sample accuracy
    let (y0, y1, y2) = (nsdf[lag - 1], nsdf[lag], nsdf[lag + 1]);
    let denom = 2.0 * (2.0 * y1 - y0 - y2);
    let shift = if denom.abs() > f32::EPSILON {
        (y2 - y0) / denom
    } else {
        0.0
    };
    let period = lag as f32 + shift;

    Some(Pitch {
        frequency: sample_rate / period,
        clarity: clarity.min(1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn sine(frequency: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (std::f32::consts::TAU * frequency * i as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    #[test]
    fn detects_low_hum() {
        let samples = sine(110.0, 4096);
        let pitch = detect(&samples, SAMPLE_RATE).expect("no pitch detected");
        assert!((pitch.frequency - 110.0).abs() < 3.0, "{:?}", pitch);
        assert!(pitch.clarity > 0.9, "{:?}", pitch);
    }

    #[test]
    fn detects_concert_a() {
        let samples = sine(440.0, 2048);
        let pitch = detect(&samples, SAMPLE_RATE).expect("no pitch detected");
        assert!((pitch.frequency - 440.0).abs() < 5.0, "{:?}", pitch);
        assert!(pitch.clarity > 0.9, "{:?}", pitch);
    }

    #[test]
    fn silence_yields_nothing() {
        let samples = vec![0.0f32; 2048];
        assert_eq!(detect(&samples, SAMPLE_RATE), None);
    }

    #[test]
    fn tiny_buffers_yield_nothing() {
        assert_eq!(detect(&[], SAMPLE_RATE), None);
        assert_eq!(detect(&[0.5, -0.5], SAMPLE_RATE), None);
    }
}
