//! PCM sample conversion helpers

use rubato::{FftFixedIn, Resampler};

use super::flac_encoder::EncodingError;

/// Resampler chunk size in frames
const RESAMPLE_CHUNK: usize = 1024;

/// Average interleaved channels down to one
pub fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(usize::from(channels))
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
            (sum / i32::from(channels)) as i16
        })
        .collect()
}

/// Convert a float sample in `-1.0..=1.0` to 16-bit
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

/// Resample mono audio from `source_rate` to `target_rate`
pub fn resample(samples: &[i16], source_rate: u32, target_rate: u32) -> Result<Vec<i16>, EncodingError> {
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let input: Vec<f32> = samples.iter().map(|&s| f32::from(s) / 32768.0).collect();
    let expected_len =
        (input.len() as f64 * f64::from(target_rate) / f64::from(source_rate)).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        RESAMPLE_CHUNK,
        2,
        1,
    )
    .map_err(|e| EncodingError::Resample(e.to_string()))?;

    let mut output = Vec::with_capacity(expected_len);
    let mut pos = 0;
    while pos < input.len() {
        let needed = resampler.input_frames_next();
        let end = (pos + needed).min(input.len());
        let mut chunk = input[pos..end].to_vec();
        chunk.resize(needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| EncodingError::Resample(e.to_string()))?;
        output.extend(resampled[0].iter().map(|&s| f32_to_i16(s)));
        pos = end;
    }

    output.truncate(expected_len);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_passes_mono_through() {
        let mono = vec![100i16, -200, 300];
        assert_eq!(downmix(&mono, 1), mono);
    }

    #[test]
    fn downmix_averages_stereo_frames() {
        let stereo = vec![100i16, 200, 300, 400];
        assert_eq!(downmix(&stereo, 2), vec![150, 350]);
    }

    #[test]
    fn f32_conversion_clamps() {
        assert_eq!(f32_to_i16(0.0), 0);
        assert_eq!(f32_to_i16(1.0), i16::MAX);
        assert_eq!(f32_to_i16(4.0), i16::MAX);
        assert_eq!(f32_to_i16(-4.0), -i16::MAX);
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![1i16, 2, 3];
        assert_eq!(resample(&samples, 16_000, 16_000).unwrap(), samples);
    }

    #[test]
    fn resample_48k_to_16k_shrinks_by_three() {
        let samples = vec![0i16; 48_000];
        let out = resample(&samples, 48_000, 16_000).unwrap();
        assert_eq!(out.len(), 16_000);
    }
}
