//! Multi-channel sample container
//!
//! Frames are stored as an (frames × channels) array. Codecs only ever see
//! one channel as a plain slice; the other channels ride along untouched.

use crate::error::{Result, StegoError};
use ndarray::{Array1, Array2, ArrayView1, Axis};

/// Decoded audio with its sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    sample_rate: u32,
    frames: Array2<f64>,
}

impl AudioClip {
    /// Create clip from a (frames × channels) array
    pub fn new(sample_rate: u32, frames: Array2<f64>) -> Result<Self> {
        if frames.ncols() == 0 {
            return Err(StegoError::Audio("clip must have at least one channel".into()));
        }
        Ok(Self { sample_rate, frames })
    }

    /// Single-channel clip
    pub fn mono(sample_rate: u32, samples: Vec<f64>) -> Self {
        let frames = Array1::from_vec(samples).insert_axis(Axis(1));
        Self { sample_rate, frames }
    }

    /// Build from interleaved samples; an incomplete final frame is dropped
    pub fn from_interleaved(
        sample_rate: u32,
        channels: usize,
        mut samples: Vec<f64>,
    ) -> Result<Self> {
        if channels == 0 {
            return Err(StegoError::Audio("clip must have at least one channel".into()));
        }
        let frame_count = samples.len() / channels;
        samples.truncate(frame_count * channels);

        let frames = Array2::from_shape_vec((frame_count, channels), samples)
            .map_err(|e| StegoError::Audio(e.to_string()))?;
        Ok(Self { sample_rate, frames })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.frames.ncols()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.nrows()
    }

    pub fn channel_view(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.channel_count()).then(|| self.frames.column(index))
    }

    /// Owned copy of one channel
    pub fn channel(&self, index: usize) -> Option<Vec<f64>> {
        self.channel_view(index).map(|column| column.to_vec())
    }

    /// Copy of this clip with one channel replaced
    pub fn with_channel(&self, index: usize, samples: &[f64]) -> Result<Self> {
        if index >= self.channel_count() {
            return Err(StegoError::Audio(format!(
                "channel {} out of range ({} channels)",
                index,
                self.channel_count()
            )));
        }
        if samples.len() != self.frame_count() {
            return Err(StegoError::Audio(format!(
                "channel length {} does not match {} frames",
                samples.len(),
                self.frame_count()
            )));
        }

        let mut clip = self.clone();
        clip.frames
            .column_mut(index)
            .iter_mut()
            .zip(samples)
            .for_each(|(dst, &src)| *dst = src);
        Ok(clip)
    }

    /// Samples in frame order, channels interleaved
    pub fn interleaved(&self) -> Vec<f64> {
        self.frames.iter().copied().collect()
    }

    /// Largest absolute sample over all channels
    pub fn peak(&self) -> f64 {
        self.frames.iter().fold(0.0, |peak, &s| peak.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleaved_layout() {
        let clip = AudioClip::from_interleaved(8000, 2, vec![0.1, -0.1, 0.2, -0.2, 0.3]).unwrap();

        assert_eq!(clip.frame_count(), 2);
        assert_eq!(clip.channel(0).unwrap(), vec![0.1, 0.2]);
        assert_eq!(clip.channel(1).unwrap(), vec![-0.1, -0.2]);
        assert_eq!(clip.interleaved(), vec![0.1, -0.1, 0.2, -0.2]);
        assert!(clip.channel(2).is_none());
    }

    #[test]
    fn test_with_channel_keeps_others() {
        let clip = AudioClip::from_interleaved(8000, 2, vec![0.1, 0.5, 0.2, 0.6]).unwrap();
        let replaced = clip.with_channel(0, &[0.9, 0.8]).unwrap();

        assert_eq!(replaced.channel(0).unwrap(), vec![0.9, 0.8]);
        assert_eq!(replaced.channel(1).unwrap(), vec![0.5, 0.6]);
        assert_eq!(clip.channel(0).unwrap(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_with_channel_rejects_bad_shape() {
        let clip = AudioClip::mono(8000, vec![0.0; 4]);
        assert!(clip.with_channel(0, &[0.0; 3]).is_err());
        assert!(clip.with_channel(1, &[0.0; 4]).is_err());
    }

    #[test]
    fn test_zero_channels_rejected() {
        assert!(AudioClip::from_interleaved(8000, 0, vec![]).is_err());
        assert!(AudioClip::new(8000, Array2::zeros((10, 0))).is_err());
    }
}
