//! WAV input and output through `hound`.
//!
//! The analyzer only ever looks at one channel, so reading always returns
//! channel 0 as `f32`. Writing goes the other way: samples are `f32` in
//! `[-1, 1]` and are stored as IEEE float at 32 bits or as clamped integer
//! PCM at any smaller depth.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use earshot_core::StereoSamples;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM.
    Pcm,
    /// 32-bit IEEE float.
    IeeeFloat,
}

impl WavFormat {
    fn of(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Int => WavFormat::Pcm,
            SampleFormat::Float => WavFormat::IeeeFloat,
        }
    }

    /// Label used in `earshot info`.
    pub fn name(&self) -> &'static str {
        match self {
            WavFormat::Pcm => "PCM",
            WavFormat::IeeeFloat => "IEEE float",
        }
    }
}

/// Header facts about a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Stored bit depth.
    pub bits_per_sample: u16,
    /// Frames, i.e. samples per channel.
    pub num_frames: u64,
    /// `num_frames / sample_rate`.
    pub duration_secs: f64,
    /// Sample encoding.
    pub format: WavFormat,
}

/// Layout of a WAV file to write, or of one that was read.
///
/// The encoding follows from the depth: 32 bits is float, anything else PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Channel count.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Bit depth.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// One channel at `sample_rate` and `bits_per_sample`.
    pub fn mono(sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample,
        }
    }

    fn with_channels(self, channels: u16) -> hound::WavSpec {
        hound::WavSpec {
            channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: if self.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

fn unreadable(path: &Path) -> impl Fn(hound::Error) -> Error + '_ {
    move |source| Error::Unreadable {
        path: path.to_path_buf(),
        source,
    }
}

fn unwritable(path: &Path) -> impl Fn(hound::Error) -> Error + '_ {
    move |source| Error::Unwritable {
        path: path.to_path_buf(),
        source,
    }
}

fn open(path: &Path) -> Result<WavReader<BufReader<File>>> {
    WavReader::open(path).map_err(unreadable(path))
}

/// Header of `path`, without decoding any samples.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let path = path.as_ref();
    let reader = open(path)?;
    let spec = reader.spec();

    // hound counts samples across all channels
    let num_frames = u64::from(reader.len()) / u64::from(spec.channels.max(1));
    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate.max(1)),
        format: WavFormat::of(spec.sample_format),
    })
}

/// Channel 0 of `path` as `f32`, plus the file's own layout.
///
/// Integer PCM is divided by `2^(bits - 1)`, so full scale maps to `[-1, 1)`.
/// The returned spec keeps the file's channel count even though only one
/// channel comes back.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let path = path.as_ref();
    let reader = open(path)?;
    let header = reader.spec();
    let stride = usize::from(header.channels.max(1));

    let channel0: Vec<f32> = match header.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .step_by(stride)
            .collect::<hound::Result<Vec<f32>>>(),
        SampleFormat::Int => {
            let full_scale = 2f32.powi(i32::from(header.bits_per_sample) - 1);
            reader
                .into_samples::<i32>()
                .step_by(stride)
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<hound::Result<Vec<f32>>>()
        }
    }
    .map_err(unreadable(path))?;

    tracing::debug!(
        path = %path.display(),
        frames = channel0.len(),
        sample_rate = header.sample_rate,
        channels = header.channels,
        "loaded channel 0"
    );

    let spec = WavSpec {
        channels: header.channels,
        sample_rate: header.sample_rate,
        bits_per_sample: header.bits_per_sample,
    };
    Ok((channel0, spec))
}

/// Encode interleaved `samples` into a new file at `path`.
fn encode(
    path: &Path,
    layout: hound::WavSpec,
    samples: impl Iterator<Item = f32>,
) -> Result<()> {
    let mut writer = WavWriter::create(path, layout).map_err(unwritable(path))?;

    match layout.sample_format {
        SampleFormat::Float => {
            for x in samples {
                writer.write_sample(x).map_err(unwritable(path))?;
            }
        }
        SampleFormat::Int => {
            let full_scale = 2f32.powi(i32::from(layout.bits_per_sample) - 1);
            for x in samples {
                let q = (x * full_scale).clamp(-full_scale, full_scale - 1.0) as i32;
                writer.write_sample(q).map_err(unwritable(path))?;
            }
        }
    }

    writer.finalize().map_err(unwritable(path))
}

/// Write `samples` as a one-channel file. `spec.channels` is ignored.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    encode(path, spec.with_channels(1), samples.iter().copied())?;
    tracing::debug!(path = %path.display(), frames = samples.len(), "wrote mono WAV");
    Ok(())
}

/// Write a left/right pair as a two-channel file. `spec.channels` is ignored.
pub fn write_wav_stereo<P: AsRef<Path>>(
    path: P,
    samples: &StereoSamples,
    spec: WavSpec,
) -> Result<()> {
    let path = path.as_ref();
    let interleaved = samples.to_interleaved();
    encode(path, spec.with_channels(2), interleaved.into_iter())?;
    tracing::debug!(path = %path.display(), frames = samples.len(), "wrote stereo WAV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn ramp(len: usize) -> Vec<f32> {
        (0..len).map(|i| i as f32 / len as f32 - 0.5).collect()
    }

    #[test]
    fn float_files_are_lossless() {
        let file = NamedTempFile::new().unwrap();
        let samples = ramp(1000);
        write_wav(file.path(), &samples, WavSpec::mono(48000, 32)).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec, WavSpec::mono(48000, 32));
        assert_eq!(loaded, samples);
    }

    #[test]
    fn pcm16_is_within_one_step() {
        let file = NamedTempFile::new().unwrap();
        let samples = ramp(1000);
        write_wav(file.path(), &samples, WavSpec::mono(44100, 16)).unwrap();

        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded.len(), samples.len());
        for (a, b) in samples.iter().zip(&loaded) {
            assert!((a - b).abs() <= 1.0 / 32768.0, "{a} vs {b}");
        }
    }

    #[test]
    fn full_scale_pcm_is_clamped() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[1.5, -1.5], WavSpec::mono(8000, 16)).unwrap();
        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded, [32767.0 / 32768.0, -1.0]);
    }

    #[test]
    fn stereo_read_returns_left() {
        let file = NamedTempFile::new().unwrap();
        let left = ramp(100);
        let pair = StereoSamples::new(left.clone(), vec![0.25; 100]);
        write_wav_stereo(file.path(), &pair, WavSpec::mono(22050, 32)).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.channels, 2);
        assert_eq!(loaded, left);
    }

    #[test]
    fn stereo_frames_are_stored_left_first() {
        let file = NamedTempFile::new().unwrap();
        let pair = StereoSamples::new(vec![0.5, 0.25], vec![-0.5, -0.25]);
        write_wav_stereo(file.path(), &pair, WavSpec::mono(8000, 32)).unwrap();

        let raw: Vec<f32> = WavReader::open(file.path())
            .unwrap()
            .into_samples::<f32>()
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(raw, [0.5, -0.5, 0.25, -0.25]);
    }

    #[test]
    fn info_reads_header_only() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &vec![0.0; 22050], WavSpec::mono(44100, 24)).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(
            (info.channels, info.bits_per_sample, info.num_frames),
            (1, 24, 22050)
        );
        assert_eq!(info.format, WavFormat::Pcm);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn non_wav_input_is_unreadable() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"definitely not RIFF").unwrap();
        let err = read_wav(file.path()).unwrap_err();
        assert!(matches!(err, Error::Unreadable { .. }));
        assert!(err.to_string().contains("cannot read WAV file"));

        assert!(matches!(
            read_wav("/nonexistent/earshot/none.wav"),
            Err(Error::Unreadable { .. })
        ));
    }
}
