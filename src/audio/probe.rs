use std::fs::File;
use std::path::Path;

use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{AcquisitionError, Result};

/// Read the duration of a local audio file in seconds.
///
/// WAV goes through hound (most reliable for WAV); everything else through
/// Symphonia. No samples are decoded, only container metadata and packet
/// timing.
pub fn probe_duration<P: AsRef<Path>>(path: P) -> Result<f64> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(AcquisitionError::SourceMissing { path: path.to_path_buf() }.into());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "wav" => probe_wav(path),
        _ => probe_with_symphonia(path),
    }
}

fn probe_wav(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| AcquisitionError::ProbeFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let spec = reader.spec();
    // duration() counts inter-channel samples (frames)
    Ok(reader.duration() as f64 / spec.sample_rate as f64)
}

fn probe_with_symphonia(path: &Path) -> Result<f64> {
    let probe_err = |reason: String| AcquisitionError::ProbeFailed {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| probe_err(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| probe_err(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| probe_err("no decodable audio track".to_string()))?;

    let track_id = track.id;
    let params = &track.codec_params;

    let time_base = params
        .time_base
        .ok_or_else(|| probe_err("no time base in codec parameters".to_string()))?;

    // Containers that index their frames report the count up front
    if let Some(n_frames) = params.n_frames {
        let time = time_base.calc_time(n_frames);
        return Ok(time.seconds as f64 + time.frac);
    }

    // Otherwise walk the packets and sum their timestamps (no decoding)
    let mut total_dur: u64 = 0;
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(_)) => break, // end of stream
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(probe_err(e.to_string()).into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        total_dur += packet.dur();
    }

    let time = time_base.calc_time(total_dur);
    Ok(time.seconds as f64 + time.frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_wav(path: &Path, seconds: f64, sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let samples = (seconds * sample_rate as f64) as usize;
        for i in 0..samples {
            writer.write_sample(((i % 100) as i16) * 200).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_wav_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_wav(&path, 2.0, 8000);

        let duration = probe_duration(&path).unwrap();
        assert!((duration - 2.0).abs() < 0.001, "got {}", duration);
    }

    #[test]
    fn test_missing_file() {
        let result = probe_duration("no/such/file.wav");
        assert!(matches!(
            result,
            Err(crate::error::LapseError::Acquisition(AcquisitionError::SourceMissing { .. }))
        ));
    }

    #[test]
    fn test_undecodable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"this is not audio data at all").unwrap();

        let result = probe_duration(&path);
        assert!(matches!(
            result,
            Err(crate::error::LapseError::Acquisition(AcquisitionError::ProbeFailed { .. }))
        ));
    }
}
