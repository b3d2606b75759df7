use std::path::{Path, PathBuf};

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::{PhotoConfig, ResizeMode},
    error::{PhotoError, Result},
    photo::exif,
    photo::types::{frame_name, NormalizedPhotoSet, PhotoSet},
};

/// Converts a [`PhotoSet`] into uniformly sized, correctly oriented frames
///
/// Per-photo work (decode, reorient, resize, save) runs in parallel, but
/// frame numbers always come from the original sort position, never from
/// completion order.
pub struct Normalizer {
    config: PhotoConfig,
}

impl Normalizer {
    pub fn new(config: PhotoConfig) -> Self {
        Self { config }
    }

    /// List a source directory into an ordered [`PhotoSet`].
    ///
    /// Hidden files and unaccepted formats are filtered out; the survivors
    /// are sorted lexicographically by filename.
    pub fn scan<P: AsRef<Path>>(&self, photo_dir: P) -> Result<PhotoSet> {
        let photo_dir = photo_dir.as_ref();

        if !photo_dir.is_dir() {
            return Err(PhotoError::DirectoryMissing { path: photo_dir.to_path_buf() }.into());
        }

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(photo_dir)? {
            let path = entry?.path();
            if path.is_file() && !is_hidden(&path) {
                candidates.push(path);
            }
        }

        let set = PhotoSet::from_paths(candidates);
        info!("Found {} photos in {:?}", set.len(), photo_dir);
        Ok(set)
    }

    /// Normalize every photo into `frames_dir` under zero-padded names.
    ///
    /// A photo that cannot be decoded fails the whole run. Silently dropping
    /// a frame here would desynchronize the duration arithmetic downstream.
    pub fn normalize<P: AsRef<Path>>(
        &self,
        photos: &PhotoSet,
        frames_dir: P,
    ) -> Result<NormalizedPhotoSet> {
        let frames_dir = frames_dir.as_ref();
        std::fs::create_dir_all(frames_dir)?;

        // libx264 rejects odd dimensions, so both axes are rounded to even
        let target_width = even(self.config.target_width);

        info!(
            "Normalizing {} photos to width {} in {:?}",
            photos.len(),
            target_width,
            frames_dir
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.processing_threads)
            .build()
            .map_err(|e| PhotoError::WriteFailed {
                path: frames_dir.to_path_buf(),
                reason: format!("thread pool init: {}", e),
            })?;

        let count = photos.len();
        let frames: Vec<PathBuf> = pool.install(|| {
            photos
                .photos()
                .par_iter()
                .enumerate()
                .map(|(index, source)| {
                    let target = frames_dir.join(frame_name(index, count));
                    self.normalize_one(source, &target, target_width)?;
                    Ok(target)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(NormalizedPhotoSet::new(frames, target_width))
    }

    fn normalize_one(&self, source: &Path, target: &Path, target_width: u32) -> Result<()> {
        let bytes = std::fs::read(source).map_err(|e| PhotoError::DecodeFailed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

        let orientation = exif::orientation_from_jpeg(&bytes);

        let image = image::load_from_memory(&bytes).map_err(|e| PhotoError::DecodeFailed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

        // Orientation first: a rotated portrait capture swaps its axes, and
        // the uniform-width invariant has to hold on the upright image.
        let image = match orientation {
            Some(o) if o > 1 => {
                debug!("Applying EXIF orientation {} to {:?}", o, source);
                apply_orientation(image, o)
            }
            _ => image,
        };

        let target_height = match self.config.resize {
            ResizeMode::KeepAspect => {
                let scaled =
                    (image.height() as f64 * target_width as f64 / image.width() as f64).round();
                even(scaled.max(2.0) as u32)
            }
            ResizeMode::Exact { height } => even(height),
        };

        let resized = image.resize_exact(target_width, target_height, FilterType::Lanczos3);

        resized.to_rgb8().save(target).map_err(|e| PhotoError::WriteFailed {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Normalized {:?} -> {:?} ({}x{})", source, target, target_width, target_height);
        Ok(())
    }
}

/// Map an EXIF orientation value (2-8) to the upright transform
fn apply_orientation(image: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

fn even(value: u32) -> u32 {
    (value & !1).max(2)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
