use std::path::{Path, PathBuf};

/// Accepted source photo extensions (lower-cased)
const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Check whether a path carries an accepted photo extension
pub fn is_accepted_photo<P: AsRef<Path>>(path: P) -> bool {
    match path.as_ref().extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ACCEPTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

/// An ordered set of source photos
///
/// Entries are sorted lexicographically by filename; this ordering is the
/// temporal ordering of the timelapse. The set is never mutated after
/// construction, only transformed into a [`NormalizedPhotoSet`].
#[derive(Debug, Clone)]
pub struct PhotoSet {
    photos: Vec<PathBuf>,
}

impl PhotoSet {
    /// Build a set from candidate paths, filtering out anything that is not
    /// an accepted image format and sorting lexicographically by filename.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut photos: Vec<PathBuf> = paths
            .into_iter()
            .map(Into::into)
            .filter(|p| is_accepted_photo(p))
            .collect();

        photos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        Self { photos }
    }

    /// Photos in timelapse order
    pub fn photos(&self) -> &[PathBuf] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.photos.iter()
    }
}

/// A [`PhotoSet`] after resize and orientation correction
///
/// Every entry has the same pixel width, the count equals the input count,
/// and entry i corresponds to input photo i. Frames are persisted under
/// zero-padded sequential names so directory listing order equals timelapse
/// order even on filesystems without reliable creation-time metadata.
#[derive(Debug, Clone)]
pub struct NormalizedPhotoSet {
    frames: Vec<PathBuf>,
    width: u32,
}

impl NormalizedPhotoSet {
    pub fn new(frames: Vec<PathBuf>, width: u32) -> Self {
        Self { frames, width }
    }

    /// Normalized frame paths in timelapse order
    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    /// Uniform pixel width of every frame
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Zero-padded sequential frame filename, 1-based (`001.jpg`, `002.jpg`, ...)
///
/// The padding widens with the photo count, so listing order still matches
/// timelapse order past 999 frames (`0999.jpg` before `1000.jpg`).
pub fn frame_name(index: usize, count: usize) -> String {
    let width = digits(count).max(3);
    format!("{:0width$}.jpg", index + 1, width = width)
}

fn digits(mut n: usize) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filtering() {
        assert!(is_accepted_photo("a.jpg"));
        assert!(is_accepted_photo("a.JPG"));
        assert!(is_accepted_photo("a.jpeg"));
        assert!(is_accepted_photo("a.png"));
        assert!(!is_accepted_photo("a.gif"));
        assert!(!is_accepted_photo("a.txt"));
        assert!(!is_accepted_photo("noext"));
    }

    #[test]
    fn test_photoset_sorted_lexicographically() {
        let set = PhotoSet::from_paths(vec![
            "shots/img_10.jpg",
            "shots/img_02.jpg",
            "shots/img_01.jpg",
        ]);

        let names: Vec<_> = set
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["img_01.jpg", "img_02.jpg", "img_10.jpg"]);
    }

    #[test]
    fn test_photoset_filters_unaccepted_formats() {
        let set = PhotoSet::from_paths(vec!["a.jpg", "notes.txt", "b.png", "clip.mp4"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_photoset_order_is_stable_across_input_permutations() {
        let forward = PhotoSet::from_paths(vec!["a.jpg", "b.jpg", "c.jpg"]);
        let shuffled = PhotoSet::from_paths(vec!["c.jpg", "a.jpg", "b.jpg"]);
        assert_eq!(forward.photos(), shuffled.photos());
    }

    #[test]
    fn test_frame_names_are_zero_padded() {
        assert_eq!(frame_name(0, 500), "001.jpg");
        assert_eq!(frame_name(9, 500), "010.jpg");
        assert_eq!(frame_name(122, 500), "123.jpg");
    }

    #[test]
    fn test_frame_names_widen_past_three_digits() {
        assert_eq!(frame_name(0, 1500), "0001.jpg");
        assert_eq!(frame_name(998, 1500), "0999.jpg");
        assert_eq!(frame_name(999, 1500), "1000.jpg");

        // listing order equals timelapse order even across the 999 boundary
        assert!(frame_name(998, 1500) < frame_name(999, 1500));
    }
}
