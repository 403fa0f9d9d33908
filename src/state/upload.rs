/// Image intake: file picker, drag-and-drop and sample images
///
/// Only one image is staged at a time. Decoding a local file runs in the
/// background; every decode request gets a generation number and only the
/// completion of the latest request is applied.

use iced::widget::image::Handle;
use image::ImageFormat;
use rand::Rng;
use std::path::{Path, PathBuf};

use crate::error::{check_upload_size, AppError};

/// Remote images offered by "Use sample"
pub const SAMPLE_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1598300042247-d088f8ab3a91?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
    "https://images.unsplash.com/photo-1518837695005-2083093ee35b?ixlib=rb-4.0.3&auto=format&fit=crop&w-800&q=80",
    "https://images.unsplash.com/photo-1416879595882-3373a0480b5b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
];

/// A candidate input before validation
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub path: PathBuf,
    /// Declared media type, e.g. "image/png"
    pub media_type: Option<String>,
    /// Size in bytes
    pub size: u64,
}

impl ImageFile {
    /// Describe a file on disk. The media type comes from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let media_type = ImageFormat::from_path(path)
            .ok()
            .map(|format| format.to_mime_type().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            media_type,
            size,
        })
    }

    pub fn is_image(&self) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|media_type| media_type.starts_with("image/"))
    }
}

/// Pixels decoded from a local file, ready for the image widget
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub path: PathBuf,
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

/// The image currently held for analysis
#[derive(Debug, Clone)]
pub enum StagedImage {
    Local { path: PathBuf, handle: Handle },
    /// Remote reference, never fetched
    Sample { url: &'static str },
}

impl StagedImage {
    pub fn sample_url(&self) -> Option<&'static str> {
        match self {
            StagedImage::Sample { url } => Some(*url),
            StagedImage::Local { .. } => None,
        }
    }

    /// Short label for the preview caption
    pub fn label(&self) -> String {
        match self {
            StagedImage::Local { path, .. } => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            StagedImage::Sample { url } => format!("Sample image: {url}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct UploadState {
    staged: Option<StagedImage>,
    /// Last generation handed out
    generation: u64,
    /// Generation whose decode is still outstanding
    pending: Option<u64>,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Option<&StagedImage> {
        self.staged.as_ref()
    }

    /// True once an image is staged, which is what enables "Analyze"
    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn is_decoding(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate a file and open a decode request for it.
    ///
    /// Returns the generation the decode must report back with.
    /// Validation failures leave the state untouched.
    pub fn begin_file(&mut self, file: &ImageFile) -> Result<u64, AppError> {
        if !file.is_image() {
            return Err(AppError::InvalidMediaType {
                path: file.path.clone(),
            });
        }
        check_upload_size(file.size)?;

        self.generation += 1;
        self.pending = Some(self.generation);
        Ok(self.generation)
    }

    /// Apply a finished decode.
    ///
    /// Returns `Ok(false)` when the request was superseded by a newer
    /// one (or by a reset) and the result was discarded.
    pub fn finish_decode(
        &mut self,
        generation: u64,
        result: Result<DecodedImage, String>,
    ) -> Result<bool, AppError> {
        if self.pending != Some(generation) {
            return Ok(false);
        }
        self.pending = None;

        let decoded = result.map_err(AppError::Decode)?;
        log::info!(
            "📸 Staged {} ({}x{})",
            decoded.path.display(),
            decoded.width,
            decoded.height
        );
        self.staged = Some(StagedImage::Local {
            path: decoded.path,
            handle: decoded.handle,
        });
        Ok(true)
    }

    /// Stage one of the sample images, chosen uniformly
    pub fn stage_sample<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let url = SAMPLE_IMAGES[rng.gen_range(0..SAMPLE_IMAGES.len())];

        self.generation += 1;
        self.pending = None;
        self.staged = Some(StagedImage::Sample { url });
        url
    }

    /// Drop the staged image and any outstanding decode
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.staged = None;
    }
}

/// Groups window file-drop events into gestures.
///
/// The window reports one drop event per file; only the first file of a
/// gesture is staged. A new hover starts a new gesture.
#[derive(Debug)]
pub struct DropGesture {
    armed: bool,
}

impl Default for DropGesture {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl DropGesture {
    pub fn hovered(&mut self) {
        self.armed = true;
    }

    pub fn left(&mut self) {
        self.armed = true;
    }

    /// Returns the path if it is the first file of the current gesture
    pub fn dropped(&mut self, path: PathBuf) -> Option<PathBuf> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        Some(path)
    }
}

/// Read and decode an image file into displayable pixels.
///
/// Runs on the blocking pool because decoding is CPU-bound.
pub async fn decode_image(generation: u64, path: PathBuf) -> (u64, Result<DecodedImage, String>) {
    let result = match tokio::fs::read(&path).await {
        Ok(bytes) => tokio::task::spawn_blocking(move || decode_bytes(path, &bytes))
            .await
            .unwrap_or_else(|e| Err(format!("Task join error: {}", e))),
        Err(e) => Err(format!("Failed to read {}: {}", path.display(), e)),
    };

    (generation, result)
}

fn decode_bytes(path: PathBuf, bytes: &[u8]) -> Result<DecodedImage, String> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let handle = Handle::from_rgba(width, height, rgba.into_raw());

    Ok(DecodedImage {
        path,
        handle,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_UPLOAD_BYTES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn png(size: u64) -> ImageFile {
        ImageFile {
            path: PathBuf::from("leaf.png"),
            media_type: Some("image/png".to_string()),
            size,
        }
    }

    fn decoded(name: &str) -> DecodedImage {
        DecodedImage {
            path: PathBuf::from(name),
            handle: Handle::from_rgba(1, 1, vec![0u8, 128, 0, 255]),
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_stage_valid_file() {
        let mut upload = UploadState::new();
        let generation = upload.begin_file(&png(2 * 1024 * 1024)).unwrap();
        assert!(upload.is_decoding());
        assert!(!upload.is_staged());

        assert!(upload.finish_decode(generation, Ok(decoded("leaf.png"))).unwrap());
        assert!(upload.is_staged());
        assert!(!upload.is_decoding());
    }

    #[test]
    fn test_reject_non_image() {
        let mut upload = UploadState::new();
        let file = ImageFile {
            path: PathBuf::from("notes.txt"),
            media_type: Some("text/plain".to_string()),
            size: 10,
        };
        assert!(matches!(
            upload.begin_file(&file),
            Err(AppError::InvalidMediaType { .. })
        ));

        let untyped = ImageFile {
            media_type: None,
            ..file
        };
        assert!(upload.begin_file(&untyped).is_err());
        assert!(!upload.is_decoding());
        assert!(!upload.is_staged());
    }

    #[test]
    fn test_oversized_keeps_prior_state() {
        let mut upload = UploadState::new();
        let generation = upload.begin_file(&png(1024)).unwrap();
        upload.finish_decode(generation, Ok(decoded("first.png"))).unwrap();

        let result = upload.begin_file(&png(MAX_UPLOAD_BYTES + 1));
        assert!(matches!(result, Err(AppError::SizeLimitExceeded { .. })));
        assert_eq!(upload.staged().unwrap().label(), "first.png");
        assert!(!upload.is_decoding());
    }

    #[test]
    fn test_superseded_decode_is_discarded() {
        let mut upload = UploadState::new();
        let first = upload.begin_file(&png(10)).unwrap();
        let second = upload.begin_file(&png(10)).unwrap();

        // The second finishes first, then the stale first one arrives
        assert!(upload.finish_decode(second, Ok(decoded("second.png"))).unwrap());
        assert!(!upload.finish_decode(first, Ok(decoded("first.png"))).unwrap());
        assert_eq!(upload.staged().unwrap().label(), "second.png");
    }

    #[test]
    fn test_reset_cancels_pending_decode() {
        let mut upload = UploadState::new();
        let generation = upload.begin_file(&png(10)).unwrap();
        upload.reset();

        assert!(!upload.finish_decode(generation, Ok(decoded("late.png"))).unwrap());
        assert!(!upload.is_staged());
    }

    #[test]
    fn test_failed_decode_keeps_prior_image() {
        let mut upload = UploadState::new();
        let generation = upload.begin_file(&png(10)).unwrap();
        upload.finish_decode(generation, Ok(decoded("good.png"))).unwrap();

        let generation = upload.begin_file(&png(10)).unwrap();
        let result = upload.finish_decode(generation, Err("truncated".to_string()));
        assert!(matches!(result, Err(AppError::Decode(_))));
        assert_eq!(upload.staged().unwrap().label(), "good.png");
    }

    #[test]
    fn test_sample_supersedes_pending_decode() {
        let mut upload = UploadState::new();
        let generation = upload.begin_file(&png(10)).unwrap();
        let url = upload.stage_sample(&mut StdRng::seed_from_u64(3));

        assert!(!upload.is_decoding());
        assert!(!upload.finish_decode(generation, Ok(decoded("late.png"))).unwrap());
        assert_eq!(upload.staged().unwrap().sample_url(), Some(url));
    }

    #[test]
    fn test_sample_image() {
        let mut upload = UploadState::new();
        let mut rng = StdRng::seed_from_u64(7);
        let url = upload.stage_sample(&mut rng);

        assert!(SAMPLE_IMAGES.contains(&url));
        assert!(upload.is_staged());
        assert_eq!(upload.staged().unwrap().sample_url(), Some(url));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut upload = UploadState::new();
        upload.stage_sample(&mut StdRng::seed_from_u64(1));

        upload.reset();
        let once = (upload.is_staged(), upload.is_decoding());
        upload.reset();
        assert_eq!((upload.is_staged(), upload.is_decoding()), once);
        assert_eq!(once, (false, false));
    }

    #[test]
    fn test_drop_gesture_takes_first_file() {
        let mut gesture = DropGesture::default();
        gesture.hovered();
        assert_eq!(gesture.dropped(PathBuf::from("a.png")), Some(PathBuf::from("a.png")));
        assert_eq!(gesture.dropped(PathBuf::from("b.png")), None);

        gesture.hovered();
        assert_eq!(gesture.dropped(PathBuf::from("c.png")), Some(PathBuf::from("c.png")));

        // A hover that leaves without dropping still re-arms
        gesture.left();
        assert_eq!(gesture.dropped(PathBuf::from("d.png")), Some(PathBuf::from("d.png")));
        assert_eq!(gesture.dropped(PathBuf::from("e.png")), None);
    }

    #[test]
    fn test_from_path_reads_type_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.jpg");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.size, 2048);
        assert_eq!(file.media_type.as_deref(), Some("image/jpeg"));
        assert!(file.is_image());

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();
        assert!(!ImageFile::from_path(&text).unwrap().is_image());
    }

    #[tokio::test]
    async fn test_decode_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([20, 160, 40, 255]))
            .save(&path)
            .unwrap();

        let (generation, result) = decode_image(4, path.clone()).await;
        assert_eq!(generation, 4);
        let decoded = result.unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.path, path);
    }

    #[tokio::test]
    async fn test_decode_garbage_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let (_, result) = decode_image(1, path).await;
        assert!(result.is_err());
    }
}
