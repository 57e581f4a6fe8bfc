use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::report::PhotoUpload;

pub const MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Photo not found: {0}")]
    NotFound(String),

    #[error("Not a regular file: {0}")]
    NotAFile(String),

    #[error("Unsupported photo type: {0} (use jpg, png, gif or webp)")]
    Unsupported(String),

    #[error("Photo is too large ({size} bytes, limit is {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Could not stage photo: {0}")]
    Io(#[from] io::Error),
}

/// A photo picked in the report form.
///
/// The chosen file is copied into a private temporary file when selected, so
/// the preview and the later upload see the same bytes even if the original
/// changes. The staged copy is removed when the preview is dropped, which
/// happens when another photo replaces it or the form closes.
#[derive(Debug)]
pub struct PhotoPreview {
    source: PathBuf,
    file_name: String,
    mime_type: &'static str,
    size_bytes: u64,
    dimensions: Option<(usize, usize)>,
    staged: NamedTempFile,
}

impl PhotoPreview {
    pub fn stage(path: impl AsRef<Path>) -> Result<Self, PhotoError> {
        let source = expand_home(path.as_ref());
        let display = source.display().to_string();

        let metadata = match fs::metadata(&source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PhotoError::NotFound(display));
            }
            Err(e) => return Err(PhotoError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(PhotoError::NotAFile(display));
        }

        let mime_type = mime_guess::from_path(&source)
            .iter_raw()
            .find(|mime| ALLOWED_MIME_TYPES.contains(mime))
            .ok_or_else(|| PhotoError::Unsupported(display.clone()))?;

        if metadata.len() > MAX_PHOTO_BYTES {
            return Err(PhotoError::TooLarge {
                size: metadata.len(),
                limit: MAX_PHOTO_BYTES,
            });
        }

        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let suffix = source
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut staged = tempfile::Builder::new()
            .prefix("saklolo-photo-")
            .suffix(&suffix)
            .tempfile()?;
        let mut original = File::open(&source)?;
        let size_bytes = io::copy(&mut original, staged.as_file_mut())?;
        staged.as_file_mut().flush()?;

        let dimensions = imagesize::size(staged.path())
            .ok()
            .map(|size| (size.width, size.height));

        log::debug!(
            "Staged photo {} at {} ({} bytes)",
            display,
            staged.path().display(),
            size_bytes
        );

        Ok(Self {
            source,
            file_name,
            mime_type,
            size_bytes,
            dimensions,
            staged,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.dimensions
    }

    pub fn staged_path(&self) -> &Path {
        self.staged.path()
    }

    /// Read the staged bytes for the multipart upload
    pub fn read_upload(&self) -> io::Result<PhotoUpload> {
        Ok(PhotoUpload {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.to_string(),
            bytes: fs::read(self.staged.path())?,
        })
    }

    /// One-line description for the form, e.g. `flood.jpg · 1280x720 · 245.3 KB`
    pub fn summary(&self) -> String {
        let mut parts = vec![self.file_name.clone()];
        if let Some((w, h)) = self.dimensions {
            parts.push(format!("{}x{}", w, h));
        }
        parts.push(format_size(self.size_bytes));
        parts.push(self.mime_type.to_string());
        parts.join(" · ")
    }
}

impl Drop for PhotoPreview {
    fn drop(&mut self) {
        log::debug!("Releasing staged photo {}", self.staged.path().display());
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG: signature plus an IHDR chunk, enough for size probing
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn stage_copies_file_and_reads_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "flood.png", &png_bytes(640, 480));

        let preview = PhotoPreview::stage(&path).unwrap();
        assert_eq!(preview.file_name(), "flood.png");
        assert_eq!(preview.mime_type(), "image/png");
        assert_eq!(preview.size_bytes(), png_bytes(640, 480).len() as u64);
        assert_eq!(preview.dimensions(), Some((640, 480)));
        assert_ne!(preview.staged_path(), path.as_path());
        assert!(preview.staged_path().exists());
        assert!(preview.summary().starts_with("flood.png · 640x480"));
    }

    #[test]
    fn staged_copy_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "fire.jpg", b"not really a jpeg");

        let preview = PhotoPreview::stage(&path).unwrap();
        let staged = preview.staged_path().to_path_buf();
        assert!(staged.exists());

        drop(preview);
        assert!(!staged.exists());
        assert!(path.exists(), "original must be left alone");
    }

    #[test]
    fn upload_uses_staged_bytes_not_the_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "quake.gif", b"GIF89a-original");

        let preview = PhotoPreview::stage(&path).unwrap();
        fs::write(&path, b"changed after selection").unwrap();

        let upload = preview.read_upload().unwrap();
        assert_eq!(upload.bytes, b"GIF89a-original");
        assert_eq!(upload.mime_type, "image/gif");
        assert_eq!(upload.file_name, "quake.gif");
    }

    #[test]
    fn rejects_missing_directories_and_non_images() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.png");
        assert!(matches!(PhotoPreview::stage(&missing), Err(PhotoError::NotFound(_))));

        let folder = dir.path().join("album.png");
        fs::create_dir(&folder).unwrap();
        assert!(matches!(PhotoPreview::stage(&folder), Err(PhotoError::NotAFile(_))));

        let text = write_file(dir.path(), "notes.txt", b"hello");
        assert!(matches!(PhotoPreview::stage(&text), Err(PhotoError::Unsupported(_))));
    }

    #[test]
    fn rejects_oversized_photos() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.jpg");
        let file = File::create(&path).unwrap();
        file.set_len(MAX_PHOTO_BYTES + 1).unwrap();

        match PhotoPreview::stage(&path) {
            Err(PhotoError::TooLarge { size, limit }) => {
                assert_eq!(size, MAX_PHOTO_BYTES + 1);
                assert_eq!(limit, MAX_PHOTO_BYTES);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn format_size_picks_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
