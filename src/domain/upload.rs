//! Leaf image uploads and the drop-zone filter.
//!
//! A "drop" is whatever text the terminal hands us when a file is dragged
//! onto it or a path is pasted: possibly quoted, backslash-escaped, or a
//! `file://` URL. Only a single `.jpeg`, `.jpg` or `.png` file is accepted.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::engine::general_purpose;
use base64::Engine;

/// Extensions accepted by the drop zone.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// Reasons a drop is rejected. A rejected drop never changes the session.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Nothing was dropped")]
    Empty,

    #[error("Only one image can be analyzed at a time")]
    MultipleFiles,

    #[error("Unsupported file type: {0} (supports .jpg, .jpeg, .png)")]
    UnsupportedType(String),

    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Image formats the endpoint accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Classify a file name by extension (case-insensitive).
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    #[must_use]
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// A selected leaf photo, ready to be sent.
///
/// Bytes are shared so the worker thread can hold the upload while the
/// session keeps its own handle for the preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    kind: ImageKind,
    bytes: Arc<[u8]>,
    dimensions: Option<(u32, u32)>,
}

impl ImageUpload {
    /// Build an upload from in-memory bytes, applying the extension filter.
    ///
    /// # Errors
    /// Returns `UploadError::UnsupportedType` for anything but jpeg/jpg/png.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = file_name.into();
        let kind = ImageKind::from_file_name(&file_name)
            .ok_or_else(|| UploadError::UnsupportedType(file_name.clone()))?;
        let dimensions = decode_dimensions(kind, &bytes);
        Ok(Self {
            file_name,
            kind,
            bytes: bytes.into(),
            dimensions,
        })
    }

    /// Read an upload from disk. The extension is checked before any I/O.
    ///
    /// # Errors
    /// Returns `UploadError` if the type is not accepted or the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if ImageKind::from_file_name(&file_name).is_none() {
            return Err(UploadError::UnsupportedType(file_name));
        }

        let bytes = std::fs::read(path).map_err(|source| UploadError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_bytes(file_name, bytes)
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// `data:` URL of the image, used as the preview reference.
    #[must_use]
    pub fn preview_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.kind.mime(),
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Pixel dimensions, decoded from the header when the upload was built.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

fn decode_dimensions(kind: ImageKind, bytes: &[u8]) -> Option<(u32, u32)> {
    let format = match kind {
        ImageKind::Jpeg => image::ImageFormat::Jpeg,
        ImageKind::Png => image::ImageFormat::Png,
    };
    image::io::Reader::with_format(std::io::Cursor::new(bytes), format)
        .into_dimensions()
        .ok()
}

/// Turn raw dropped text into exactly one path.
///
/// # Errors
/// Returns `UploadError::Empty` or `UploadError::MultipleFiles`.
pub fn parse_dropped_path(text: &str) -> Result<PathBuf, UploadError> {
    let entries: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let entry = match entries.as_slice() {
        [] => return Err(UploadError::Empty),
        [one] => *one,
        _ => return Err(UploadError::MultipleFiles),
    };

    let unquoted = strip_quotes(entry);
    if let Some(rest) = unquoted.strip_prefix("file://") {
        // file://host/path is rare in practice; treat localhost like no host.
        let rest = rest.strip_prefix("localhost").unwrap_or(rest);
        return Ok(PathBuf::from(percent_decode(rest)));
    }

    if unquoted.len() != entry.len() {
        return Ok(PathBuf::from(unquoted));
    }

    // Unquoted: shell-style escapes, and unescaped spaces split paths.
    let mut path = String::with_capacity(entry.len());
    let mut chars = entry.chars();
    let mut pieces = 1;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    path.push(next);
                }
            }
            ' ' => {
                pieces += 1;
                path.push(c);
            }
            _ => path.push(c),
        }
    }

    if pieces > 1 && !Path::new(&path).exists() {
        let looks_like_list = entry
            .split(' ')
            .filter(|p| !p.is_empty())
            .all(|p| Path::new(p).extension().is_some());
        if looks_like_list {
            return Err(UploadError::MultipleFiles);
        }
    }

    Ok(PathBuf::from(path))
}

/// Apply the full drop-zone filter: parse, check type, read.
///
/// # Errors
/// Returns the reason the drop was rejected.
pub fn accept_drop(text: &str) -> Result<ImageUpload, UploadError> {
    let path = parse_dropped_path(text)?;
    ImageUpload::from_path(&path)
}

fn strip_quotes(s: &str) -> &str {
    for q in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(v) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(v);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // 1x1 transparent PNG
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("agri-detect-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, bytes).expect("write temp file");
        path
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ImageKind::from_file_name("leaf.jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_file_name("leaf.JPEG"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_file_name("leaf.Png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_file_name("leaf.gif"), None);
        assert_eq!(ImageKind::from_file_name("leaf"), None);
    }

    #[test]
    fn test_preview_url_is_data_url() {
        let upload = ImageUpload::from_bytes("a.png", vec![1, 2, 3]).expect("accepted");
        assert_eq!(upload.preview_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_dimensions_from_png_header() {
        let upload = ImageUpload::from_bytes("dot.png", TINY_PNG.to_vec()).expect("accepted");
        assert_eq!(upload.dimensions(), Some((1, 1)));

        let junk = ImageUpload::from_bytes("junk.jpg", vec![0, 1, 2]).expect("accepted");
        assert_eq!(junk.dimensions(), None);
    }

    #[test]
    fn test_dimensions_survive_clone() {
        let upload = ImageUpload::from_bytes("dot.png", TINY_PNG.to_vec()).expect("accepted");
        let shared = upload.clone();
        assert_eq!(shared.dimensions(), Some((1, 1)));
        assert_eq!(shared, upload);
    }

    #[test]
    fn test_parse_plain_and_quoted_paths() {
        assert_eq!(
            parse_dropped_path("  /tmp/leaf.jpg \n").expect("one path"),
            PathBuf::from("/tmp/leaf.jpg")
        );
        assert_eq!(
            parse_dropped_path("'/tmp/my leaf.jpg'").expect("one path"),
            PathBuf::from("/tmp/my leaf.jpg")
        );
        assert_eq!(
            parse_dropped_path(r"/tmp/my\ leaf.jpg").expect("one path"),
            PathBuf::from("/tmp/my leaf.jpg")
        );
    }

    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            parse_dropped_path("file:///tmp/my%20leaf.png").expect("one path"),
            PathBuf::from("/tmp/my leaf.png")
        );
    }

    #[test]
    fn test_parse_rejects_multiple_and_empty() {
        assert!(matches!(
            parse_dropped_path("/tmp/a.jpg\n/tmp/b.jpg"),
            Err(UploadError::MultipleFiles)
        ));
        assert!(matches!(
            parse_dropped_path("/nonexistent/a.jpg /nonexistent/b.png"),
            Err(UploadError::MultipleFiles)
        ));
        assert!(matches!(parse_dropped_path("  \n "), Err(UploadError::Empty)));
    }

    #[test]
    fn test_accept_drop_reads_file() {
        let path = temp_file("accept.png", TINY_PNG);
        let upload = accept_drop(&path.display().to_string()).expect("accepted");
        assert_eq!(upload.file_name(), "accept.png");
        assert_eq!(upload.kind(), ImageKind::Png);
        assert_eq!(upload.size_bytes(), TINY_PNG.len());
    }

    #[test]
    fn test_accept_drop_rejects_wrong_type_before_reading() {
        let path = temp_file("notes.txt", b"hello");
        assert!(matches!(
            accept_drop(&path.display().to_string()),
            Err(UploadError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_accept_drop_missing_file() {
        assert!(matches!(
            accept_drop("/definitely/not/here/leaf.jpg"),
            Err(UploadError::Unreadable { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_only_accepted_extensions_pass(stem in "[a-z]{1,8}", ext in "[a-zA-Z]{1,5}") {
            let name = format!("{stem}.{ext}");
            let accepted = ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str());
            prop_assert_eq!(ImageUpload::from_bytes(name, vec![0]).is_ok(), accepted);
        }
    }
}
