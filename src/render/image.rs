//! Inline images for terminals that speak the iTerm2 image protocol.
//!
//! Protocol reference: https://iterm2.com/documentation-images.html

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};

/// Why an image could not be shown. Never fatal to a render.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("image path is a directory: {}", .0.display())]
    IsDirectory(PathBuf),
    #[error("cannot read image {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Optional display size passed through to the terminal, e.g. `"40"`,
/// `"50%"`, `"200px"` or `"auto"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageHint {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl ImageHint {
    /// Parse a `"WIDTH,HEIGHT"` size string. Anything else yields no hint.
    pub fn from_size(size: &str) -> Self {
        match size.split(',').collect::<Vec<_>>().as_slice() {
            [width, height] => Self {
                width: non_empty(width),
                height: non_empty(height),
            },
            _ => Self::default(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Load `destination` relative to `root_dir` and wrap it in an inline image
/// escape sequence.
pub fn inline_image(
    destination: &str,
    root_dir: &Path,
    hint: &ImageHint,
) -> Result<String, ImageError> {
    let path = root_dir.join(destination);
    let metadata = std::fs::metadata(&path).map_err(|_| ImageError::NotFound(path.clone()))?;
    if metadata.is_dir() {
        return Err(ImageError::IsDirectory(path));
    }

    let data = std::fs::read(&path).map_err(|source| ImageError::Read {
        path: path.clone(),
        source,
    })?;
    Ok(encode(&data, hint))
}

/// Build the `OSC 1337 ; File=` sequence for raw image bytes.
pub fn encode(data: &[u8], hint: &ImageHint) -> String {
    let mut out = String::from("\x1b]1337;File=inline=1");
    if let Some(width) = &hint.width {
        out.push_str(&format!(";width={width}"));
    }
    if let Some(height) = &hint.height {
        out.push_str(&format!(";height={height}"));
    }
    out.push_str(";preserveAspectRatio=1:");
    out.push_str(&STANDARD.encode(data));
    out.push_str("\x07\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_encode_without_hint() {
        let out = encode(b"Hello, World!", &ImageHint::default());
        assert_eq!(
            out,
            "\x1b]1337;File=inline=1;preserveAspectRatio=1:SGVsbG8sIFdvcmxkIQ==\x07\n"
        );
    }

    #[test]
    fn test_encode_with_size_hint() {
        let hint = ImageHint::from_size("40,auto");
        let out = encode(b"x", &hint);
        assert!(out.starts_with("\x1b]1337;File=inline=1;width=40;height=auto;preserveAspectRatio=1:"));
    }

    #[test]
    fn test_size_hint_parsing() {
        assert_eq!(
            ImageHint::from_size("50%,"),
            ImageHint {
                width: Some("50%".into()),
                height: None
            }
        );
        assert_eq!(ImageHint::from_size("40"), ImageHint::default());
        assert_eq!(ImageHint::from_size("1,2,3"), ImageHint::default());
    }

    #[test]
    fn test_inline_image_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("img/dot.png"), b"PNG").unwrap();

        let out = inline_image("img/dot.png", dir.path(), &ImageHint::default()).unwrap();
        assert!(out.contains(":UE5H\x07"));
    }

    #[test]
    fn test_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = inline_image("nope.png", dir.path(), &ImageHint::default()).unwrap_err();
        assert!(matches!(err, ImageError::NotFound(_)));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        let err = inline_image("assets", dir.path(), &ImageHint::default()).unwrap_err();
        assert!(matches!(err, ImageError::IsDirectory(_)));
        assert!(err.to_string().contains("directory"));
    }
}
