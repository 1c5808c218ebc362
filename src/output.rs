//! Texture and source file output

use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// File extension that maps to no supported texture format
    UnsupportedFormat(PathBuf),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::UnsupportedFormat(path) => {
                write!(f, "Unsupported texture format for {} (expected .png or .tga)", path.display())
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Lossless texture file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextureFormat {
    #[default]
    Png,
    Tga,
}

impl TextureFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            TextureFormat::Png => "png",
            TextureFormat::Tga => "tga",
        }
    }

    /// Format implied by a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(TextureFormat::Png),
            "tga" => Some(TextureFormat::Tga),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            TextureFormat::Png => ImageFormat::Png,
            TextureFormat::Tga => ImageFormat::Tga,
        }
    }
}

impl std::fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Path of a texture named `stem` inside `dir`.
pub fn texture_path(dir: &Path, stem: &str, format: TextureFormat) -> PathBuf {
    dir.join(format!("{}.{}", stem, format.extension()))
}

/// Save a texture, picking the format from the file extension.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`OutputError::UnsupportedFormat`] if the extension is neither
/// `png` nor `tga`, before anything is written.
pub fn save_texture(image: &DynamicImage, path: &Path) -> Result<(), OutputError> {
    let format =
        TextureFormat::from_path(path).ok_or_else(|| OutputError::UnsupportedFormat(path.to_path_buf()))?;
    create_parent_dirs(path)?;
    image.save_with_format(path, format.image_format())?;
    Ok(())
}

/// Write generated source text to a file, creating parent directories.
pub fn save_source(contents: &str, path: &Path) -> Result<(), OutputError> {
    create_parent_dirs(path)?;
    std::fs::write(path, contents)?;
    Ok(())
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
