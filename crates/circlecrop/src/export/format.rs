use std::fmt;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, RgbaImage};

use crate::error::{UsageError, WriteError};

/// Accepted output extensions, with leading dot.
pub const VALID_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".bmp"];

/// Encoder family selected by the output extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Whether the encoded file keeps the alpha channel.
    pub fn keeps_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

/// Normalized output extension (always with a leading dot).
///
/// The text is kept as given, so `.jpeg` and `.jpg` both select JPEG but
/// produce differently named files.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputExtension {
    ext: String,
    format: OutputFormat,
}

impl OutputExtension {
    pub fn as_str(&self) -> &str {
        &self.ext
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl Default for OutputExtension {
    fn default() -> Self {
        Self {
            ext: ".png".to_string(),
            format: OutputFormat::Png,
        }
    }
}

impl FromStr for OutputExtension {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let ext = if trimmed.starts_with('.') {
            trimmed.to_string()
        } else {
            format!(".{trimmed}")
        };
        let format = match ext.as_str() {
            ".png" => OutputFormat::Png,
            ".jpg" | ".jpeg" => OutputFormat::Jpeg,
            ".bmp" => OutputFormat::Bmp,
            _ => return Err(UsageError::InvalidExtension { given: ext }),
        };
        Ok(Self { ext, format })
    }
}

impl TryFrom<String> for OutputExtension {
    type Error = UsageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputExtension> for String {
    fn from(value: OutputExtension) -> Self {
        value.ext
    }
}

impl fmt::Display for OutputExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ext)
    }
}

/// PNG-style 0..9 compression level mapped onto the encoder presets.
pub(crate) fn png_compression(level: i32) -> CompressionType {
    match level {
        i32::MIN..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode `image` into a new file at `path`.
pub(crate) fn write_image(
    image: &RgbaImage,
    path: &Path,
    format: OutputFormat,
    compression: i32,
    jpeg_quality: u8,
) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let encoded = match format {
        OutputFormat::Png => image.write_with_encoder(PngEncoder::new_with_quality(
            &mut writer,
            png_compression(compression),
            PngFilter::Adaptive,
        )),
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, jpeg_quality))
        }
        OutputFormat::Bmp => image.write_with_encoder(BmpEncoder::new(&mut writer)),
    };
    encoded.map_err(|source| WriteError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn extension_gets_leading_dot() {
        let e: OutputExtension = "png".parse().unwrap();
        assert_eq!(e.as_str(), ".png");
        assert_eq!(e.format(), OutputFormat::Png);

        let e: OutputExtension = ".jpeg".parse().unwrap();
        assert_eq!(e.as_str(), ".jpeg");
        assert_eq!(e.format(), OutputFormat::Jpeg);

        for ext in VALID_EXTENSIONS {
            assert!(ext.parse::<OutputExtension>().is_ok(), "{ext}");
        }
    }

    #[test]
    fn unsupported_extensions_are_usage_errors() {
        for bad in [".gif", "tiff", "", ".PNG"] {
            assert!(
                matches!(
                    bad.parse::<OutputExtension>(),
                    Err(UsageError::InvalidExtension { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn extension_serializes_as_plain_string() {
        let e: OutputExtension = "bmp".parse().unwrap();
        assert_eq!(serde_json::to_string(&e).unwrap(), "\".bmp\"");
        let back: OutputExtension = serde_json::from_str("\"jpg\"").unwrap();
        assert_eq!(back.as_str(), ".jpg");
        assert!(serde_json::from_str::<OutputExtension>("\".gif\"").is_err());
    }

    #[test]
    fn compression_levels_map_to_presets() {
        assert!(matches!(png_compression(0), CompressionType::Fast));
        assert!(matches!(png_compression(-4), CompressionType::Fast));
        assert!(matches!(png_compression(5), CompressionType::Default));
        assert!(matches!(png_compression(9), CompressionType::Best));
        assert!(matches!(png_compression(42), CompressionType::Best));
    }

    #[test]
    fn every_format_round_trips_dimensions() {
        let dir = crate::test_utils::TempDir::new("format");
        let mut img = RgbaImage::from_pixel(8, 6, Rgba([200, 100, 50, 255]));
        img.put_pixel(0, 0, Rgba([1, 2, 3, 0]));

        for (name, format) in [
            ("a.png", OutputFormat::Png),
            ("a.bmp", OutputFormat::Bmp),
            ("a.jpg", OutputFormat::Jpeg),
        ] {
            let path = dir.path().join(name);
            write_image(&img, &path, format, 9, 95).unwrap();
            let back = image::open(&path).unwrap();
            assert_eq!((back.width(), back.height()), (8, 6), "{name}");
        }

        let jpg = image::open(dir.path().join("a.jpg")).unwrap();
        assert!(!jpg.color().has_alpha());

        let png = image::open(dir.path().join("a.png")).unwrap().into_rgba8();
        assert_eq!(png, img);
    }

    #[test]
    fn missing_parent_directory_is_an_io_error() {
        let dir = crate::test_utils::TempDir::new("format-missing");
        let path = dir.path().join("nope").join("a.png");
        let img = RgbaImage::new(2, 2);
        let err = write_image(&img, &path, OutputFormat::Png, 0, 95).unwrap_err();
        assert!(matches!(err, WriteError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
    }
}
