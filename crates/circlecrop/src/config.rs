use crate::detector::HoughConfig;
use crate::error::UsageError;
use crate::export::ExportConfig;

/// Smoothing applied before detection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Median filter radius; the kernel side is `2 * radius + 1`.
    pub median_radius: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { median_radius: 2 }
    }
}

/// Bounds used to downscale diagnostic previews.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        // Three quarters of a 1920x1080 screen's width, full height.
        Self {
            max_width: 1920 * 3 / 4,
            max_height: 1080,
        }
    }
}

/// Everything a [`crate::Pipeline`] needs, fixed at construction.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub preprocess: PreprocessConfig,
    pub hough: HoughConfig,
    pub export: ExportConfig,
    pub preview: PreviewConfig,
}

/// Parse a resolution list such as `[1000,500,250]`.
///
/// Brackets and whitespace around entries are optional. Every entry must be a
/// positive integer and the list must not be empty.
pub fn parse_resolutions(s: &str) -> Result<Vec<u32>, UsageError> {
    let invalid = || UsageError::InvalidResolutions {
        given: s.to_string(),
    };
    let inner = s.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|part| match part.trim().parse::<u32>() {
            Ok(r) if r > 0 => Ok(r),
            _ => Err(invalid()),
        })
        .collect()
}

/// Parse a compression level. Any integer is accepted; range mapping happens at encode time.
pub fn parse_compression(s: &str) -> Result<i32, UsageError> {
    s.trim()
        .parse()
        .map_err(|_| UsageError::InvalidCompression {
            given: s.to_string(),
        })
}
