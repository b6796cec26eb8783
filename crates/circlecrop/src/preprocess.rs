//! Grayscale conversion and smoothing ahead of detection.

use image::{GrayImage, RgbImage};

use crate::config::PreprocessConfig;

/// Convert to single-channel luma and median-filter it.
///
/// The median keeps step edges sharp while removing sensor speckle, which keeps
/// the edge map used by the detector clean.
pub fn preprocess(src: &RgbImage, config: &PreprocessConfig) -> GrayImage {
    smooth(&to_gray(src), config)
}

pub(crate) fn to_gray(src: &RgbImage) -> GrayImage {
    image::imageops::grayscale(src)
}

pub(crate) fn smooth(gray: &GrayImage, config: &PreprocessConfig) -> GrayImage {
    if config.median_radius == 0 {
        return gray.clone();
    }
    imageproc::filter::median_filter(gray, config.median_radius, config.median_radius)
}
