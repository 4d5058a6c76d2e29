//! Prediction input assets.
//!
//! The inference service only accepts HTTP URLs or data URIs, so local
//! files and the synthetic warm source are inlined as base64.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::Rgb;

use crate::error::{PredictError, PredictResult};

/// Generate the tiny synthetic source image used for warm-up calls,
/// as a base64 JPEG data URI.
///
/// A few dark blocks on a light field, enough for the upstream face
/// pipeline to run its full path without a real photo.
pub fn placeholder_face_jpeg() -> PredictResult<String> {
    let mut img = image::RgbImage::from_pixel(64, 64, Rgb([240, 240, 240]));

    fill_rect(&mut img, 20, 20, 8, 8); // left eye
    fill_rect(&mut img, 36, 20, 8, 8); // right eye
    fill_rect(&mut img, 28, 36, 8, 4); // mouth

    let mut buf = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 70);
    img.write_with_encoder(encoder)
        .map_err(|e| PredictError::Asset(format!("placeholder encode: {}", e)))?;

    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&buf)))
}

fn fill_rect(img: &mut image::RgbImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, Rgb([51, 51, 51]));
        }
    }
}

/// Read a local GIF and inline it as a base64 data URI.
pub async fn gif_data_uri(path: impl AsRef<Path>) -> PredictResult<String> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PredictError::Asset(format!("failed to read {}: {}", path.display(), e)))?;

    Ok(format!("data:image/gif;base64,{}", STANDARD.encode(&bytes)))
}
