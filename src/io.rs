//! Codec boundary: lossless import/export of the raster through the
//! `image` crate, plus the ARGB ↔ RGBA-bytes conversions it needs.
//!
//! Load is all-or-nothing — decode into a fresh pixel vector first, hand it
//! to the session, and only then does the session swap buffers. A failed
//! decode never disturbs the current canvas.

use image::codecs::bmp::BmpEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::canvas::{pack_argb, unpack_argb};
use crate::{log_err, log_info};

/// Error type for image load/save operations.
#[derive(Debug)]
pub enum CodecError {
    Io(std::io::Error),
    Decode(String),
    Encode(String),
    /// Pixel payload length does not match `width * height`.
    Dimensions {
        width: u32,
        height: u32,
        len: usize,
    },
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodecError::Io(e) => write!(f, "I/O error: {}", e),
            CodecError::Decode(e) => write!(f, "Decode error: {}", e),
            CodecError::Encode(e) => write!(f, "Encode error: {}", e),
            CodecError::Dimensions { width, height, len } => write!(
                f,
                "Pixel data length {} does not match {}x{}",
                len, width, height
            ),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(e: std::io::Error) -> Self {
        CodecError::Io(e)
    }
}

// ============================================================================
// PIXEL FORMAT CONVERSION
// ============================================================================

/// Convert packed-ARGB pixels to an RGBA byte stream (row-parallel).
pub fn argb_to_rgba_bytes(pixels: &[u32]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len() * 4];
    bytes
        .par_chunks_exact_mut(4)
        .zip(pixels.par_iter())
        .for_each(|(out, &pixel)| out.copy_from_slice(&unpack_argb(pixel)));
    bytes
}

/// Convert an RGBA byte stream to packed-ARGB pixels (row-parallel).
/// Trailing bytes that do not form a whole pixel are ignored.
pub fn rgba_bytes_to_argb(bytes: &[u8]) -> Vec<u32> {
    bytes
        .par_chunks_exact(4)
        .map(|c| pack_argb(c[0], c[1], c[2], c[3]))
        .collect()
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Encode the raster as PNG into memory.
pub fn encode_png(width: u32, height: u32, pixels: &[u32]) -> Result<Vec<u8>, CodecError> {
    check_dimensions(width, height, pixels.len())?;
    let bytes = argb_to_rgba_bytes(pixels);
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(&bytes, width, height, ColorType::Rgba8)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(out)
}

/// Decode any supported lossless container from memory into
/// `(width, height, packed-ARGB pixels)`.
pub fn decode_image(data: &[u8]) -> Result<(u32, u32, Vec<u32>), CodecError> {
    let decoded = image::load_from_memory(data).map_err(|e| CodecError::Decode(e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba_bytes_to_argb(rgba.as_raw());
    Ok((width, height, pixels))
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<(u32, u32, Vec<u32>), CodecError> {
    let data = std::fs::read(path)?;
    match decode_image(&data) {
        Ok(result) => {
            log_info!("Loaded {} ({}x{})", path.display(), result.0, result.1);
            Ok(result)
        }
        Err(e) => {
            log_err!("Failed to decode {}: {}", path.display(), e);
            Err(e)
        }
    }
}

/// Save the raster to a file, choosing the encoder from the extension
/// (`.bmp` writes BMP, anything else writes PNG).
pub fn save_image(path: &Path, width: u32, height: u32, pixels: &[u32]) -> Result<(), CodecError> {
    check_dimensions(width, height, pixels.len())?;
    let bytes = argb_to_rgba_bytes(pixels);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let result = match ext.as_str() {
        "bmp" => BmpEncoder::new(&mut writer).write_image(&bytes, width, height, ColorType::Rgba8),
        _ => PngEncoder::new(&mut writer).write_image(&bytes, width, height, ColorType::Rgba8),
    };

    match result {
        Ok(()) => {
            log_info!("Saved {} ({}x{})", path.display(), width, height);
            Ok(())
        }
        Err(e) => {
            log_err!("Failed to encode {}: {}", path.display(), e);
            Err(CodecError::Encode(e.to_string()))
        }
    }
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<(), CodecError> {
    if len != (width * height) as usize {
        return Err(CodecError::Dimensions { width, height, len });
    }
    Ok(())
}
