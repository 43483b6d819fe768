//! Uncompressed 24-bit BMP encoding of a finished radiance buffer.
//!
//! The layout is fixed: a 54-byte header (14-byte file header + 40-byte info
//! header), scanlines stored bottom to top, each padded to a multiple of four
//! bytes, channels in BGR order, every channel gamma-encoded with exponent
//! 1/2.2 from its linear [0, 1] value.

use crate::renderer::ImageBuffer;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Failure to encode or write the bitmap.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write bitmap: {0}")]
    Io(#[from] io::Error),
}

const HEADER_SIZE: u32 = 54;

/// Gamma-encode a linear channel value to a byte, exponent 1/2.2.
fn gamma_encode(v: f64) -> u8 {
    (v.clamp(0.0, 1.0).powf(1.0 / 2.2) * 255.0 + 0.5) as u8
}

/// Encode `image` as a 24-bit BMP into `sink`.
pub fn write_bmp<W: Write>(image: &ImageBuffer, sink: &mut W) -> Result<(), EncodeError> {
    let width = image.width;
    let height = image.height;
    // The size field counts unpadded rows, matching the reference artifact;
    // readers take row stride from the dimensions anyway.
    let file_size = HEADER_SIZE + 3 * width * height;

    let mut file_header = [0u8; 14];
    file_header[0] = b'B';
    file_header[1] = b'M';
    file_header[2..6].copy_from_slice(&file_size.to_le_bytes());
    file_header[10..14].copy_from_slice(&HEADER_SIZE.to_le_bytes());

    let mut info_header = [0u8; 40];
    info_header[0..4].copy_from_slice(&40u32.to_le_bytes());
    info_header[4..8].copy_from_slice(&width.to_le_bytes());
    info_header[8..12].copy_from_slice(&height.to_le_bytes());
    info_header[12..14].copy_from_slice(&1u16.to_le_bytes()); // planes
    info_header[14..16].copy_from_slice(&24u16.to_le_bytes()); // bits per pixel

    sink.write_all(&file_header)?;
    sink.write_all(&info_header)?;

    let padding = [0u8; 3];
    let pad_len = (4 - (width as usize * 3) % 4) % 4;
    let mut row = Vec::with_capacity(width as usize * 3 + pad_len);

    // Bottom scanline first.
    for y in (0..height).rev() {
        row.clear();
        for x in 0..width {
            let c = image.get(x, y);
            row.push(gamma_encode(c.z));
            row.push(gamma_encode(c.y));
            row.push(gamma_encode(c.x));
        }
        row.extend_from_slice(&padding[..pad_len]);
        sink.write_all(&row)?;
    }

    Ok(())
}

/// Encode `image` to the file at `path`.
pub fn save_bmp(image: &ImageBuffer, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_bmp(image, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cornell_math::DVec3;

    fn encode(image: &ImageBuffer) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_bmp(image, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_black_image_layout() {
        let image = ImageBuffer::new(2, 2);
        let bytes = encode(&image);

        // 54-byte header + two rows of 6 pixel bytes padded to 8.
        assert_eq!(bytes.len(), 54 + 2 * 8);
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(bytes[18..22].try_into().unwrap()), 2);
        assert_eq!(u32::from_le_bytes(bytes[22..26].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(bytes[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(bytes[28..30].try_into().unwrap()), 24);
        assert!(bytes[54..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_channel_order_and_row_flip() {
        // 1x2 image: red on the top row, blue on the bottom.
        let mut image = ImageBuffer::new(1, 2);
        image.pixels[0] = DVec3::new(1.0, 0.0, 0.0);
        image.pixels[1] = DVec3::new(0.0, 0.0, 1.0);

        let bytes = encode(&image);
        // Rows are 3 bytes + 1 pad; the bottom (blue) row is written first.
        assert_eq!(bytes.len(), 54 + 2 * 4);
        assert_eq!(&bytes[54..57], &[255, 0, 0]); // BGR: blue pixel
        assert_eq!(bytes[57], 0); // padding
        assert_eq!(&bytes[58..61], &[0, 0, 255]); // BGR: red pixel
    }

    #[test]
    fn test_gamma_encode_endpoints() {
        assert_eq!(gamma_encode(0.0), 0);
        assert_eq!(gamma_encode(1.0), 255);
        // Out-of-range values clamp instead of wrapping.
        assert_eq!(gamma_encode(2.0), 255);
        assert_eq!(gamma_encode(-1.0), 0);
        // Gamma lifts mid-tones well above the linear value.
        assert_eq!(gamma_encode(0.25), (0.25f64.powf(1.0 / 2.2) * 255.0 + 0.5) as u8);
        assert!(gamma_encode(0.25) > 128);
    }
}
