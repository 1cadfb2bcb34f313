//! Flat fallback icon encoded without any imaging library

use super::{IconError, Rgba};
use crate::png;

/// Whether (x, y) lies in the white central half of the icon
fn in_center(x: u32, y: u32, size: u32) -> bool {
    let lo = size / 4;
    let hi = 3 * size / 4;
    (lo..hi).contains(&x) && (lo..hi).contains(&y)
}

/// Row-major RGBA pixels: white centre, purple everywhere else
pub fn simple_icon_rgba(size: u32) -> Vec<u8> {
    let mut rgba = Vec::with_capacity((size * size) as usize * png::BYTES_PER_PIXEL);

    for y in 0..size {
        for x in 0..size {
            let pixel = if in_center(x, y, size) {
                Rgba::WHITE
            } else {
                Rgba::PURPLE
            };
            rgba.extend_from_slice(&pixel.to_array());
        }
    }

    rgba
}

/// Encode the flat icon as a complete PNG file
pub fn encode_simple_icon(size: u32) -> Result<Vec<u8>, IconError> {
    let rgba = simple_icon_rgba(size);
    Ok(png::encode_rgba(size, size, &rgba)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::ICON_SIZES;
    use crate::png::{ChunkReader, ColorType, ImageHeader, IDAT, IEND, IHDR, SIGNATURE};
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn pixel_at(rgba: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * size + x) * 4) as usize;
        [rgba[idx], rgba[idx + 1], rgba[idx + 2], rgba[idx + 3]]
    }

    #[test]
    fn test_structure_for_all_sizes() {
        for size in ICON_SIZES {
            let bytes = encode_simple_icon(size).unwrap();
            assert_eq!(&bytes[..8], &SIGNATURE);

            let chunks: Vec<_> = ChunkReader::new(&bytes)
                .unwrap()
                .collect::<Result<_, _>>()
                .unwrap();
            let kinds: Vec<_> = chunks.iter().map(|c| c.kind).collect();
            assert_eq!(kinds, vec![IHDR, IDAT, IEND], "size {}", size);

            let header = ImageHeader::parse(chunks[0].data).unwrap();
            assert_eq!(header.width, size);
            assert_eq!(header.height, size);
            assert_eq!(header.bit_depth, 8);
            assert_eq!(header.color_type, ColorType::TruecolorAlpha);
            assert!(chunks[2].data.is_empty());
        }
    }

    #[test]
    fn test_ihdr_payload_for_16() {
        let bytes = encode_simple_icon(16).unwrap();
        let ihdr = ChunkReader::new(&bytes).unwrap().next().unwrap().unwrap();
        assert_eq!(ihdr.kind, IHDR);
        assert_eq!(
            ihdr.data,
            &[0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x10, 0x08, 0x06, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_idat_unfilters_to_pixel_buffer() {
        for size in ICON_SIZES {
            let bytes = encode_simple_icon(size).unwrap();
            let idat = ChunkReader::new(&bytes)
                .unwrap()
                .map(Result::unwrap)
                .find(|c| c.kind == IDAT)
                .unwrap();

            let mut raw = Vec::new();
            ZlibDecoder::new(idat.data).read_to_end(&mut raw).unwrap();

            let stride = 1 + size as usize * 4;
            assert_eq!(raw.len(), stride * size as usize);
            let pixels: Vec<u8> = raw
                .chunks_exact(stride)
                .flat_map(|row| {
                    assert_eq!(row[0], 0);
                    row[1..].iter().copied()
                })
                .collect();
            assert_eq!(pixels.len(), (size * size * 4) as usize);
            assert_eq!(pixels, simple_icon_rgba(size));
        }
    }

    #[test]
    fn test_center_white_corner_purple() {
        for size in ICON_SIZES {
            let rgba = simple_icon_rgba(size);
            assert_eq!(pixel_at(&rgba, size, size / 2, size / 2), Rgba::WHITE.to_array());
            assert_eq!(pixel_at(&rgba, size, 0, 0), Rgba::PURPLE.to_array());
            assert_eq!(
                pixel_at(&rgba, size, size - 1, size - 1),
                Rgba::PURPLE.to_array()
            );
            // Half-open bounds: 3*size/4 is already border
            assert_eq!(
                pixel_at(&rgba, size, 3 * size / 4, size / 2),
                Rgba::PURPLE.to_array()
            );
            assert_eq!(
                pixel_at(&rgba, size, size / 4, size / 4),
                Rgba::WHITE.to_array()
            );
        }
    }

    #[test]
    fn test_round_trip_through_image_crate() {
        for size in ICON_SIZES {
            let bytes = encode_simple_icon(size).unwrap();
            let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)
                .unwrap()
                .to_rgba8();
            assert_eq!(decoded.dimensions(), (size, size));

            for (x, y, pixel) in decoded.enumerate_pixels() {
                let expected = if in_center(x, y, size) {
                    Rgba::WHITE
                } else {
                    Rgba::PURPLE
                };
                assert_eq!(pixel.0, expected.to_array(), "({}, {}) at {}px", x, y, size);
            }
        }
    }
}
