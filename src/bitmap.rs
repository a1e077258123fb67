use crate::grid::PixelGrid;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
#[cfg(feature = "serde")]
use serde::Serialize;

//===========================================================================//

/// The size of a BITMAPINFOHEADER struct, in bytes.
pub const BMP_HEADER_LEN: u32 = 40;

/// The color depth of every encoded image.
pub const BITS_PER_PIXEL: u16 = 32;

// The largest value of the 7-bit transparency scale (fully transparent).
const TRANSPARENCY_MAX: u8 = 127;

// Encoded alpha values at or below this are marked transparent in the mask.
const MASK_THRESHOLD: u8 = 127;

//===========================================================================//

/// Reduces a straight 8-bit alpha value (255 = opaque) to the 7-bit
/// transparency scale (0 = opaque, 127 = fully transparent) that
/// [`legacy_alpha`] expects.
pub fn transparency(alpha: u8) -> u8 {
    TRANSPARENCY_MAX - (alpha >> 1)
}

/// Re-expresses a 7-bit transparency value as the 8-bit alpha stored in the
/// color array: `(1 - transparency / 127) * 255`, truncated.
pub fn legacy_alpha(transparency: u8) -> u8 {
    let transparency = transparency.min(TRANSPARENCY_MAX) as f64;
    ((1.0 - transparency / TRANSPARENCY_MAX as f64) * 255.0) as u8
}

//===========================================================================//

/// One image encoded as an uncompressed 32 bpp BMP, ready to be placed in an
/// ICO file.  Only [`EncodedImage::encode`] can create one.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EncodedImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl EncodedImage {
    /// Encodes a pixel grid as a BMP header, followed by the color array and
    /// then the 1 bpp AND mask.  Both arrays are stored row by row, starting
    /// from the *bottom* row.
    pub fn encode(grid: &PixelGrid) -> EncodedImage {
        let width = grid.width() as usize;
        let height = grid.height() as usize;
        let color_size = 4 * width * height;
        let mask_row_size = mask_row_size(grid.width());
        let data_size =
            BMP_HEADER_LEN as usize + color_size + mask_row_size * height;
        let mut data = vec![0u8; data_size];
        let (header, rest) = data.split_at_mut(BMP_HEADER_LEN as usize);
        let (color, mask) = rest.split_at_mut(color_size);

        // Write the BITMAPINFOHEADER struct.  The height is doubled because
        // it counts the rows of both the color data and the mask.  The
        // image size, resolution and color table fields stay zero.
        LittleEndian::write_u32(&mut header[0..4], BMP_HEADER_LEN);
        LittleEndian::write_i32(&mut header[4..8], grid.width() as i32);
        LittleEndian::write_i32(&mut header[8..12], 2 * grid.height() as i32);
        LittleEndian::write_u16(&mut header[12..14], 1); // planes
        LittleEndian::write_u16(&mut header[14..16], BITS_PER_PIXEL);
        LittleEndian::write_u32(&mut header[16..20], 0); // compression

        let color_rows = color.chunks_exact_mut(4 * width);
        let mask_rows = mask.chunks_exact_mut(mask_row_size);
        let rows = grid.rows_bottom_up().zip(color_rows).zip(mask_rows);
        for ((row, color_row), mask_row) in rows {
            let mut bits: u32 = 0;
            for (col, pixel) in row.chunks_exact(4).enumerate() {
                let alpha = legacy_alpha(transparency(pixel[3]));
                let word = u32::from(pixel[2])
                    | u32::from(pixel[1]) << 8
                    | u32::from(pixel[0]) << 16
                    | u32::from(alpha) << 24;
                LittleEndian::write_u32(&mut color_row[(4 * col)..][..4], word);
                bits = (bits << 1) | u32::from(alpha <= MASK_THRESHOLD);
                if col % 32 == 31 {
                    let start = 4 * (col / 32);
                    BigEndian::write_u32(&mut mask_row[start..][..4], bits);
                    bits = 0;
                }
            }
            // Pad the last word of a row with zero bits.
            let num_bits = width % 32;
            if num_bits > 0 {
                let start = 4 * (width / 32);
                BigEndian::write_u32(
                    &mut mask_row[start..][..4],
                    bits << (32 - num_bits),
                );
            }
        }

        log::debug!(
            "Encoded {}x{} grid as {}-byte BMP",
            width,
            height,
            data.len()
        );
        EncodedImage { width: grid.width(), height: grid.height(), data }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of colors in the palette, which is always zero
    /// since images are stored as true color.
    pub fn color_palette_colors(&self) -> u8 {
        0
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u16 {
        BITS_PER_PIXEL
    }

    /// Returns the length of the encoded data, in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the raw, encoded image data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

// Each row of the mask is padded to a multiple of 32 bits.
fn mask_row_size(width: u32) -> usize {
    4 * ((width as usize + 31) / 32)
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{legacy_alpha, transparency, EncodedImage, PixelGrid};

    #[test]
    fn legacy_alpha_scale() {
        assert_eq!(legacy_alpha(0), 255);
        assert_eq!(legacy_alpha(127), 0);
        // 255 * 64 / 127 = 128.5..., 255 * 63 / 127 = 126.4...
        assert_eq!(legacy_alpha(63), 128);
        assert_eq!(legacy_alpha(64), 126);
        assert_eq!(legacy_alpha(200), 0);
    }

    #[test]
    fn transparency_scale() {
        assert_eq!(transparency(255), 0);
        assert_eq!(transparency(254), 0);
        assert_eq!(transparency(128), 63);
        assert_eq!(transparency(127), 64);
        assert_eq!(transparency(0), 127);
    }

    #[test]
    fn encode_two_by_two() {
        let rgba: &[u8] = b"\
            \xff\x00\x00\xff\x00\xff\x00\xff\
            \x00\x00\xff\xff\x10\x20\x30\x00";
        let grid = PixelGrid::from_rgba_data(2, 2, rgba.to_vec());
        let image = EncodedImage::encode(&grid);
        let expected: &[u8] = b"\
            \x28\x00\x00\x00\x02\x00\x00\x00\x04\x00\x00\x00\
            \x01\x00\x20\x00\x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x00\x00\
            \
            \xff\x00\x00\xff\x30\x20\x10\x00\
            \x00\x00\xff\xff\x00\xff\x00\xff\
            \
            \x40\x00\x00\x00\
            \x00\x00\x00\x00";
        assert_eq!(image.data(), expected);
        assert_eq!(image.size(), expected.len());
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 2);
        assert_eq!(image.bits_per_pixel(), 32);
        assert_eq!(image.color_palette_colors(), 0);
    }

    #[test]
    fn mask_bits_at_threshold() {
        // Alpha 128 encodes to 128 (opaque in the mask), alpha 127 encodes
        // to 126 (transparent in the mask).
        let rgba: &[u8] = b"\x00\x00\x00\x80\x00\x00\x00\x7f";
        let grid = PixelGrid::from_rgba_data(2, 1, rgba.to_vec());
        let image = EncodedImage::encode(&grid);
        let color = &image.data()[40..48];
        assert_eq!(color, b"\x00\x00\x00\x80\x00\x00\x00\x7e");
        assert_eq!(&image.data()[48..], b"\x40\x00\x00\x00");
    }

    #[test]
    fn mask_rows_wider_than_one_word() {
        // 33 pixels per row needs two mask words per row; only the last
        // pixel of the top row is transparent.
        let mut rgba = [0xffu8; 4].repeat(33 * 2);
        rgba[4 * 32 + 3] = 0;
        let grid = PixelGrid::from_rgba_data(33, 2, rgba);
        let image = EncodedImage::encode(&grid);
        assert_eq!(image.size(), 40 + 4 * 33 * 2 + 8 * 2);
        let mask = &image.data()[(40 + 4 * 33 * 2)..];
        let expected: &[u8] = b"\
            \x00\x00\x00\x00\x00\x00\x00\x00\
            \x00\x00\x00\x00\x80\x00\x00\x00";
        assert_eq!(mask, expected);
    }

    #[test]
    fn mask_rows_of_whole_words() {
        // 64 pixels per row fill exactly two mask words, with no padding
        // word; the last pixel of the bottom row is transparent.
        let mut rgba = [0xffu8; 4].repeat(64 * 2);
        rgba[4 * (64 + 63) + 3] = 0;
        let grid = PixelGrid::from_rgba_data(64, 2, rgba);
        let image = EncodedImage::encode(&grid);
        assert_eq!(image.size(), 40 + 4 * 64 * 2 + 8 * 2);
        let mask = &image.data()[(40 + 4 * 64 * 2)..];
        let expected: &[u8] = b"\
            \x00\x00\x00\x00\x00\x00\x00\x01\
            \x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(mask, expected);
        let color = &image.data()[40..(40 + 4 * 64)];
        assert_eq!(&color[(4 * 63)..], b"\xff\xff\xff\x00");
    }

    #[test]
    fn mask_word_is_big_endian() {
        // The first pixel of a 32-pixel row is the most significant bit.
        let mut rgba = [0xffu8; 4].repeat(32);
        rgba[3] = 0;
        rgba[4 * 31 + 3] = 0;
        let grid = PixelGrid::from_rgba_data(32, 1, rgba);
        let image = EncodedImage::encode(&grid);
        assert_eq!(&image.data()[(40 + 128)..], b"\x80\x00\x00\x01");
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut rgba = Vec::new();
        for index in 0..(7 * 5) {
            rgba.extend_from_slice(&[index as u8, 0x40, 0x80, index * 7]);
        }
        let grid = PixelGrid::from_rgba_data(7, 5, rgba);
        assert_eq!(EncodedImage::encode(&grid), EncodedImage::encode(&grid));
    }
}

//===========================================================================//
