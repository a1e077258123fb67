#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io;

//===========================================================================//

// Size limits for a pixel grid:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

//===========================================================================//

/// A rectangular grid of true-color pixels with per-pixel alpha, ready to be
/// encoded into an icon.
///
/// Pixels are stored as straight (non-premultiplied) RGBA, one byte per
/// channel, in row-major order from top to bottom.  An alpha of 255 is fully
/// opaque and an alpha of 0 is fully transparent.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPixelGrid"))]
pub struct PixelGrid {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl PixelGrid {
    /// Creates a new grid with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> PixelGrid {
        match PixelGrid::try_from_rgba_data(width, height, rgba_data) {
            Ok(grid) => grid,
            Err(error) => panic!("{}", error),
        }
    }

    /// Like [`PixelGrid::from_rgba_data`], but returns an `InvalidInput`
    /// error instead of panicking.
    pub fn try_from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> io::Result<PixelGrid> {
        if width < MIN_WIDTH {
            invalid_input!(
                "Invalid width (was {}, but must be at least {})",
                width,
                MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            invalid_input!(
                "Invalid height (was {}, but must be at least {})",
                height,
                MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            invalid_input!(
                "Invalid data length (was {}, but must be {} for {}x{} grid)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        Ok(PixelGrid { width, height, rgba_data })
    }

    /// Creates a grid of the given dimensions where every pixel has the same
    /// RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> PixelGrid {
        let num_pixels = (width as usize) * (height as usize);
        let rgba_data = rgba.repeat(num_pixels);
        PixelGrid::from_rgba_data(width, height, rgba_data)
    }

    /// Returns the width of the grid, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the grid, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this grid, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Returns the RGBA value of the pixel `x` pixels right from the left
    /// edge and `y` pixels down from the top edge.  Panics if the coordinates
    /// are outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(
            x < self.width && y < self.height,
            "Pixel ({}, {}) is outside of {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        let start = 4 * (y as usize * self.width as usize + x as usize);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.rgba_data[start..][..4]);
        rgba
    }

    /// Returns the rows of RGBA data starting from the *bottom* row, which
    /// is the order bitmaps store them in.
    pub fn rows_bottom_up(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rgba_data.chunks_exact(4 * self.width as usize).rev()
    }
}

// The unchecked shape of a serialized grid.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPixelGrid {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPixelGrid> for PixelGrid {
    type Error = io::Error;

    fn try_from(raw: RawPixelGrid) -> io::Result<PixelGrid> {
        PixelGrid::try_from_rgba_data(raw.width, raw.height, raw.rgba_data)
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::PixelGrid;
    use std::io::ErrorKind;

    #[test]
    fn pixel_lookup() {
        let rgba: &[u8] = b"\
            \x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\
            \x0d\x0e\x0f\x10\x11\x12\x13\x14\x15\x16\x17\x18";
        let grid = PixelGrid::from_rgba_data(3, 2, rgba.to_vec());
        assert_eq!(grid.pixel(0, 0), [1, 2, 3, 4]);
        assert_eq!(grid.pixel(2, 0), [9, 10, 11, 12]);
        assert_eq!(grid.pixel(1, 1), [17, 18, 19, 20]);
    }

    #[test]
    fn rows_start_from_bottom() {
        let rgba: &[u8] = b"\
            \xff\x00\x00\xff\
            \x00\xff\x00\xff\
            \x00\x00\xff\xff";
        let grid = PixelGrid::from_rgba_data(1, 3, rgba.to_vec());
        let rows: Vec<&[u8]> = grid.rows_bottom_up().collect();
        assert_eq!(rows, vec![&rgba[8..12], &rgba[4..8], &rgba[0..4]]);
    }

    #[test]
    fn filled_grid() {
        let grid = PixelGrid::filled(4, 3, [1, 2, 3, 4]);
        assert_eq!(grid.rgba_data().len(), 48);
        assert_eq!(grid.pixel(3, 2), [1, 2, 3, 4]);
    }

    #[test]
    fn inconsistent_data_is_an_error() {
        let error = PixelGrid::try_from_rgba_data(2, 2, vec![1, 2, 3, 4])
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        let error = PixelGrid::try_from_rgba_data(0, 1, Vec::new()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert!(PixelGrid::try_from_rgba_data(1, 1, vec![0; 4]).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_dimensions() {
        let json = r#"{"width":1,"height":1,"rgba_data":[1,2,3,4]}"#;
        let grid: PixelGrid = serde_json::from_str(json).unwrap();
        assert_eq!(grid.pixel(0, 0), [1, 2, 3, 4]);
        let json = r#"{"width":2,"height":2,"rgba_data":[1,2,3,4]}"#;
        assert!(serde_json::from_str::<PixelGrid>(json).is_err());
        let json = r#"{"width":0,"height":1,"rgba_data":[]}"#;
        assert!(serde_json::from_str::<PixelGrid>(json).is_err());
    }

    #[test]
    #[should_panic(expected = "Invalid width")]
    fn zero_width_panics() {
        PixelGrid::from_rgba_data(0, 1, Vec::new());
    }

    #[test]
    #[should_panic(expected = "Invalid data length")]
    fn wrong_data_length_panics() {
        PixelGrid::from_rgba_data(2, 2, vec![0; 12]);
    }
}

//===========================================================================//
